use thiserror::Error;

/// Result type for component operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the component
///
/// Validation failures (requirements that do not apply, elements without
/// attributes) are swallowed where they occur; only infrastructure failures
/// reach this type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("model store error: {0}")]
    Core(#[from] ids_lite_core::Error),

    #[error("specification error: {0}")]
    Spec(#[from] ids_lite_spec::Error),
}
