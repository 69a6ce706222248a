use thiserror::Error;

/// Result type for model store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or mutating a model
#[derive(Error, Debug)]
pub enum Error {
    #[error("STEP parse error at byte {offset}: {message}")]
    Parse { offset: usize, message: String },

    #[error("Entity #{0} not found")]
    EntityNotFound(u32),

    #[error("Attribute {index} of entity #{id} is not a list")]
    NotAList { id: u32, index: usize },

    #[error("Model has no owner history")]
    MissingOwnerHistory,
}

impl Error {
    /// Shorthand for a parse error with context
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }
}
