use thiserror::Error;

/// Result type for specification handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading IDS documents
#[derive(Error, Debug)]
pub enum Error {
    #[error("XML error: {0}")]
    Xml(String),

    #[error("IDS document contains no specifications")]
    EmptyDocument,
}

impl Error {
    /// Shorthand for an XML-level error
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }
}
