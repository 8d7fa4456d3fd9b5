use thiserror::Error;

/// Top-level error type for the chat shell.
///
/// The session core is failure-light: blank input and stale timer completions
/// are not errors at all. What remains is input validation (modes, languages),
/// configuration I/O, and the speech collaborator, whose failures are logged
/// and swallowed by the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShellError {
    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    #[error("Invalid language: {0}")]
    InvalidLanguage(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ShellError {
    fn from(err: toml::de::Error) -> Self {
        ShellError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ShellError {
    fn from(err: toml::ser::Error) -> Self {
        ShellError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        ShellError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for chat shell operations.
pub type Result<T> = std::result::Result<T, ShellError>;
