use thiserror::Error;

#[derive(Error, Debug)]
pub enum TgramError {
    /// The API answered with `ok: false`.
    #[error("API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Handler timed out")]
    Timeout,

    #[error("Handler failed: {0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, TgramError>;
