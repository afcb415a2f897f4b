use thiserror::Error;

/// Errors that can occur while searching recipes or managing favorites
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The recipe API answered with a non-success status
    #[error("Recipe API returned status {status}")]
    Api { status: u16 },

    /// Request could not be sent or the response body could not be decoded
    #[error("Failed to fetch recipes: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Durable storage could not be written
    #[error("Storage error: {0}")]
    Storage(String),

    /// File system error in the storage backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Favorites could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unknown diet or health tag
    #[error("Unknown {kind} tag: {value}")]
    InvalidTag { kind: &'static str, value: String },

    /// An API credential is neither configured nor in the environment
    #[error("{0} not found in config or environment")]
    MissingCredential(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, RecipeError>;
