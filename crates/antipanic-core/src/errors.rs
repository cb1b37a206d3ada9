/// Core error type for the Mini App client.
///
/// Adapter crates map their specific errors into this type so the view layer
/// can surface a single human-readable message for any failed operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    /// Non-2xx response from the backend; `message` is what the user sees.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Protocol(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

impl Error {
    /// The string shown in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
