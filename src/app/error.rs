use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    /// The provider responded with its structured failure payload.
    #[error("news provider error ({code}): {message}")]
    RemoteApi {
        status: String,
        code: String,
        message: String,
    },

    /// No response was received at all.
    #[error("{0}")]
    Network(String),

    #[error("could not open link: {0}")]
    LinkOpen(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NewsError {
    /// Text the list screen shows for a failed page-1 fetch: the provider's
    /// message verbatim for [`NewsError::RemoteApi`], the fixed per-endpoint
    /// message for [`NewsError::Network`].
    pub fn user_message(&self) -> String {
        match self {
            NewsError::RemoteApi { message, .. } => message.clone(),
            NewsError::Network(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NewsError>;
