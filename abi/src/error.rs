use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("backend url is not configured: set `api.backend_url` in the config file or the BACKEND_URL environment variable")]
    MissingBackendUrl,

    #[error("invalid backend url {0:?}")]
    InvalidBackendUrl(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("network error: {0}")]
    Network(String),

    #[error("request rejected with status {status}")]
    Rejected {
        status: u16,
        /// text from the `error` field of the response body, if any
        message: Option<String>,
    },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    UnknownAction(#[from] UnknownActionError),

    #[error("invalid payload for action `{kind}`: {reason}")]
    InvalidActionPayload { kind: String, reason: String },

    #[error("invalid search: {0}")]
    InvalidSearch(String),

    #[error("invalid token path {0:?}")]
    InvalidTokenPath(String),

    #[error("token storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Raised by the reducer for an action kind outside the recognized set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown action `{kind}`")]
pub struct UnknownActionError {
    pub kind: String,
}

impl UnknownActionError {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl Error {
    /// Server supplied text for a rejected request.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::MissingBackendUrl
                | Error::InvalidBackendUrl(_)
                | Error::ConfigRead { .. }
                | Error::ConfigParse(_)
                | Error::InvalidTokenPath(_)
        )
    }
}
