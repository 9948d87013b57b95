use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, UltraError>;

/// Coarse classification of an [`UltraError`], for callers that log or
/// branch on failure kind without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Validation,
    Transport,
    Http,
    Remote,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Validation => write!(f, "validation"),
            Self::Transport => write!(f, "transport"),
            Self::Http => write!(f, "http"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UltraError {
    #[error("private key not found in environment variable '{env_var}'")]
    MissingPrivateKey { env_var: String },

    #[error("invalid private key in environment variable '{env_var}': {reason}")]
    InvalidPrivateKey { env_var: String, reason: String },

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("client has been closed")]
    Closed,

    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("unexpected response shape: {0}")]
    ResponseShape(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("authentication failed (HTTP {status}): {body}")]
    Authentication { status: StatusCode, body: String },

    #[error("rate limited (retry after {retry_after:?}s): {body}")]
    RateLimited {
        retry_after: Option<u64>,
        body: String,
    },

    #[error("HTTP {status}: {message}")]
    Http {
        status: StatusCode,
        message: String,
        body: String,
    },

    #[error("API error: {message}")]
    Api {
        message: String,
        body: serde_json::Value,
    },

    /// The order was created remotely but the execute step failed. The order
    /// is not cancelled; `request_id` identifies it for recovery.
    #[error("execute failed for order {request_id}: {source}")]
    ExecuteFailed {
        request_id: String,
        #[source]
        source: Box<UltraError>,
    },
}

impl UltraError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingPrivateKey { .. }
            | Self::InvalidPrivateKey { .. }
            | Self::InvalidConfig(_)
            | Self::Closed => ErrorKind::Configuration,
            Self::Validation { .. }
            | Self::ResponseShape(_)
            | Self::Signing(_)
            | Self::Serialization(_) => ErrorKind::Validation,
            Self::Network(_) => ErrorKind::Transport,
            Self::Authentication { .. } | Self::RateLimited { .. } | Self::Http { .. } => {
                ErrorKind::Http
            }
            Self::Api { .. } => ErrorKind::Remote,
            Self::ExecuteFailed { source, .. } => source.kind(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout(),
            Self::ExecuteFailed { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}
