//! Error types for the E-Library client

use thiserror::Error;

/// Why a fetch cycle failed.
///
/// Every variant is terminal for its cycle and is surfaced through
/// [`FetchResult::Failed`](crate::models::FetchResult::Failed); nothing here is
/// allowed to escape the controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// A credential was required but none (or only an expired one) was available.
    #[error("unauthenticated")]
    Unauthenticated,

    /// The backend rejected the credential (401/403).
    #[error("unauthorized (status {0})")]
    Unauthorized(u16),

    /// Connectivity failure or timeout.
    #[error("network error: {0}")]
    Network(String),

    /// 5xx response.
    #[error("server error (status {0})")]
    Server(u16),

    /// Any other non-2xx response.
    #[error("request rejected (status {0})")]
    Rejected(u16),

    /// The body did not match the pagination envelope, or its page bounds were invalid.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Stable category of a [`FetchError`], independent of its detail payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Unauthenticated,
    Unauthorized,
    Network,
    Server,
    Rejected,
    Malformed,
}

impl FetchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::Unauthenticated => "unauthenticated",
            FetchErrorKind::Unauthorized => "unauthorized",
            FetchErrorKind::Network => "network",
            FetchErrorKind::Server => "server",
            FetchErrorKind::Rejected => "rejected",
            FetchErrorKind::Malformed => "malformed",
        }
    }
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Unauthenticated => FetchErrorKind::Unauthenticated,
            FetchError::Unauthorized(_) => FetchErrorKind::Unauthorized,
            FetchError::Network(_) => FetchErrorKind::Network,
            FetchError::Server(_) => FetchErrorKind::Server,
            FetchError::Rejected(_) => FetchErrorKind::Rejected,
            FetchError::Malformed(_) => FetchErrorKind::Malformed,
        }
    }

    /// Map a non-2xx HTTP status onto the taxonomy.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => FetchError::Unauthorized(status),
            500..=599 => FetchError::Server(status),
            _ => FetchError::Rejected(status),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        FetchError::Malformed(detail.into())
    }

    pub fn network(detail: impl Into<String>) -> Self {
        FetchError::Network(detail.into())
    }

    /// Non-technical text suitable for showing in place of a list.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Unauthenticated => "Please sign in to see this page.".to_string(),
            FetchError::Unauthorized(_) => {
                "You are not allowed to see this page. Try signing in again.".to_string()
            }
            FetchError::Network(detail) if detail.trim().is_empty() => {
                "Something went wrong!".to_string()
            }
            FetchError::Network(detail) => {
                format!("Could not reach the library server: {}", detail)
            }
            FetchError::Server(_) => {
                "The library server ran into a problem. Please try again later.".to_string()
            }
            FetchError::Rejected(status) => {
                format!("The library server refused the request (status {}).", status)
            }
            FetchError::Malformed(_) => {
                "The library server sent a response we could not understand.".to_string()
            }
        }
    }
}

/// Application-level errors (configuration, client construction, CLI use)
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
