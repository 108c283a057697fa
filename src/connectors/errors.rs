use reqwest::StatusCode;

/// Failure talking to the assistants API or the avatar storage. Routes log
/// the detail and answer with their own generic message.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// Upstream answered with a status we don't treat specially
    #[error("upstream answered {status}: {body}")]
    Upstream { status: u16, body: String },
    /// Timeout, refused connection or a 5xx
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// Token or key rejected (401/403)
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConnectorError {
    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            s if s.is_server_error() => Self::ServiceUnavailable(format!("{}: {}", s, body)),
            s => Self::Upstream {
                status: s.as_u16(),
                body,
            },
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}
