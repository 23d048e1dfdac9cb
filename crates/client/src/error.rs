use labstock_core::DomainError;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Input rejected locally; nothing was sent.
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    /// Non-success response. `detail` is the server's message.
    #[error("{detail}")]
    Api { status: u16, detail: String },
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status for server-side rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Prefers the `detail` field, falls back to the JSON text, then to the raw body.
pub(crate) fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("detail")
            .and_then(|d| d.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        Err(_) => body.to_string(),
    }
}
