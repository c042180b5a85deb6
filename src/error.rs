use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("HTTP {status} – {status_text}")]
    Http { status: u16, status_text: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl Error {
    /// 上游返回的 HTTP 状态码 (如果有)
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
