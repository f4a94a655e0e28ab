use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Auth error: {0}")]
    Auth(String),

    /// A remote service answered with something other than success.
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },
}

impl Error {
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Error::Upstream {
            status,
            body: body.into(),
        }
    }
}

/// Body of a failed response, for error reporting. An unreadable body is logged and left empty.
pub async fn error_body(response: reqwest::Response) -> String {
    let status = response.status();
    response.text().await.unwrap_or_else(|e| {
        tracing::debug!(%status, "could not read error response body: {}", e);
        String::new()
    })
}
