use async_trait::async_trait;
use pz_core::error::error_body;
use pz_core::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::path::PathBuf;
use url::Url;

/// Review sites serve a stripped page (or nothing) to clients that don't look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_5) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/59.0.3071.115 Safari/537.36";

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Returns the raw text of the document at `location`.
    async fn fetch(&self, location: &str) -> Result<String>;
}

pub fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html,application/xhtml+xml"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.8"));

        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<String> {
        let url = parse_url(location)?;
        tracing::debug!(%url, "fetching review page");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(Error::upstream(status.as_u16(), body));
        }
        Ok(response.text().await?)
    }
}

/// Reads saved pages from disk; `location` is a file path relative to `root`.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentFetcher for FileFetcher {
    async fn fetch(&self, location: &str) -> Result<String> {
        let path = self.root.join(location);
        tracing::debug!(path = %path.display(), "reading saved review page");
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap as AxumHeaders, http::StatusCode, routing::get, Router};
    use std::io::Write;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://www.yelp.com/biz/fresh-brew").is_ok());
        assert!(matches!(parse_url("not a url"), Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_http_fetcher_sends_browser_identity() {
        let app = Router::new().route(
            "/biz",
            get(|headers: AxumHeaders| async move {
                headers
                    .get("user-agent")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            }),
        );
        let base = serve(app).await;

        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher.fetch(&format!("{}/biz", base)).await.unwrap();
        assert_eq!(body, BROWSER_USER_AGENT);
    }

    #[tokio::test]
    async fn test_http_fetcher_reports_status() {
        let app = Router::new().route("/gone", get(|| async { (StatusCode::NOT_FOUND, "no such biz") }));
        let base = serve(app).await;

        let fetcher = HttpFetcher::new().unwrap();
        match fetcher.fetch(&format!("{}/gone", base)).await {
            Err(Error::Upstream { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such biz");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_fetcher_rejects_bad_url() {
        let fetcher = HttpFetcher::new().unwrap();
        assert!(matches!(fetcher.fetch("::nope::").await, Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_file_fetcher() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("page.htm")).unwrap();
        write!(file, "<html><body>saved</body></html>").unwrap();

        let fetcher = FileFetcher::new(dir.path());
        let body = fetcher.fetch("page.htm").await.unwrap();
        assert!(body.contains("saved"));

        assert!(matches!(fetcher.fetch("missing.htm").await, Err(Error::Io(_))));
    }
}
