use chrono::{DateTime, Duration, Utc};
use pz_core::error::error_body;
use pz_core::{Error, Result};
use serde::Deserialize;

use crate::config::SearchConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

/// When a token granted at `now` for `expires_in` seconds stops being usable.
/// Missing or out-of-range lifetimes never expire locally.
fn expiry_after(now: DateTime<Utc>, expires_in: Option<i64>) -> DateTime<Utc> {
    expires_in
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Holds the bearer token for the search API and knows how to renew it.
#[derive(Debug, Default)]
pub struct TokenHolder {
    token: Option<AccessToken>,
}

impl TokenHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored token, unless it has expired.
    pub fn current(&self, now: DateTime<Utc>) -> Option<&str> {
        self.token
            .as_ref()
            .filter(|token| !token.is_expired(now))
            .map(|token| token.value.as_str())
    }

    pub fn store(&mut self, token: AccessToken) {
        self.token = Some(token);
    }

    pub fn invalidate(&mut self) {
        self.token = None;
    }

    /// Runs the client-credentials exchange and keeps the new token.
    pub async fn refresh(&mut self, http: &reqwest::Client, config: &SearchConfig) -> Result<String> {
        let url = config.endpoint("oauth2/token")?;
        tracing::info!(%url, "refreshing search API token");

        let response = http
            .post(url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(Error::Auth(format!("token refresh failed with {}: {}", status, body)));
        }

        let granted: TokenResponse = response.json().await?;
        let expires_at = expiry_after(Utc::now(), granted.expires_in);
        self.store(AccessToken {
            value: granted.access_token.clone(),
            expires_at,
        });
        Ok(granted.access_token)
    }

    /// A usable token, refreshing only when none is held or it has expired.
    pub async fn bearer(&mut self, http: &reqwest::Client, config: &SearchConfig) -> Result<String> {
        match self.current(Utc::now()) {
            Some(token) => Ok(token.to_string()),
            None => self.refresh(http, config).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use serde_json::json;

    #[test]
    fn test_current_respects_expiry() {
        let now = Utc::now();
        let mut holder = TokenHolder::new();
        assert_eq!(holder.current(now), None);

        holder.store(AccessToken {
            value: "fresh".to_string(),
            expires_at: now + Duration::minutes(5),
        });
        assert_eq!(holder.current(now), Some("fresh"));
        assert_eq!(holder.current(now + Duration::minutes(5)), None);

        holder.invalidate();
        assert_eq!(holder.current(now), None);
    }

    #[test]
    fn test_expiry_after() {
        let now = Utc::now();
        assert_eq!(expiry_after(now, Some(60)), now + Duration::seconds(60));
        assert_eq!(expiry_after(now, None), DateTime::<Utc>::MAX_UTC);
        assert_eq!(expiry_after(now, Some(i64::MAX)), DateTime::<Utc>::MAX_UTC);
        assert_eq!(expiry_after(now, Some(i64::MIN)), DateTime::<Utc>::MAX_UTC);
    }

    #[tokio::test]
    async fn test_refresh_survives_huge_lifetime() {
        let app = Router::new().route(
            "/oauth2/token",
            post(|| async { Json(json!({"access_token": "t", "expires_in": i64::MAX})) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = SearchConfig::new("id", "secret").with_api_base(format!("http://{}", addr));
        let mut holder = TokenHolder::new();
        let token = holder.refresh(&reqwest::Client::new(), &config).await.unwrap();
        assert_eq!(token, "t");
        assert_eq!(holder.current(Utc::now()), Some("t"));
    }

    #[test]
    fn test_token_response_without_expiry() {
        let granted: TokenResponse = serde_json::from_str(r#"{"access_token": "abc", "token_type": "Bearer"}"#).unwrap();
        assert_eq!(granted.access_token, "abc");
        assert_eq!(granted.expires_in, None);
    }
}
