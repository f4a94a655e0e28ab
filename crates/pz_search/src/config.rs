use std::fmt;
use pz_core::{Error, Result};
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.yelp.com";
pub const DEFAULT_LOCATION: &str = "New York, NY, US";
pub const DEFAULT_CATEGORY: &str = "pizza";

#[derive(Clone)]
pub struct SearchConfig {
    pub client_id: String,
    pub client_secret: String,
    pub api_base: String,
    pub location: String,
    pub category: String,
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("location", &self.location)
            .field("category", &self.category)
            .finish()
    }
}

impl SearchConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Resolves `path` against the API base.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.api_base.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base)
            .and_then(|base| base.join(path))
            .map_err(|e| Error::InvalidUrl(format!("{}{}: {}", base, path, e)))
    }
}
