use std::sync::Arc;
use pz_reviews::DocumentFetcher;
use pz_search::BusinessSearch;

#[derive(Debug, Clone, Copy)]
pub struct WebConfig {
    pub default_count: usize,
    pub max_count: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            default_count: 5,
            max_count: 10,
        }
    }
}

impl WebConfig {
    /// Reads the `count` form field. Anything that isn't a number gets the default.
    pub fn review_count(&self, raw: Option<&str>) -> usize {
        raw.and_then(|c| c.trim().parse::<usize>().ok())
            .unwrap_or(self.default_count)
            .min(self.max_count)
    }
}

pub struct AppState {
    pub search: Arc<dyn BusinessSearch>,
    pub fetcher: Arc<dyn DocumentFetcher>,
    pub config: WebConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_count() {
        let config = WebConfig::default();
        assert_eq!(config.review_count(None), 5);
        assert_eq!(config.review_count(Some("3")), 3);
        assert_eq!(config.review_count(Some(" 7 ")), 7);
        assert_eq!(config.review_count(Some("0")), 0);
        assert_eq!(config.review_count(Some("25")), 10);
        assert_eq!(config.review_count(Some("lots")), 5);
        assert_eq!(config.review_count(Some("-2")), 5);
        assert_eq!(config.review_count(Some("")), 5);
    }
}
