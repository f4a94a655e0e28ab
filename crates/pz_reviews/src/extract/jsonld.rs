use chrono::NaiveDate;
use lazy_static::lazy_static;
use pz_core::ReviewRecord;
use scraper::{Html, Selector};
use serde_json::Value;

use super::ReviewExtractor;

lazy_static! {
    static ref LD_JSON: Selector = Selector::parse("script[type='application/ld+json']").unwrap();
}

/// Reads reviews from the page's embedded schema.org data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonLdExtractor;

impl ReviewExtractor for JsonLdExtractor {
    fn name(&self) -> &'static str {
        "json-ld"
    }

    fn extract(&self, document: &Html) -> Vec<ReviewRecord> {
        find_review_block(document)
            .unwrap_or_default()
            .iter()
            .map(|unit| {
                ReviewRecord::new(
                    extract_date(unit),
                    extract_rating(unit),
                    extract_text(unit),
                    extract_author(unit),
                )
            })
            .collect()
    }
}

/// Returns the `review` array of the first JSON-LD block that has one.
pub fn find_review_block(document: &Html) -> Option<Vec<Value>> {
    for script in document.select(&LD_JSON) {
        let text = script.text().collect::<String>();
        let json = match serde_json::from_str::<Value>(text.trim()) {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!("skipping unreadable JSON-LD block: {}", e);
                continue;
            }
        };

        let candidates = match json {
            Value::Array(items) => items,
            other => vec![other],
        };
        for mut candidate in candidates {
            if let Some(Value::Array(reviews)) = candidate.get_mut("review").map(Value::take) {
                return Some(reviews);
            }
        }
    }
    None
}

/// `datePublished`, ignoring any time part.
pub fn extract_date(unit: &Value) -> Option<NaiveDate> {
    let published = unit.get("datePublished")?.as_str()?;
    NaiveDate::parse_from_str(published.get(..10)?, "%Y-%m-%d").ok()
}

pub fn extract_rating(unit: &Value) -> Option<f64> {
    match unit.get("reviewRating")?.get("ratingValue")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn extract_text(unit: &Value) -> String {
    unit.get("description")
        .and_then(|d| d.as_str())
        .map(|d| d.trim().to_string())
        .unwrap_or_default()
}

/// Authors show up as a plain name, a `Person` object, or a list of either.
pub fn extract_author(unit: &Value) -> Option<String> {
    let name = match unit.get("author")? {
        Value::Array(arr) => arr.iter().find_map(author_name),
        author => author_name(author),
    }?;
    Some(name.trim().to_string()).filter(|name| !name.is_empty())
}

fn author_name(author: &Value) -> Option<&str> {
    match author {
        Value::Object(obj) => obj.get("name").and_then(|n| n.as_str()),
        Value::String(s) => Some(s.as_str()),
        _ => None,
    }
}
