use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One user review pulled out of a business page.
///
/// Every field except `content` may be missing when the page markup
/// doesn't carry it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub date: Option<NaiveDate>,
    pub rating: Option<f64>,
    pub content: String,
    pub author: Option<String>,
}

impl ReviewRecord {
    pub fn new(
        date: Option<NaiveDate>,
        rating: Option<f64>,
        content: String,
        author: Option<String>,
    ) -> Self {
        Self {
            date,
            rating,
            content,
            author,
        }
    }
}

/// The newest reviews of a page together with their mean rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// `None` when none of the selected reviews carries a rating.
    pub average_rating: Option<f64>,
    pub reviews: Vec<ReviewRecord>,
}

/// A search hit from the business directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    pub url: String,
}

/// Formats a review date the way pages display it, e.g. `2017-06-22`.
pub fn pretty_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
