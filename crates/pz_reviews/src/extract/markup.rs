use chrono::NaiveDate;
use lazy_static::lazy_static;
use pz_core::ReviewRecord;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{has_class, ReviewExtractor};

lazy_static! {
    static ref TITLE_TO_RATING: Regex = Regex::new(r"^(\d\.\d) star rating$").unwrap();
    static ref DATE_MATCHER: Regex = Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").unwrap();
    static ref DIV: Selector = Selector::parse("div").unwrap();
    static ref SPAN: Selector = Selector::parse("span").unwrap();
    static ref PARAGRAPH: Selector = Selector::parse("p").unwrap();
    static ref ANY: Selector = Selector::parse("*").unwrap();
}

const REVIEW_CLASS: &str = "review";
const STARS_CLASS: &str = "i-stars";
const QUALIFIER_CLASS: &str = "rating-qualifier";
const AUTHOR_CLASS: &str = "user-display-name";

/// Reads reviews out of `div.review` blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkupExtractor;

impl ReviewExtractor for MarkupExtractor {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn extract(&self, document: &Html) -> Vec<ReviewRecord> {
        document
            .select(&DIV)
            .filter(|div| has_class(div, REVIEW_CLASS))
            // The first block is always the "write your own review" form for the
            // visitor. It looks like any other review, so drop it by position.
            .skip(1)
            .map(|unit| {
                ReviewRecord::new(
                    extract_date(&unit),
                    extract_rating(&unit),
                    extract_text(&unit),
                    extract_author(&unit),
                )
            })
            .collect()
    }
}

/// Parses titles like `"5.0 star rating"`. Anything else is no rating.
pub fn parse_rating_from_title(title: &str) -> Option<f64> {
    TITLE_TO_RATING
        .captures(title.trim())
        .and_then(|caps| caps[1].parse::<f64>().ok())
}

pub fn extract_rating(unit: &ElementRef) -> Option<f64> {
    unit.select(&DIV)
        .find(|div| has_class(div, STARS_CLASS))
        .and_then(|stars| stars.value().attr("title"))
        .and_then(parse_rating_from_title)
}

/// The first `M/D/YYYY` found in a rating qualifier.
pub fn extract_date(unit: &ElementRef) -> Option<NaiveDate> {
    unit.select(&SPAN)
        .filter(|span| has_class(span, QUALIFIER_CLASS))
        .find_map(|span| parse_us_date(&span.text().collect::<String>()))
}

fn parse_us_date(text: &str) -> Option<NaiveDate> {
    let caps = DATE_MATCHER.captures(text)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn extract_text(unit: &ElementRef) -> String {
    unit.select(&PARAGRAPH)
        .next()
        .map(|p| p.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

pub fn extract_author(unit: &ElementRef) -> Option<String> {
    unit.select(&ANY)
        .find(|el| has_class(el, AUTHOR_CLASS))
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
}
