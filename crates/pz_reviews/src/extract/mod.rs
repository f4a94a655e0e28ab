//! Turning a fetched business page into review records.
//!
//! Pages come in two shapes: older ones where every review is a block of
//! markup, and newer ones that embed a JSON-LD object carrying the reviews
//! already parsed. [`Extractor::detect`] picks the right reader for a page.

use pz_core::ReviewRecord;
use scraper::{ElementRef, Html};

pub mod jsonld;
pub mod markup;

pub use jsonld::JsonLdExtractor;
pub use markup::MarkupExtractor;

pub trait ReviewExtractor {
    /// Short label used in logs
    fn name(&self) -> &'static str;

    /// Returns every review on the page in document order.
    fn extract(&self, document: &Html) -> Vec<ReviewRecord>;
}

/// Enum that holds every supported page reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    Markup(MarkupExtractor),
    JsonLd(JsonLdExtractor),
}

impl Extractor {
    /// Prefers the embedded structured data when the page has a block with reviews in it.
    pub fn detect(document: &Html) -> Self {
        if jsonld::find_review_block(document).is_some() {
            Extractor::JsonLd(JsonLdExtractor)
        } else {
            Extractor::Markup(MarkupExtractor)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Extractor::Markup(e) => e.name(),
            Extractor::JsonLd(e) => e.name(),
        }
    }

    pub fn extract(&self, document: &Html) -> Vec<ReviewRecord> {
        match self {
            Extractor::Markup(e) => e.extract(document),
            Extractor::JsonLd(e) => e.extract(document),
        }
    }
}

/// True when the element's space-delimited `class` attribute contains `class`.
pub fn has_class(element: &ElementRef, class: &str) -> bool {
    element
        .value()
        .attr("class")
        .map_or(false, |classes| classes.split_whitespace().any(|c| c == class))
}

/// Reviews of an already parsed page, unsorted.
pub fn assemble(document: &Html) -> Vec<ReviewRecord> {
    let extractor = Extractor::detect(document);
    let reviews = extractor.extract(document);
    tracing::debug!(extractor = extractor.name(), count = reviews.len(), "assembled reviews");
    reviews
}

pub fn assemble_html(html: &str) -> Vec<ReviewRecord> {
    assemble(&Html::parse_document(html))
}
