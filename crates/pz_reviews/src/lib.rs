pub mod extract;
pub mod fetch;
pub mod logging;
pub mod pipeline;
pub mod summary;

pub use extract::{assemble, assemble_html, Extractor, ReviewExtractor};
pub use fetch::{DocumentFetcher, FileFetcher, HttpFetcher};
pub use pipeline::summarize_document;
pub use summary::{avg, rank_and_summarize};

pub mod prelude {
    pub use super::fetch::DocumentFetcher;
    pub use super::pipeline::summarize_document;
    pub use pz_core::{ReviewRecord, ReviewSummary, Result, Error};
}
