pub mod error;
pub mod types;

pub use error::Error;
pub use types::{pretty_date, Business, ReviewRecord, ReviewSummary};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::types::{Business, ReviewRecord, ReviewSummary};
    pub use super::{Error, Result};
}
