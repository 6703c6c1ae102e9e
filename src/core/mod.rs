pub mod cache;
pub mod csv_source;
pub mod html_parser;
pub mod pipeline;
pub mod resolve;

pub use crate::domain::model::{FetchParams, ResolvedPayload, Subject};
pub use crate::domain::ports::{CsvGenerator, SyllabusConfig};
pub use crate::utils::error::Result;
