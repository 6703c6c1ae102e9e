pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::CliConfig;
pub use core::cache::SubjectCache;
pub use core::pipeline::SyllabusPipeline;
pub use domain::model::{Classification, FetchParams, ResolvedPayload, Source, Subject};
pub use utils::error::{Result, SyllabusError};
