use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Configuration port for the pipeline. Concrete providers live under
/// `config`; tests supply their own implementations.
pub trait SyllabusConfig: Send + Sync {
    /// Base endpoint of the remote syllabus page.
    fn base_url(&self) -> &str;
    /// Process-wide school identifier sent as a query parameter.
    fn school_id(&self) -> &str;
    /// Directory holding local CSV snapshots.
    fn csv_dir(&self) -> &Path;
    /// Year used when the caller passes none.
    fn default_year(&self) -> &str;
    /// Fixed TTL applied to every cache entry.
    fn cache_ttl(&self) -> Duration;
}

/// External collaborator that regenerates a missing CSV snapshot. Expected to
/// be idempotent, write files discoverable by the loader's naming convention,
/// and fail loudly (non-zero exit) on error.
#[async_trait]
pub trait CsvGenerator: Send + Sync {
    async fn generate(&self, year: &str, output_dir: &Path) -> Result<()>;
}
