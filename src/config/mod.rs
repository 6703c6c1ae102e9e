pub mod cli;
pub mod consts;

use crate::domain::ports::SyllabusConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "syllabus-etl")]
#[command(about = "Resolve course-syllabus subjects for a department and academic year")]
pub struct CliConfig {
    /// Department code (M, E, D, J, C); defaults to the first catalog entry
    #[arg(long)]
    pub department: Option<String>,

    /// Academic year as a 4 digit string
    #[arg(long)]
    pub year: Option<String>,

    /// Directory holding local CSV snapshots
    #[arg(long, default_value = "./data/syllabus")]
    pub csv_dir: PathBuf,

    /// Base endpoint of the remote syllabus page
    #[arg(long, default_value = consts::BASE_URL)]
    pub base_url: String,

    /// Command invoked to regenerate a missing CSV snapshot, e.g.
    /// "python3,scripts/scraping.py"
    #[arg(long, value_delimiter = ',')]
    pub generator: Vec<String>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl SyllabusConfig for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn school_id(&self) -> &str {
        consts::SCHOOL_ID
    }

    fn csv_dir(&self) -> &Path {
        &self.csv_dir
    }

    fn default_year(&self) -> &str {
        consts::DEFAULT_YEAR
    }

    fn cache_ttl(&self) -> Duration {
        consts::CACHE_TTL
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_path("csv_dir", &self.csv_dir.to_string_lossy())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            department: None,
            year: None,
            csv_dir: PathBuf::from("./data/syllabus"),
            base_url: consts::BASE_URL.to_string(),
            generator: vec![],
            verbose: false,
        }
    }

    #[test]
    fn default_config_validates() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = base_config();
        config.base_url = "ftp://syllabus.example".to_string();
        assert!(config.validate().is_err());
    }
}
