use crate::config::consts::{ACCEPT_LANGUAGE, USER_AGENT};
use crate::core::cache::SubjectCache;
use crate::core::csv_source::CsvSource;
use crate::core::html_parser::parse_subjects;
use crate::core::resolve::{normalize_year, resolve_department};
use crate::domain::model::{Department, FetchParams, Meta, ResolvedPayload, Source, Subject};
use crate::domain::ports::{CsvGenerator, SyllabusConfig};
use crate::utils::error::{Result, SyllabusError};
use chrono::Utc;
use reqwest::Client;

/// Composes resolver -> cache -> CSV loader -> HTML fetch+parse -> cache fill.
/// The cache is owned here and injected at construction; no global state.
pub struct SyllabusPipeline<C: SyllabusConfig> {
    config: C,
    cache: SubjectCache,
    client: Client,
    generator: Option<Box<dyn CsvGenerator>>,
}

impl<C: SyllabusConfig> SyllabusPipeline<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            cache: SubjectCache::new(),
            client: Client::new(),
            generator: None,
        }
    }

    pub fn with_generator(mut self, generator: Box<dyn CsvGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn cache(&self) -> &SubjectCache {
        &self.cache
    }

    /// Resolves one (department, year) selection to a payload. Prefers the
    /// local CSV snapshot, falls back to scraping the remote page, and caches
    /// whichever succeeded. Cancellation never leaves a partial cache entry:
    /// the cache write is the last step after every await.
    pub async fn fetch_subjects(&self, params: &FetchParams) -> Result<ResolvedPayload> {
        let department = resolve_department(params.department_code.as_deref())?;
        let year = normalize_year(params.year.as_deref(), self.config.default_year())?;
        let cache_key = format!("{}-{}", department.id, year);

        if let Some(mut payload) = self.cache.get(&cache_key) {
            tracing::debug!("cache hit for {cache_key}");
            payload.meta.cached = true;
            return Ok(payload);
        }

        let csv_source = CsvSource::new(self.config.csv_dir(), self.generator.as_deref());
        if let Some(subjects) = csv_source.load(department, &year).await? {
            if !subjects.is_empty() {
                tracing::info!(
                    "resolved {} subjects for {cache_key} from CSV snapshot",
                    subjects.len()
                );
                return Ok(self.finish(&cache_key, department, &year, subjects, Source::Csv));
            }
            tracing::warn!("CSV snapshot for {cache_key} has no usable rows, scraping instead");
        }

        let html = self.fetch_page(department, &year).await?;
        let subjects = parse_subjects(&html, department, &year)?;
        tracing::info!(
            "resolved {} subjects for {cache_key} by scraping",
            subjects.len()
        );

        Ok(self.finish(&cache_key, department, &year, subjects, Source::Scrape))
    }

    async fn fetch_page(&self, department: &Department, year: &str) -> Result<String> {
        tracing::debug!(
            "fetching syllabus page for department {} year {year}",
            department.code
        );

        let response = self
            .client
            .get(self.config.base_url())
            .query(&[
                ("school_id", self.config.school_id()),
                ("department_id", department.id),
                ("year", year),
                ("lang", "ja"),
            ])
            .header("User-Agent", USER_AGENT)
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyllabusError::RemoteFetch {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn finish(
        &self,
        cache_key: &str,
        department: &Department,
        year: &str,
        subjects: Vec<Subject>,
        source: Source,
    ) -> ResolvedPayload {
        let payload = ResolvedPayload {
            subjects,
            meta: Meta {
                department: department.code.to_string(),
                department_name: department.name.to_string(),
                year: year.to_string(),
                fetched_at: Utc::now(),
                cached: false,
                source,
            },
        };

        self.cache
            .set(cache_key, payload.clone(), self.config.cache_ttl());

        payload
    }
}
