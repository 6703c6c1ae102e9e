use crate::domain::model::{Classification, Department, Subject};
use crate::domain::ports::CsvGenerator;
use crate::utils::error::{Result, SyllabusError};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Column alias table: each required column matches either the source-native
/// label or its canonical fallback.
const COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("教科名", "name"),
    ("学年", "grade"),
    ("科目", "classification"),
    ("区分", "requirement"),
    ("単位数", "credits"),
];

const ID: usize = 0;
const NAME: usize = 1;
const GRADE: usize = 2;
const CLASSIFICATION: usize = 3;
const REQUIREMENT: usize = 4;
const CREDITS: usize = 5;

/// Loads subjects from a local CSV snapshot, independent of network
/// availability. Absence of a usable file is reported as `Ok(None)`, never as
/// an error; a present-but-malformed file is a hard failure.
pub struct CsvSource<'a> {
    dir: &'a Path,
    generator: Option<&'a dyn CsvGenerator>,
}

impl<'a> CsvSource<'a> {
    pub fn new(dir: &'a Path, generator: Option<&'a dyn CsvGenerator>) -> Self {
        Self { dir, generator }
    }

    pub async fn load(
        &self,
        department: &Department,
        year: &str,
    ) -> Result<Option<Vec<Subject>>> {
        let mut allow_generate = true;

        loop {
            if let Some(path) = self.locate(department, year).await? {
                tracing::debug!("loading structured source {}", path.display());
                let text = tokio::fs::read_to_string(&path).await?;
                return parse_csv(&text, &path, department, year).map(Some);
            }

            if allow_generate {
                // one generation attempt, then retry discovery exactly once
                allow_generate = false;
                if let Some(generator) = self.generator {
                    match generator.generate(year, self.dir).await {
                        Ok(()) => continue,
                        Err(e) => {
                            tracing::warn!("CSV generator failed, falling back: {e}");
                            return Ok(None);
                        }
                    }
                }
            }

            return Ok(None);
        }
    }

    /// Filename variants from code, backend id and name, then a
    /// case-insensitive directory scan. First match wins, candidates before
    /// scan.
    async fn locate(&self, department: &Department, year: &str) -> Result<Option<PathBuf>> {
        for base in [department.code, department.id, department.name] {
            for separator in ["-", "_", ""] {
                let candidate = self.dir.join(format!("{base}{separator}{year}.csv"));
                if tokio::fs::try_exists(&candidate).await? {
                    return Ok(Some(candidate));
                }
            }
        }

        let pattern = Regex::new(&format!(
            "(?i)^{}[-_]?{}\\.csv$",
            regex::escape(department.code),
            regex::escape(year)
        ))
        .map_err(|e| SyllabusError::invalid_input(format!("bad scan pattern: {e}")))?;

        let mut entries = match tokio::fs::read_dir(self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();

        Ok(names
            .into_iter()
            .find(|name| pattern.is_match(name))
            .map(|name| self.dir.join(name)))
    }
}

/// Closed 3-way normalization: strip whitespace and parenthesis characters,
/// then classify by marker. 留学生 dominates 選択; everything else counts as
/// required.
pub fn normalize_requirement(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '（' | '）'))
        .collect();

    if stripped.contains("留学生") {
        "必修（留学生）".to_string()
    } else if stripped.contains("選択") {
        "選択".to_string()
    } else {
        "必修".to_string()
    }
}

fn parse_csv(
    text: &str,
    path: &Path,
    department: &Department,
    year: &str,
) -> Result<Vec<Subject>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(SyllabusError::invalid_input(format!(
            "csv file {} is empty",
            path.display()
        )));
    }

    // plain comma split, no quoting or escaping
    let joined = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .quoting(false)
        .flexible(true)
        .from_reader(joined.as_bytes());

    let headers = reader.headers()?.clone();
    let indices = column_indices(&headers)?;

    let mut subjects = Vec::new();
    for (row_index, record) in reader.records().enumerate() {
        let record = record?;
        let field = |column: usize| record.get(indices[column]).unwrap_or("").trim();

        let name = field(NAME);
        if name.is_empty() {
            continue;
        }

        // unresolved grade drops the whole row
        let grade = match field(GRADE).parse::<u8>() {
            Ok(grade) if (1..=5).contains(&grade) => grade,
            _ => continue,
        };

        let id = match field(ID) {
            "" => format!("{}-{}-{}", department.code, year, row_index),
            id => id.to_string(),
        };

        subjects.push(Subject {
            id,
            name: name.to_string(),
            grade,
            classification: Classification::from_text(field(CLASSIFICATION)),
            requirement: normalize_requirement(field(REQUIREMENT)),
            credits: field(CREDITS).parse().unwrap_or(0),
        });
    }

    Ok(subjects)
}

fn column_indices(headers: &csv::StringRecord) -> Result<[usize; 6]> {
    let mut indices = [0usize; 6];

    for (slot, (primary, fallback)) in COLUMNS.iter().enumerate() {
        let position = headers
            .iter()
            .position(|h| h.trim() == *primary || h.trim() == *fallback)
            .ok_or_else(|| SyllabusError::invalid_input("unexpected header"))?;
        indices[slot] = position;
    }

    Ok(indices)
}
