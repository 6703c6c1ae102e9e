use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One catalog entry for an academic program. `code` is the user-facing
/// single letter, `id` the backend identifier the syllabus site expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Department {
    pub code: &'static str,
    pub id: &'static str,
    pub name: &'static str,
}

/// General-education vs. specialty coursework, or unknown when the source
/// document carries no usable marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Classification {
    #[serde(rename = "一般")]
    General,
    #[serde(rename = "専門")]
    Specialty,
    #[serde(rename = "")]
    #[default]
    Unknown,
}

impl Classification {
    /// Exact-text match; anything else is Unknown.
    pub fn from_text(raw: &str) -> Self {
        match raw {
            "一般" => Self::General,
            "専門" => Self::Specialty,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "一般",
            Self::Specialty => "専門",
            Self::Unknown => "",
        }
    }
}

/// One curriculum entry for a (department, year). Constructed once per
/// pipeline run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub grade: u8,
    pub classification: Classification,
    /// Raw requirement text on the scrape path (whitespace stripped); the
    /// CSV path normalizes it to 必修 / 選択 / 必修（留学生）.
    pub requirement: String,
    pub credits: u32,
}

/// Provenance of a resolved payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Csv,
    Scrape,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub department: String,
    pub department_name: String,
    pub year: String,
    pub fetched_at: DateTime<Utc>,
    pub cached: bool,
    pub source: Source,
}

/// The unit returned by the pipeline: subjects in source-document order plus
/// provenance metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPayload {
    pub subjects: Vec<Subject>,
    pub meta: Meta,
}

/// Pipeline input; either field may be absent or blank.
#[derive(Debug, Clone, Default)]
pub struct FetchParams {
    pub department_code: Option<String>,
    pub year: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_from_text_is_exact() {
        assert_eq!(Classification::from_text("一般"), Classification::General);
        assert_eq!(Classification::from_text("専門"), Classification::Specialty);
        assert_eq!(Classification::from_text("一般 "), Classification::Unknown);
        assert_eq!(Classification::from_text(""), Classification::Unknown);
    }

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Source::Csv).unwrap(), "\"csv\"");
        assert_eq!(serde_json::to_string(&Source::Scrape).unwrap(), "\"scrape\"");
    }

    #[test]
    fn meta_uses_camel_case_keys() {
        let meta = Meta {
            department: "J".to_string(),
            department_name: "情報工学科".to_string(),
            year: "2025".to_string(),
            fetched_at: Utc::now(),
            cached: false,
            source: Source::Csv,
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("departmentName").is_some());
        assert!(json.get("fetchedAt").is_some());
    }
}
