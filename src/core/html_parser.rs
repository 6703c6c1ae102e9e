use crate::domain::model::{Classification, Department, Subject};
use crate::utils::error::{Result, SyllabusError};
use scraper::{Html, Selector};
use std::sync::LazyLock;

// Subject names are carried by elements with this marker class.
static NAME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".mcc-hide").expect("valid selector"));

static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("valid selector"));

// One bucket of marker cells per grade level 1..=5.
static GRADE_SELECTORS: LazyLock<[Selector; 5]> = LazyLock::new(|| {
    [".c1m", ".c2m", ".c3m", ".c4m", ".c5m"]
        .map(|css| Selector::parse(css).expect("valid selector"))
});

/// Extracts subjects from a scraped syllabus page using positional heuristics:
/// four field streams (names, classifications, requirements, credits) plus a
/// derived grade sequence are zipped by index. The page has no machine-readable
/// schema; field i of every stream is assumed to describe the same subject.
pub fn parse_subjects(html: &str, department: &Department, year: &str) -> Result<Vec<Subject>> {
    let document = Html::parse_document(html);

    let names: Vec<String> = document
        .select(&NAME_SELECTOR)
        .map(element_text)
        .filter(|name| !name.is_empty())
        .collect();

    let mut classifications = Vec::new();
    let mut requirements = Vec::new();
    let mut credits: Vec<u32> = Vec::new();
    let mut credit_flag = false;

    for cell in document.select(&CELL_SELECTOR) {
        let raw = element_text(cell);
        if raw.is_empty() {
            continue;
        }

        if raw == "一般" || raw == "専門" {
            classifications.push(Classification::from_text(&raw));
            continue;
        }

        if raw.contains("必修") || raw.contains("選択") {
            requirements.push(raw.chars().filter(|c| !c.is_whitespace()).collect::<String>());
            continue;
        }

        if raw.contains("単位") {
            // arms the credit flag; the next qualifying cell is the value
            credit_flag = true;
            continue;
        }

        if credit_flag
            && raw.len() <= 3
            && raw != "前"
            && raw != "後"
            && raw.bytes().all(|b| b.is_ascii_digit())
        {
            credits.push(raw.parse().unwrap_or(0));
            credit_flag = false;
        }
    }

    let grades = derive_grades(
        &document,
        [
            names.len(),
            classifications.len(),
            requirements.len(),
            credits.len(),
        ],
    );

    let size = [
        names.len(),
        classifications.len(),
        requirements.len(),
        credits.len(),
        grades.len(),
    ]
    .into_iter()
    .min()
    .unwrap_or(0);

    let mut subjects = Vec::new();
    // The page repeats these first-year orientation subjects across table
    // sections; only the first occurrence of each is kept.
    let mut seen_english_a = false;
    let mut seen_english_b = false;

    for index in 0..size {
        let name = &names[index];

        if seen_english_a && name == "英語演習ⅠＡ" {
            continue;
        }
        if seen_english_b && name == "英語演習ⅠＢ" {
            continue;
        }
        if name == "英語演習ⅠＡ" {
            seen_english_a = true;
        }
        if name == "英語演習ⅠＢ" {
            seen_english_b = true;
        }

        // Japanese-language subjects are mis-tagged at the source; force the
        // international-student requirement.
        let requirement = if name.contains("日本語") {
            "必修（留学生）".to_string()
        } else {
            requirements[index].clone()
        };

        subjects.push(Subject {
            id: format!("{}-{}-{}", department.code, year, index),
            name: name.clone(),
            grade: grades[index],
            classification: classifications[index],
            requirement,
            credits: credits[index],
        });
    }

    if subjects.is_empty() {
        return Err(SyllabusError::RemoteParse);
    }

    Ok(subjects)
}

/// Walks the five per-grade marker buckets in fixed-width 4-cell groups. A
/// non-empty group keeps the current bucket; a fully-empty group advances it
/// (saturating at grade 5). Bucket index + 1 is the subject's grade.
fn derive_grades(document: &Html, stream_lengths: [usize; 4]) -> Vec<u8> {
    let buckets: Vec<Vec<String>> = GRADE_SELECTORS
        .iter()
        .map(|selector| document.select(selector).map(element_text).collect())
        .collect();

    // A trailing partial group still counts as one subject, so the bucket
    // bound rounds up.
    let bucket_length = buckets.first().map_or(0, Vec::len);
    let expected = stream_lengths
        .into_iter()
        .chain(std::iter::once(bucket_length.div_ceil(4)))
        .min()
        .unwrap_or(0);

    let mut grades = Vec::with_capacity(expected);
    let mut bucket_index = 0usize;
    let mut pointer = 0usize;

    for _ in 0..expected {
        let group_has_value = (0..4).any(|offset| {
            buckets[bucket_index]
                .get(pointer + offset)
                .is_some_and(|cell| !cell.is_empty())
        });

        if !group_has_value {
            bucket_index = (bucket_index + 1).min(buckets.len() - 1);
        }
        grades.push(bucket_index as u8 + 1);
        pointer += 4;
    }

    grades
}

fn element_text(element: scraper::ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
