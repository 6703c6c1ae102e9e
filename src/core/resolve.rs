use crate::config::consts::DEPARTMENTS;
use crate::domain::model::Department;
use crate::utils::error::{Result, SyllabusError};

/// Maps a user-supplied code to a catalog entry. Absent or empty input picks
/// the catalog's first department; anything else is trimmed, uppercased and
/// matched case-insensitively. A code that trims to nothing matches no
/// catalog entry and is rejected.
pub fn resolve_department(code: Option<&str>) -> Result<&'static Department> {
    let code = match code {
        Some(code) if !code.is_empty() => code.trim().to_uppercase(),
        _ => return Ok(&DEPARTMENTS[0]),
    };

    DEPARTMENTS
        .iter()
        .find(|department| department.code == code)
        .ok_or_else(|| SyllabusError::invalid_input("unknown department code"))
}

/// Accepts exactly 4 ASCII digits; absent or blank input falls back to the
/// configured default. No range checking beyond the shape.
pub fn normalize_year(input: Option<&str>, default_year: &str) -> Result<String> {
    let year = match input {
        Some(year) if !year.is_empty() => year,
        _ => return Ok(default_year.to_string()),
    };

    if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
        Ok(year.to_string())
    } else {
        Err(SyllabusError::invalid_input("year must be a 4 digit string"))
    }
}
