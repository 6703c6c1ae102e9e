use crate::utils::error::{Result, SyllabusError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SyllabusError::invalid_input(format!(
            "{field_name}: URL cannot be empty"
        )));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SyllabusError::invalid_input(format!(
                "{field_name}: unsupported URL scheme: {scheme}"
            ))),
        },
        Err(e) => Err(SyllabusError::invalid_input(format!(
            "{field_name}: invalid URL format: {e}"
        ))),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SyllabusError::invalid_input(format!(
            "{field_name}: path cannot be empty"
        )));
    }

    if path.contains('\0') {
        return Err(SyllabusError::invalid_input(format!(
            "{field_name}: path contains null bytes"
        )));
    }

    Ok(())
}
