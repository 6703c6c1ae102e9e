use thiserror::Error;

/// Failure taxonomy for the subject-resolution pipeline. Every variant maps to
/// an HTTP-style status through [`SyllabusError::status`]; the CLI surfaces
/// status + message as-is for classified failures and a generic message for
/// anything else.
#[derive(Error, Debug)]
pub enum SyllabusError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("failed to fetch syllabus page ({status})")]
    RemoteFetch { status: u16 },

    #[error("failed to parse syllabus page")]
    RemoteParse,

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("external generator failed: {message}")]
    Generator { message: String },
}

impl SyllabusError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn generator(message: impl Into<String>) -> Self {
        Self::Generator {
            message: message.into(),
        }
    }

    /// Status classification: 400 for input errors, 502 for upstream fetch or
    /// parse failures, 500 for local faults.
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } => 400,
            Self::RemoteFetch { .. } | Self::RemoteParse | Self::Http(_) => 502,
            Self::Io(_) | Self::Csv(_) | Self::Generator { .. } => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyllabusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(SyllabusError::invalid_input("bad year").status(), 400);
        assert_eq!(SyllabusError::RemoteFetch { status: 503 }.status(), 502);
        assert_eq!(SyllabusError::RemoteParse.status(), 502);
        assert_eq!(
            SyllabusError::Io(std::io::Error::other("boom")).status(),
            500
        );
    }

    #[test]
    fn invalid_input_message_passthrough() {
        let err = SyllabusError::invalid_input("unknown department code");
        assert_eq!(err.to_string(), "unknown department code");
    }
}
