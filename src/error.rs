use thiserror::Error;

/// Failures surfaced by file stores and the index synchronizer.
///
/// Every variant renders as a single human-readable message; callers only
/// branch on the variant where they need to pick different wording.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("remote not configured: {0}")]
    ConfigMissing(String),
    #[error("invalid entry: {0}")]
    Validation(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("{path}: {message} (HTTP {status})")]
    Rejected {
        path: String,
        status: u16,
        message: String,
    },
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("corrupt content in {path}: {reason}")]
    Corrupt { path: String, reason: String },
}

pub const STATUS_CONFLICT: u16 = 409;
pub const STATUS_UNPROCESSABLE: u16 = 422;
/// Fragment of the 422 body returned when a write over an existing file
/// carries no token.
pub const SHA_NOT_SUPPLIED: &str = "\"sha\" wasn't supplied";

impl CatalogError {
    pub fn conflict(path: &str, message: impl Into<String>) -> Self {
        Self::Rejected {
            path: path.to_string(),
            status: STATUS_CONFLICT,
            message: message.into(),
        }
    }

    pub fn corrupt(path: &str, reason: impl std::fmt::Display) -> Self {
        Self::Corrupt {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True when the remote refused a write because the supplied token was
    /// stale, or missing for a file that already exists. Other 422s are
    /// plain validation failures.
    pub fn is_conflict(&self) -> bool {
        match self {
            Self::Rejected { status, message, .. } => {
                *status == STATUS_CONFLICT
                    || (*status == STATUS_UNPROCESSABLE && message.contains(SHA_NOT_SUPPLIED))
            }
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::{CatalogError, STATUS_UNPROCESSABLE};

    #[test]
    fn rejected_message_carries_remote_text_and_status() {
        let err = CatalogError::conflict("entries.json", "entries.json does not match abc");
        assert!(err.is_conflict());
        assert_eq!(
            err.to_string(),
            "entries.json: entries.json does not match abc (HTTP 409)"
        );
    }

    #[test]
    fn not_found_is_distinguishable() {
        let err = CatalogError::NotFound("entries/x.md".into());
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn only_missing_sha_422_counts_as_conflict() {
        let missing_sha = CatalogError::Rejected {
            path: "entries.json".into(),
            status: STATUS_UNPROCESSABLE,
            message: "Invalid request.\n\n\"sha\" wasn't supplied.".into(),
        };
        assert!(missing_sha.is_conflict());

        let validation = CatalogError::Rejected {
            path: "entries/a.md".into(),
            status: STATUS_UNPROCESSABLE,
            message: "Invalid request.\n\nFor 'properties/content', nil is not a string.".into(),
        };
        assert!(!validation.is_conflict());
    }
}
