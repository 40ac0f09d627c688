//! Persisted key layout. Kept compatible with the browser build's local storage.

/// JSON array of `ResumeSummary`.
pub const RESUME_LIST_KEY: &str = "resume-builder-list";

/// Bare string: id of the resume being edited.
pub const CURRENT_RESUME_KEY: &str = "resume-builder-current";

/// JSON `ResumeDocument` from the single-document era.
pub const LEGACY_RESUME_KEY: &str = "resume-builder-data";

const DOCUMENT_PREFIX: &str = "resume-";

pub fn document_key(id: &str) -> String {
    format!("{DOCUMENT_PREFIX}{id}")
}

/// Inverse of [`document_key`]; the reserved bookkeeping keys are not documents.
pub fn document_id(key: &str) -> Option<&str> {
    if matches!(key, RESUME_LIST_KEY | CURRENT_RESUME_KEY | LEGACY_RESUME_KEY) {
        return None;
    }
    key.strip_prefix(DOCUMENT_PREFIX).filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_key_round_trips() {
        assert_eq!(document_key("E1"), "resume-E1");
        assert_eq!(document_id("resume-E1"), Some("E1"));
    }

    #[test]
    fn test_reserved_keys_are_not_documents() {
        assert_eq!(document_id(RESUME_LIST_KEY), None);
        assert_eq!(document_id(CURRENT_RESUME_KEY), None);
        assert_eq!(document_id(LEGACY_RESUME_KEY), None);
        assert_eq!(document_id("resume-"), None);
        assert_eq!(document_id("other"), None);
    }
}
