//! Resume Repository: full documents under `resume-<id>` plus a summary index.
//!
//! Every operation is total. Storage failures are logged and degrade to a
//! no-op or an empty result; the caller's in-memory document stays usable.

pub mod keys;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::errors::{AppError, StoreError};
use crate::models::{ResumeDocument, ResumeSummary};
use crate::storage::KeyValueStore;

use keys::{document_id, document_key, CURRENT_RESUME_KEY, LEGACY_RESUME_KEY, RESUME_LIST_KEY};

/// Appended to the first name of a duplicated resume.
pub const COPY_SUFFIX: &str = " (Copy)";

/// Outcome of [`ResumeRepository::repair_index`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct IndexRepairReport {
    /// Documents that were stored but missing from the index.
    pub added: usize,
    /// Index entries whose document no longer exists.
    pub removed: usize,
}

#[derive(Clone)]
pub struct ResumeRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ResumeRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        ResumeRepository { store }
    }

    /// Upserts the document and its summary. Returns the id even when the
    /// write fails; the failure is only logged.
    pub fn save(&self, doc: &ResumeDocument) -> String {
        if let Err(e) = self.try_save(doc) {
            error!("Error saving resume {}: {e}", doc.id);
        }
        doc.id.clone()
    }

    fn try_save(&self, doc: &ResumeDocument) -> Result<(), StoreError> {
        let now = Utc::now();
        let mut stored = doc.clone();
        stored.updated_at = now;

        // Document first: an index entry must never point at nothing.
        let body = serde_json::to_string(&stored)?;
        self.store.set(&document_key(&stored.id), &body)?;

        let summary = ResumeSummary::from_document(&stored, now);
        let mut list = self.read_list();
        match list.iter_mut().find(|s| s.id == summary.id) {
            Some(existing) => *existing = summary,
            None => list.push(summary),
        }
        self.write_list(&list)?;
        debug!("Saved resume {} ({} entries)", stored.id, stored.entry_count());
        Ok(())
    }

    /// The stored document, or `None` when absent, unreadable, or corrupt.
    pub fn load(&self, id: &str) -> Option<ResumeDocument> {
        self.read_document(&document_key(id))
    }

    /// Removes the document and its summary. Unknown ids are a no-op.
    pub fn delete(&self, id: &str) {
        // Document first, mirroring `save`: a failed remove leaves both in place.
        if let Err(e) = self.store.remove(&document_key(id)) {
            error!("Error deleting resume {id}: {e}");
            return;
        }
        let list = self.read_list();
        let remaining: Vec<_> = list.iter().filter(|s| s.id != id).cloned().collect();
        if remaining.len() != list.len() {
            if let Err(e) = self.write_list(&remaining) {
                error!("Error deleting resume {id} from index: {e}");
                return;
            }
        }
        info!("Deleted resume {id}");
    }

    /// Copies `id` under a fresh id with fresh timestamps and a decorated name.
    /// Sub-record ids are reused; they only need to be unique per document.
    pub fn duplicate(&self, id: &str) -> Result<String, AppError> {
        let original = self
            .load(id)
            .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

        let now = Utc::now();
        let mut copy = original;
        copy.id = Uuid::new_v4().to_string();
        copy.personal_info.first_name = format!("{}{COPY_SUFFIX}", copy.personal_info.first_name);
        copy.created_at = now;
        copy.updated_at = now;

        info!("Duplicated resume {id} as {}", copy.id);
        Ok(self.save(&copy))
    }

    /// Summaries in order of first save.
    pub fn list(&self) -> Vec<ResumeSummary> {
        self.read_list()
    }

    /// The single-document slot older builds wrote to.
    pub fn load_legacy(&self) -> Option<ResumeDocument> {
        self.read_document(LEGACY_RESUME_KEY)
    }

    pub fn save_legacy(&self, doc: &ResumeDocument) {
        let result = serde_json::to_string(doc)
            .map_err(StoreError::from)
            .and_then(|body| self.store.set(LEGACY_RESUME_KEY, &body));
        if let Err(e) = result {
            error!("Error saving resume to legacy slot: {e}");
        }
    }

    pub fn current_id(&self) -> Option<String> {
        match self.store.get(CURRENT_RESUME_KEY) {
            Ok(id) => id.filter(|id| !id.is_empty()),
            Err(e) => {
                error!("Error getting current resume id: {e}");
                None
            }
        }
    }

    pub fn set_current_id(&self, id: &str) {
        if let Err(e) = self.store.set(CURRENT_RESUME_KEY, id) {
            error!("Error setting current resume id: {e}");
        }
    }

    pub fn clear_current_id(&self) {
        if let Err(e) = self.store.remove(CURRENT_RESUME_KEY) {
            error!("Error clearing current resume id: {e}");
        }
    }

    /// Brings the index back in line with the stored documents: orphaned
    /// documents are appended, dangling summaries dropped.
    pub fn repair_index(&self) -> IndexRepairReport {
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                error!("Error listing store keys: {e}");
                return IndexRepairReport::default();
            }
        };

        let mut report = IndexRepairReport::default();
        let mut list = self.read_list();
        let before = list.len();
        list.retain(|s| self.load(&s.id).is_some());
        report.removed = before - list.len();

        let mut orphans: Vec<ResumeDocument> = keys
            .iter()
            .filter_map(|k| document_id(k))
            .filter(|id| !list.iter().any(|s| s.id == *id))
            .filter_map(|id| self.load(id))
            .collect();
        orphans.sort_by_key(|d| d.created_at);
        report.added = orphans.len();
        list.extend(
            orphans
                .iter()
                .map(|d| ResumeSummary::from_document(d, d.updated_at)),
        );

        if report != IndexRepairReport::default() {
            if let Err(e) = self.write_list(&list) {
                error!("Error writing repaired index: {e}");
                return IndexRepairReport::default();
            }
            info!(
                "Repaired resume index: {} added, {} removed",
                report.added, report.removed
            );
        }
        report
    }

    fn read_document(&self, key: &str) -> Option<ResumeDocument> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                error!("Error loading {key}: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("Ignoring unreadable {key}: {e}");
                None
            }
        }
    }

    fn read_list(&self) -> Vec<ResumeSummary> {
        let raw = match self.store.get(RESUME_LIST_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!("Error loading resume list: {e}");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring unreadable resume list: {e}");
            Vec::new()
        })
    }

    fn write_list(&self, list: &[ResumeSummary]) -> Result<(), StoreError> {
        let body = serde_json::to_string(list)?;
        self.store.set(RESUME_LIST_KEY, &body)
    }
}
