//! Active-resume session: which document is being edited, and committing its
//! edits through the repository on a debounce.

pub mod autosave;

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::config::SessionSettings;
use crate::errors::AppError;
use crate::models::{create_empty_resume, with_template, ResumeDocument, ResumeSummary};
use crate::repository::ResumeRepository;
use crate::templates::{TemplateConfig, TemplateRegistry};

pub use autosave::Autosaver;

/// A document with its template resolved: the complete input an exporter needs.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedResume<'a> {
    pub document: &'a ResumeDocument,
    pub template: &'a TemplateConfig,
}

/// A summary annotated with whether it is the resume being edited.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionListing {
    #[serde(flatten)]
    pub summary: ResumeSummary,
    pub is_current: bool,
}

pub struct Session {
    repo: Arc<ResumeRepository>,
    registry: Arc<TemplateRegistry>,
    current_id: Option<String>,
    current: Option<ResumeDocument>,
    autosaver: Autosaver,
}

impl Session {
    /// Reads the persisted current-resume pointer. Must be called inside a
    /// tokio runtime; autosave timers are spawned on it.
    pub fn open(
        repo: Arc<ResumeRepository>,
        registry: Arc<TemplateRegistry>,
        settings: SessionSettings,
    ) -> anyhow::Result<Self> {
        let runtime = Handle::try_current().context("Autosave requires a tokio runtime")?;
        let current_id = repo.current_id();
        info!(
            "Session opened (current resume: {}, autosave after {:?})",
            current_id.as_deref().unwrap_or("none"),
            settings.autosave_delay
        );
        Ok(Session {
            autosaver: Autosaver::new(repo.clone(), settings.autosave_delay, runtime),
            repo,
            registry,
            current_id,
            current: None,
        })
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn current(&self) -> Option<&ResumeDocument> {
        self.current.as_ref()
    }

    /// Whether an edit is waiting on the autosave timer.
    pub fn is_dirty(&self) -> bool {
        self.autosaver.is_pending()
    }

    /// Resolves the document to edit on startup: the pointed-to resume, else
    /// the legacy single-document slot, else a new empty draft. Nothing is
    /// written until the first edit. Once a document is loaded it is returned
    /// as is, pending edits included.
    pub fn bootstrap(&mut self) -> &ResumeDocument {
        let (repo, current_id) = (&self.repo, &mut self.current_id);
        self.current.get_or_insert_with(|| {
            let doc = current_id
                .as_deref()
                .and_then(|id| repo.load(id))
                .or_else(|| {
                    let legacy = repo.load_legacy();
                    if legacy.is_some() {
                        info!("Starting from legacy single-document storage");
                    }
                    legacy
                })
                .unwrap_or_else(create_empty_resume);
            *current_id = Some(doc.id.clone());
            doc
        })
    }

    /// Points the session at `id` and persists the pointer. Pending edits to
    /// the previous document are saved first.
    pub fn set_current_id(&mut self, id: &str) {
        self.flush();
        self.repo.set_current_id(id);
        self.current_id = Some(id.to_string());
        if self.current.as_ref().map(|d| d.id.as_str()) != Some(id) {
            self.current = self.repo.load(id);
        }
    }

    /// Makes a stored resume current. Unknown ids leave the session unchanged.
    /// Switching to the resume already being edited keeps its unsaved edits.
    pub fn switch_to(&mut self, id: &str) -> bool {
        if self.current.as_ref().is_some_and(|doc| doc.id == id) {
            self.repo.set_current_id(id);
            self.current_id = Some(id.to_string());
            return true;
        }
        self.flush();
        let Some(doc) = self.repo.load(id) else {
            warn!("Cannot switch to unknown resume {id}");
            return false;
        };
        self.repo.set_current_id(id);
        self.current_id = Some(doc.id.clone());
        self.current = Some(doc);
        true
    }

    /// Applies `change` to the current document and schedules an autosave.
    ///
    /// The document id and creation stamp are immutable; a change that
    /// rewrites them is corrected before it is kept.
    pub fn edit<F>(&mut self, change: F) -> Result<&ResumeDocument, AppError>
    where
        F: FnOnce(ResumeDocument) -> ResumeDocument,
    {
        let doc = self
            .current
            .take()
            .ok_or_else(|| AppError::NotFound("No active resume".to_string()))?;
        let (id, created_at) = (doc.id.clone(), doc.created_at);

        let mut next = change(doc);
        if next.id != id || next.created_at != created_at {
            warn!("Edit tried to rewrite identity of resume {id}; keeping original");
            next.id = id;
            next.created_at = created_at;
        }
        self.autosaver.schedule(next.clone());
        Ok(&*self.current.insert(next))
    }

    /// Replaces the current document wholesale with an edited copy of itself.
    pub fn replace(&mut self, doc: ResumeDocument) -> Result<&ResumeDocument, AppError> {
        if self.current_id.as_deref() != Some(doc.id.as_str()) {
            return Err(AppError::Validation(format!(
                "Resume {} is not the active resume",
                doc.id
            )));
        }
        self.edit(|_| doc)
    }

    /// Stores `template_id` on the current document. Unknown ids are kept and
    /// resolve to the default template when rendered.
    pub fn apply_template(&mut self, template_id: &str) -> Result<&ResumeDocument, AppError> {
        if !self.registry.contains_template(template_id) {
            warn!("Unknown template '{template_id}'; it will render with the default");
        }
        self.edit(|doc| with_template(doc, template_id))
    }

    /// Creates, saves, and selects an empty resume named `name`.
    pub fn new_resume(&mut self, name: &str) -> String {
        self.flush();
        let mut doc = create_empty_resume();
        doc.personal_info.first_name = name.to_string();
        let id = self.autosaver.save_now(&doc);
        info!("Created resume {id}");
        self.current_id = Some(id.clone());
        self.current = Some(doc);
        id
    }

    /// Duplicates `id` (including unsaved edits when it is current) and
    /// selects the copy.
    pub fn duplicate(&mut self, id: &str) -> Result<String, AppError> {
        self.flush();
        let copy_id = self.repo.duplicate(id)?;
        self.switch_to(&copy_id);
        Ok(copy_id)
    }

    pub fn duplicate_current(&mut self) -> Result<String, AppError> {
        let id = self
            .current_id
            .clone()
            .ok_or_else(|| AppError::NotFound("No active resume".to_string()))?;
        self.duplicate(&id)
    }

    /// Deletes `id`. When it was current, the first remaining resume is
    /// selected, or a fresh unsaved draft when none remain.
    pub fn delete(&mut self, id: &str) {
        let was_current = self.current_id.as_deref() == Some(id);
        if was_current {
            self.autosaver.cancel();
        }
        self.repo.delete(id);
        if !was_current {
            return;
        }

        let next = self
            .repo
            .list()
            .into_iter()
            .find_map(|summary| self.repo.load(&summary.id));
        match next {
            Some(doc) => {
                self.repo.set_current_id(&doc.id);
                self.current_id = Some(doc.id.clone());
                self.current = Some(doc);
            }
            None => {
                self.repo.clear_current_id();
                let doc = create_empty_resume();
                self.current_id = Some(doc.id.clone());
                self.current = Some(doc);
            }
        }
    }

    /// Saves pending edits now. Returns whether anything was written.
    pub fn flush(&mut self) -> bool {
        if !self.autosaver.is_pending() {
            return false;
        }
        match self.current.as_ref() {
            Some(doc) => {
                self.autosaver.save_now(doc);
                true
            }
            None => {
                self.autosaver.cancel();
                false
            }
        }
    }

    /// Summaries in index order, marking the current resume by id.
    pub fn listings(&self) -> Vec<SessionListing> {
        self.repo
            .list()
            .into_iter()
            .map(|summary| SessionListing {
                is_current: self.current_id.as_deref() == Some(summary.id.as_str()),
                summary,
            })
            .collect()
    }

    pub fn resolved(&self) -> Option<ResolvedResume<'_>> {
        self.current.as_ref().map(|document| ResolvedResume {
            document,
            template: self.registry.get_template(Some(document.template.as_str())),
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{add_entry, update_entry, Experience, PersonalInfo};
    use crate::storage::MemoryStore;
    use chrono::Utc;
    use std::time::Duration;

    const DELAY: Duration = Duration::from_millis(2000);

    fn repo() -> Arc<ResumeRepository> {
        Arc::new(ResumeRepository::new(Arc::new(MemoryStore::new())))
    }

    fn open(repo: &Arc<ResumeRepository>) -> Session {
        Session::open(
            repo.clone(),
            Arc::new(TemplateRegistry::builtin()),
            SessionSettings {
                autosave_delay: DELAY,
            },
        )
        .unwrap()
    }

    async fn settle() {
        tokio::time::sleep(DELAY + Duration::from_millis(10)).await;
    }

    fn name(first: &str, last: &str) -> impl FnOnce(ResumeDocument) -> ResumeDocument {
        let (first, last) = (first.to_string(), last.to_string());
        move |mut doc| {
            doc.personal_info.first_name = first;
            doc.personal_info.last_name = last;
            doc
        }
    }

    #[test]
    fn test_open_outside_runtime_fails() {
        let result = Session::open(
            repo(),
            Arc::new(TemplateRegistry::builtin()),
            SessionSettings::default(),
        );
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_run_bootstraps_unsaved_empty_draft() {
        let repo = repo();
        let mut session = open(&repo);
        let doc = session.bootstrap().clone();
        assert_eq!(doc.template, "modern");
        assert_eq!(session.current_id(), Some(doc.id.as_str()));
        assert!(repo.list().is_empty());
        assert!(!session.is_dirty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bootstrap_prefers_pointer_then_legacy() {
        let repo = repo();
        let mut legacy = ResumeDocument::empty_with_id("legacy", Utc::now());
        legacy.personal_info.first_name = "Old".into();
        repo.save_legacy(&legacy);
        {
            let mut session = open(&repo);
            assert_eq!(session.bootstrap().id, "legacy");
        }

        let stored = ResumeDocument::empty_with_id("E1", Utc::now());
        repo.save(&stored);
        repo.set_current_id("E1");
        let mut session = open(&repo);
        assert_eq!(session.current_id(), Some("E1"));
        assert_eq!(session.bootstrap().id, "E1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_autosaves_and_lists_name() {
        let repo = repo();
        let mut session = open(&repo);
        let id = session.bootstrap().id.clone();
        session.edit(name("Ada", "Lovelace")).unwrap();
        assert!(session.is_dirty());
        assert!(repo.list().is_empty());

        settle().await;
        let list = repo.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, id);
        assert_eq!(list[0].name, "Ada Lovelace");
        assert_eq!(list[0].template, "modern");
        assert_eq!(repo.current_id(), Some(id));
        assert!(!session.is_dirty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_persist_only_the_last() {
        let repo = repo();
        let mut session = open(&repo);
        let id = session.bootstrap().id.clone();
        for prefix in ["A", "Ad", "Ada"] {
            session.edit(name(prefix, "")).unwrap();
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        assert!(repo.load(&id).is_none());
        settle().await;
        assert_eq!(repo.load(&id).unwrap().personal_info.first_name, "Ada");
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_cannot_rewrite_identity() {
        let repo = repo();
        let mut session = open(&repo);
        let original = session.bootstrap().clone();
        let doc = session
            .edit(|mut d| {
                d.id = "hijacked".into();
                d
            })
            .unwrap();
        assert_eq!(doc.id, original.id);
        assert_eq!(doc.created_at, original.created_at);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_without_document_is_not_found() {
        let mut session = open(&repo());
        assert!(matches!(
            session.edit(|d| d),
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_experience_edit_keeps_sub_id() {
        let repo = repo();
        let mut session = open(&repo);
        session.bootstrap();
        let exp = Experience {
            company: "Acme".into(),
            position: "Engineer".into(),
            start_date: "2020-01-01".into(),
            current: true,
            ..Default::default()
        };
        let added = session.edit(|d| add_entry(d, exp)).unwrap().experience[0].clone();
        let promoted = Experience {
            position: "Senior Engineer".into(),
            ..added.clone()
        };
        session.edit(|d| update_entry(d, promoted)).unwrap();
        session.flush();

        let stored = repo.load(session.current_id().unwrap()).unwrap();
        assert_eq!(stored.experience.len(), 1);
        assert_eq!(stored.experience[0].id, added.id);
        assert_eq!(stored.experience[0].position, "Senior Engineer");
        assert_eq!(stored.experience[0].company, "Acme");
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_flushes_previous_document() {
        let repo = repo();
        repo.save(&ResumeDocument::empty_with_id("B", Utc::now()));
        let mut session = open(&repo);
        let a = session.bootstrap().id.clone();
        session.edit(name("Ada", "")).unwrap();

        assert!(session.switch_to("B"));
        assert_eq!(session.current_id(), Some("B"));
        assert_eq!(repo.load(&a).unwrap().personal_info.first_name, "Ada");
        assert_eq!(repo.current_id().as_deref(), Some("B"));

        assert!(!session.switch_to("ghost"));
        assert_eq!(session.current_id(), Some("B"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_to_current_keeps_unsaved_edit() {
        let repo = repo();
        let mut session = open(&repo);
        let id = session.new_resume("Ada");
        session.edit(name("Augusta", "")).unwrap();

        assert!(session.switch_to(&id));
        assert_eq!(session.current().unwrap().personal_info.first_name, "Augusta");

        session
            .edit(|mut d| {
                d.personal_info.last_name = "King".into();
                d
            })
            .unwrap();
        session.flush();
        let stored = repo.load(&id).unwrap();
        assert_eq!(stored.personal_info.first_name, "Augusta");
        assert_eq!(stored.personal_info.last_name, "King");
    }

    #[tokio::test(start_paused = true)]
    async fn test_bootstrap_is_idempotent() {
        let repo = repo();
        let mut session = open(&repo);
        let first = session.bootstrap().id.clone();
        assert_eq!(session.bootstrap().id, first);

        session.edit(name("Ada", "")).unwrap();
        let again = session.bootstrap();
        assert_eq!(again.id, first);
        assert_eq!(again.personal_info.first_name, "Ada");
        assert!(session.is_dirty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_current_id_loads_document() {
        let repo = repo();
        repo.save(&ResumeDocument::empty_with_id("B", Utc::now()));
        let mut session = open(&repo);
        session.set_current_id("B");
        assert_eq!(session.current().unwrap().id, "B");
        assert_eq!(repo.current_id().as_deref(), Some("B"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_resume_is_saved_and_selected() {
        let repo = repo();
        let mut session = open(&repo);
        let id = session.new_resume("Grace");
        assert_eq!(session.current_id(), Some(id.as_str()));
        assert_eq!(repo.list()[0].name, "Grace");
        assert_eq!(repo.current_id(), Some(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_current_includes_unsaved_edits() {
        let repo = repo();
        let mut session = open(&repo);
        let original = session.new_resume("Ada");
        session
            .edit(|d| {
                let info = PersonalInfo {
                    last_name: "Lovelace".into(),
                    ..d.personal_info.clone()
                };
                crate::models::with_personal_info(d, info)
            })
            .unwrap();

        let copy = session.duplicate_current().unwrap();
        assert_ne!(copy, original);
        assert_eq!(session.current_id(), Some(copy.as_str()));
        assert_eq!(
            session.current().unwrap().personal_info.first_name,
            "Ada (Copy)"
        );
        let names: Vec<_> = repo.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Ada Lovelace", "Ada (Copy) Lovelace"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_unknown_leaves_session_alone() {
        let repo = repo();
        let mut session = open(&repo);
        let id = session.new_resume("Ada");
        assert!(session.duplicate("ghost").is_err());
        assert_eq!(session.current_id(), Some(id.as_str()));
        assert_eq!(repo.list().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_current_selects_first_remaining() {
        let repo = repo();
        let mut session = open(&repo);
        let first = session.new_resume("First");
        let second = session.new_resume("Second");
        session.edit(name("Edited", "")).unwrap();

        session.delete(&second);
        settle().await;
        assert!(repo.load(&second).is_none());
        assert_eq!(session.current_id(), Some(first.as_str()));
        assert_eq!(repo.list().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_last_starts_fresh_draft() {
        let repo = repo();
        let mut session = open(&repo);
        let only = session.new_resume("Only");
        session.delete(&only);
        assert!(repo.list().is_empty());
        assert!(repo.current_id().is_none());
        let fresh = session.current().unwrap();
        assert_ne!(fresh.id, only);
        assert_eq!(fresh.personal_info.first_name, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_other_keeps_current() {
        let repo = repo();
        let mut session = open(&repo);
        let first = session.new_resume("First");
        let second = session.new_resume("Second");
        session.delete(&first);
        assert_eq!(session.current_id(), Some(second.as_str()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_listings_mark_current_by_id() {
        let repo = repo();
        let mut session = open(&repo);
        session.new_resume("Same");
        let second = session.new_resume("Same");
        let listings = session.listings();
        assert_eq!(listings.len(), 2);
        assert!(!listings[0].is_current);
        assert!(listings[1].is_current);
        assert_eq!(listings[1].summary.id, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_template_resolves_with_fallback() {
        let repo = repo();
        let mut session = open(&repo);
        session.bootstrap();

        session.apply_template("executive").unwrap();
        assert_eq!(session.resolved().unwrap().template.id, "executive");

        session.apply_template("retro").unwrap();
        let resolved = session.resolved().unwrap();
        assert_eq!(resolved.document.template, "retro");
        assert_eq!(resolved.template.id, "modern");
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_rejects_foreign_document() {
        let repo = repo();
        let mut session = open(&repo);
        session.bootstrap();
        let stranger = ResumeDocument::empty_with_id("stranger", Utc::now());
        assert!(matches!(
            session.replace(stranger),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_flushes_pending_edit() {
        let repo = repo();
        let id = {
            let mut session = open(&repo);
            let id = session.bootstrap().id.clone();
            session.edit(name("Ada", "")).unwrap();
            id
        };
        assert_eq!(repo.load(&id).unwrap().personal_info.first_name, "Ada");
    }
}
