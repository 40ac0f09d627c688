//! Pure sub-record operations over a resume document.
//!
//! Each function consumes a document and returns the changed copy. Nothing here
//! touches storage; the session decides when a change is persisted.

use uuid::Uuid;

use crate::models::entries::Entry;
use crate::models::resume::{PersonalInfo, ResumeDocument};

/// Appends `entry` under a freshly generated id unique within its sequence.
pub fn add_entry<E: Entry>(mut doc: ResumeDocument, mut entry: E) -> ResumeDocument {
    let id = fresh_entry_id(E::sequence(&doc));
    entry.set_id(id);
    E::sequence_mut(&mut doc).push(entry);
    doc
}

/// Replaces the entry whose id matches `entry.id()`, keeping its position.
/// Unknown ids leave the document unchanged.
pub fn update_entry<E: Entry>(mut doc: ResumeDocument, entry: E) -> ResumeDocument {
    if let Some(slot) = E::sequence_mut(&mut doc)
        .iter_mut()
        .find(|existing| existing.id() == entry.id())
    {
        *slot = entry;
    } else {
        tracing::debug!(
            "No {} entry with id '{}'; update ignored",
            E::SECTION.as_str(),
            entry.id()
        );
    }
    doc
}

/// Removes the entry with `id`. Unknown ids leave the document unchanged.
pub fn delete_entry<E: Entry>(mut doc: ResumeDocument, id: &str) -> ResumeDocument {
    E::sequence_mut(&mut doc).retain(|existing| existing.id() != id);
    doc
}

pub fn with_personal_info(mut doc: ResumeDocument, info: PersonalInfo) -> ResumeDocument {
    doc.personal_info = info;
    doc
}

/// Stores the template key verbatim; resolution happens at lookup time.
pub fn with_template(mut doc: ResumeDocument, template_id: &str) -> ResumeDocument {
    doc.template = template_id.to_string();
    doc
}

fn fresh_entry_id<E: Entry>(existing: &[E]) -> String {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !existing.iter().any(|e| e.id() == candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entries::{Experience, Skill, SkillLevel};
    use chrono::Utc;

    fn doc() -> ResumeDocument {
        ResumeDocument::empty_with_id("E1", Utc::now())
    }

    fn acme() -> Experience {
        Experience {
            company: "Acme".into(),
            position: "Engineer".into(),
            start_date: "2020-01-01".into(),
            current: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_add_assigns_generated_id() {
        let d = add_entry(doc(), acme());
        assert_eq!(d.experience.len(), 1);
        assert!(!d.experience[0].id.is_empty());
        assert_eq!(d.experience[0].company, "Acme");
    }

    #[test]
    fn test_add_overrides_caller_supplied_id() {
        let d = add_entry(doc(), acme());
        let clash = Experience {
            id: d.experience[0].id.clone(),
            ..acme()
        };
        let d = add_entry(d, clash);
        assert_eq!(d.experience.len(), 2);
        assert_ne!(d.experience[0].id, d.experience[1].id);
    }

    #[test]
    fn test_many_adds_keep_ids_unique() {
        let mut d = doc();
        for _ in 0..50 {
            d = add_entry(d, Skill::default());
        }
        let mut ids: Vec<_> = d.skills.iter().map(|s| s.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_update_preserves_id_and_changes_only_target_field() {
        let d = add_entry(doc(), acme());
        let original = d.experience[0].clone();
        let edited = Experience {
            position: "Senior Engineer".into(),
            ..original.clone()
        };
        let d = update_entry(d, edited);
        assert_eq!(d.experience.len(), 1);
        assert_eq!(d.experience[0].id, original.id);
        assert_eq!(d.experience[0].position, "Senior Engineer");
        assert_eq!(d.experience[0].company, original.company);
        assert_eq!(d.experience[0].start_date, original.start_date);
        assert!(d.experience[0].current);
    }

    #[test]
    fn test_update_keeps_position_in_sequence() {
        let d = add_entry(add_entry(add_entry(doc(), acme()), acme()), acme());
        let mut middle = d.experience[1].clone();
        middle.company = "Globex".into();
        let d = update_entry(d, middle);
        assert_eq!(d.experience[1].company, "Globex");
        assert_eq!(d.experience[0].company, "Acme");
        assert_eq!(d.experience[2].company, "Acme");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let d = add_entry(doc(), acme());
        let before = d.clone();
        let ghost = Experience {
            id: "ghost".into(),
            ..acme()
        };
        assert_eq!(update_entry(d, ghost), before);
    }

    #[test]
    fn test_delete_removes_matching_entry() {
        let d = add_entry(add_entry(doc(), acme()), acme());
        let gone = d.experience[0].id.clone();
        let d = delete_entry::<Experience>(d, &gone);
        assert_eq!(d.experience.len(), 1);
        assert_ne!(d.experience[0].id, gone);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let d = add_entry(doc(), acme());
        let before = d.clone();
        assert_eq!(delete_entry::<Experience>(d, "missing"), before);
    }

    #[test]
    fn test_sections_are_independent() {
        let d = add_entry(doc(), acme());
        let skill = Skill {
            name: "Rust".into(),
            level: SkillLevel::Expert,
            ..Default::default()
        };
        let d = add_entry(d, skill);
        let exp_id = d.experience[0].id.clone();
        let d = delete_entry::<Skill>(d, &exp_id);
        assert_eq!(d.experience.len(), 1);
        assert_eq!(d.skills.len(), 1);
    }

    #[test]
    fn test_with_template_keeps_unknown_key_verbatim() {
        let d = with_template(doc(), "does-not-exist");
        assert_eq!(d.template, "does-not-exist");
    }
}
