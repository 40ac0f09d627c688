use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::entries::{Certification, Education, Experience, Project, Skill};
use crate::templates::DEFAULT_TEMPLATE_ID;

/// Name shown for a resume whose owner has not entered a name yet.
pub const UNTITLED_RESUME: &str = "Untitled Resume";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    pub summary: String,
}

impl PersonalInfo {
    /// `first last`, trimmed, or the untitled placeholder when both are blank.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            UNTITLED_RESUME.to_string()
        } else {
            name.to_string()
        }
    }
}

/// The full, canonical record for one resume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub id: String,
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default = "default_template")]
    pub template: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE_ID.to_string()
}

impl ResumeDocument {
    /// An empty draft with the given id, stamped at `now`.
    pub fn empty_with_id(id: impl Into<String>, now: DateTime<Utc>) -> Self {
        ResumeDocument {
            id: id.into(),
            personal_info: PersonalInfo::default(),
            experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            template: default_template(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn display_name(&self) -> String {
        self.personal_info.display_name()
    }

    /// Total number of sub-records across every section.
    pub fn entry_count(&self) -> usize {
        self.experience.len()
            + self.education.len()
            + self.skills.len()
            + self.projects.len()
            + self.certifications.len()
    }
}

/// Returns a new empty draft with a fresh id and the default template.
pub fn create_empty_resume() -> ResumeDocument {
    ResumeDocument::empty_with_id(Uuid::new_v4().to_string(), Utc::now())
}

/// Denormalized projection of a document used for list views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: String,
    pub name: String,
    pub template: String,
    pub last_modified: DateTime<Utc>,
}

impl ResumeSummary {
    pub fn from_document(doc: &ResumeDocument, last_modified: DateTime<Utc>) -> Self {
        ResumeSummary {
            id: doc.id.clone(),
            name: doc.display_name(),
            template: doc.template.clone(),
            last_modified,
        }
    }
}
