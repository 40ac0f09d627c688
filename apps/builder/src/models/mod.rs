pub mod entries;
pub mod mutations;
pub mod resume;

pub use entries::{
    Certification, Education, Entry, Experience, Project, Section, Skill, SkillCategory,
    SkillLevel,
};
pub use mutations::{add_entry, delete_entry, update_entry, with_personal_info, with_template};
pub use resume::{create_empty_resume, PersonalInfo, ResumeDocument, ResumeSummary};
