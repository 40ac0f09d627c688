//! Resume authoring core: the resume document model, its local key-value
//! persistence, the active-resume session with debounced autosave, and the
//! template/theme registry.

pub mod config;
pub mod errors;
pub mod models;
pub mod repository;
pub mod session;
pub mod state;
pub mod storage;
pub mod templates;
pub mod validation;

pub use errors::{AppError, StoreError};
pub use models::{create_empty_resume, ResumeDocument, ResumeSummary};
pub use repository::ResumeRepository;
pub use session::Session;
pub use templates::{get_template, TemplateConfig, TemplateRegistry};
