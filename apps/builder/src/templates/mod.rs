//! Template/theme registry: a static catalog of presentation configs looked up by id.

pub mod config;
pub mod registry;

pub use config::{LayoutKind, TemplateConfig, TemplateKind, Tier};
pub use registry::{get_template, get_theme, TemplateRegistry, DEFAULT_TEMPLATE_ID, DEFAULT_THEME_ID};
