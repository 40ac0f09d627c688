use std::sync::Arc;

use crate::config::Config;
use crate::repository::ResumeRepository;
use crate::session::Session;
use crate::storage::{FileStore, KeyValueStore};
use crate::templates::TemplateRegistry;

/// Long-lived dependencies, built once at startup and handed to the session.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repo: Arc<ResumeRepository>,
    pub registry: Arc<TemplateRegistry>,
}

impl AppState {
    /// Wires the file-backed store described by `config`.
    pub fn from_config(config: Config) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(
            config.store_path.clone(),
            Some(config.store_quota_bytes),
        ));
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        AppState {
            config,
            repo: Arc::new(ResumeRepository::new(store)),
            registry: Arc::new(TemplateRegistry::builtin()),
        }
    }

    pub fn open_session(&self) -> anyhow::Result<Session> {
        Session::open(
            self.repo.clone(),
            self.registry.clone(),
            self.config.session_settings(),
        )
    }
}
