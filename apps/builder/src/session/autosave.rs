use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::ResumeDocument;
use crate::repository::ResumeRepository;

/// Debounced persistence of the document being edited.
///
/// Each `schedule` supersedes the previous one: the pending timer is aborted and
/// a new one started, so only the last snapshot in a burst of edits is written.
/// Saves are serialized through `generation`; a timer that lost the race to a
/// newer schedule or an explicit save writes nothing.
pub struct Autosaver {
    repo: Arc<ResumeRepository>,
    delay: Duration,
    runtime: Handle,
    generation: Arc<Mutex<u64>>,
    pending: Option<JoinHandle<()>>,
}

impl Autosaver {
    pub fn new(repo: Arc<ResumeRepository>, delay: Duration, runtime: Handle) -> Self {
        Autosaver {
            repo,
            delay,
            runtime,
            generation: Arc::new(Mutex::new(0)),
            pending: None,
        }
    }

    /// Starts (or restarts) the quiescence timer for `doc`.
    pub fn schedule(&mut self, doc: ResumeDocument) {
        self.abort_timer();
        let ticket = {
            let mut generation = lock(&self.generation);
            *generation += 1;
            *generation
        };

        let repo = self.repo.clone();
        let gate = self.generation.clone();
        let delay = self.delay;
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let generation = lock(&gate);
            if *generation != ticket {
                return;
            }
            debug!("Autosaving resume {}", doc.id);
            persist(&repo, &doc);
        }));
    }

    /// Drops any pending save. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        *lock(&self.generation) += 1;
        self.abort_timer();
        was_pending
    }

    /// Cancels the timer and writes `doc` immediately.
    pub fn save_now(&mut self, doc: &ResumeDocument) -> String {
        self.abort_timer();
        let mut generation = lock(&self.generation);
        *generation += 1;
        persist(&self.repo, doc)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn abort_timer(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        self.abort_timer();
    }
}

fn persist(repo: &ResumeRepository, doc: &ResumeDocument) -> String {
    let id = repo.save(doc);
    repo.set_current_id(&id);
    id
}

fn lock(generation: &Mutex<u64>) -> MutexGuard<'_, u64> {
    generation.lock().unwrap_or_else(PoisonError::into_inner)
}
