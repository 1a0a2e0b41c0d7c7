use anyhow::Result;
use reqwest::Client;
use shared::domain::{Seminar, SeminarDraft, SeminarId};
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Local mirror of the remote seminar collection.
///
/// The remote system is the source of truth; this store only caches it. Each
/// operation performs its network round trip first and touches local state
/// only after the response settles, so no operation partially mutates state
/// and concurrent calls for the same id resolve to whichever response
/// arrives last. Operation failures never surface as return values:
/// callers observe the snapshot's `error` field and the event stream.
pub struct SeminarStore {
    http: Client,
    base_url: String,
    inner: Mutex<StoreState>,
    events: broadcast::Sender<StoreEvent>,
}

#[derive(Default)]
struct StoreState {
    seminars: Vec<Seminar>,
    loading: bool,
    error: Option<String>,
}

/// Point-in-time copy of the store state for a renderer to draw from.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub seminars: Vec<Seminar>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Emitted after an operation settles, so a renderer can re-draw and surface
/// notifications without polling the snapshot.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    CollectionLoaded { count: usize },
    SeminarUpdated { id: SeminarId },
    SeminarRemoved { id: SeminarId },
    Error(String),
}

impl SeminarStore {
    /// Creates a store mirroring the collection served at `base_url`
    /// (e.g. `http://localhost:3000`). Stores are independent; construct as
    /// many as needed.
    pub fn new(base_url: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            inner: Mutex::new(StoreState::default()),
            events,
        }
    }

    /// Fetches the full collection and replaces the local mirror wholesale.
    /// On failure the mirror is left untouched and the failure is recorded.
    /// Safe to call again at any time to refresh.
    pub async fn load(&self) {
        {
            let mut state = self.inner.lock().await;
            state.loading = true;
        }

        let outcome = self.fetch_collection().await;

        let mut state = self.inner.lock().await;
        state.loading = false;
        match outcome {
            Ok(seminars) => {
                info!(count = seminars.len(), "seminar collection loaded");
                state.seminars = seminars;
                state.error = None;
                let count = state.seminars.len();
                drop(state);
                let _ = self.events.send(StoreEvent::CollectionLoaded { count });
            }
            Err(err) => {
                let message = format!("failed to load seminars: {err}");
                warn!("{message}");
                state.error = Some(message.clone());
                drop(state);
                let _ = self.events.send(StoreEvent::Error(message));
            }
        }
    }

    /// Submits a full replacement for the seminar with `id` and, once the
    /// remote accepts it, replaces the local record field-for-field with the
    /// submitted values. A draft with a blank field is rejected before any
    /// request is sent.
    pub async fn update(&self, id: SeminarId, draft: SeminarDraft) {
        let draft = match draft.validated() {
            Ok(draft) => draft,
            Err(err) => {
                self.record_failure(format!("cannot update seminar {}: {err}", id.0))
                    .await;
                return;
            }
        };

        let record = draft.into_seminar(id);
        match self.put_seminar(&record).await {
            Ok(()) => {
                let mut state = self.inner.lock().await;
                state.error = None;
                let slot = state.seminars.iter_mut().find(|seminar| seminar.id == id);
                match slot {
                    Some(slot) => {
                        *slot = record;
                        drop(state);
                        info!(id = id.0, "seminar updated");
                        let _ = self.events.send(StoreEvent::SeminarUpdated { id });
                    }
                    None => {
                        // Remote accepted an id we no longer mirror; nothing
                        // to splice in. The next load will reconcile.
                        warn!(id = id.0, "update accepted for seminar not held locally");
                    }
                }
            }
            Err(err) => {
                self.record_failure(format!("failed to update seminar {}: {err}", id.0))
                    .await;
            }
        }
    }

    /// Deletes the seminar with `id` remotely, then drops it from the local
    /// mirror preserving the order of the remaining records. Callers must
    /// have obtained user confirmation already; the store never prompts.
    pub async fn remove(&self, id: SeminarId) {
        match self.delete_seminar(id).await {
            Ok(()) => {
                let mut state = self.inner.lock().await;
                state.error = None;
                let before = state.seminars.len();
                state.seminars.retain(|seminar| seminar.id != id);
                let removed = state.seminars.len() < before;
                drop(state);
                if removed {
                    info!(id = id.0, "seminar removed");
                    let _ = self.events.send(StoreEvent::SeminarRemoved { id });
                } else {
                    warn!(id = id.0, "delete accepted for seminar not held locally");
                }
            }
            Err(err) => {
                self.record_failure(format!("failed to delete seminar {}: {err}", id.0))
                    .await;
            }
        }
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.inner.lock().await;
        StoreSnapshot {
            seminars: state.seminars.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    pub async fn seminars(&self) -> Vec<Seminar> {
        self.inner.lock().await.seminars.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.lock().await.loading
    }

    pub async fn last_error(&self) -> Option<String> {
        self.inner.lock().await.error.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    async fn fetch_collection(&self) -> Result<Vec<Seminar>> {
        let seminars = self
            .http
            .get(format!("{}/seminars", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(seminars)
    }

    async fn put_seminar(&self, record: &Seminar) -> Result<()> {
        self.http
            .put(format!("{}/seminars/{}", self.base_url, record.id.0))
            .json(record)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_seminar(&self, id: SeminarId) -> Result<()> {
        self.http
            .delete(format!("{}/seminars/{}", self.base_url, id.0))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn record_failure(&self, message: String) {
        warn!("{message}");
        let mut state = self.inner.lock().await;
        state.error = Some(message.clone());
        drop(state);
        let _ = self.events.send(StoreEvent::Error(message));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
