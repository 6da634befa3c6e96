// ── Generic resource module ──
//
// One implementation of the list/create/edit/delete lifecycle, instantiated
// for Unit, Room, and Device. Cheaply cloneable (Arc inner); the current
// item list is broadcast through a `watch` channel so renderers always see
// the latest full snapshot -- the list is replaced wholesale after every
// mutation, never patched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::debug;

use voltra_api::ApiClient;

use crate::error::CoreError;
use crate::modal::ModalState;
use crate::notify::NoticeQueue;

/// Per-resource customization consumed by [`ResourceModule`]: collection
/// path, wire mapping, required-field policy, and the row template.
pub trait Resource: Clone + Send + Sync + 'static {
    /// Raw shape on the wire.
    type Wire: Serialize + DeserializeOwned + Send + Sync;
    /// Unsaved form values a `save()` builds a record from.
    type Draft: Clone + Send + Sync;

    /// REST path segment, e.g. `"unidades"`.
    const COLLECTION: &'static str;
    /// Lowercase singular for messages, e.g. `"unit"`.
    const SINGULAR: &'static str;

    fn id(&self) -> u64;
    fn from_wire(wire: Self::Wire) -> Self;
    /// Build the save payload; `id` is present on update, absent on create.
    fn draft_to_wire(draft: &Self::Draft, id: Option<u64>) -> Self::Wire;
    /// Client-side required-field policy. Runs before any network call.
    fn validate(draft: &Self::Draft) -> Result<(), CoreError>;

    fn columns() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

/// What a `save()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
    /// Rejected: another request from this module is still in flight.
    Busy,
}

/// What a `confirm_delete()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Nothing was pending deletion; no network call was made.
    NothingPending,
    /// Rejected: another request from this module is still in flight.
    Busy,
}

#[derive(Debug, Default)]
struct ModuleState {
    editing_id: Option<u64>,
    deleting_id: Option<u64>,
    editor: ModalState,
    confirm: ModalState,
}

struct ModuleInner<R: Resource> {
    client: Arc<ApiClient>,
    state: Mutex<ModuleState>,
    snapshot: watch::Sender<Arc<Vec<R>>>,
    notices: NoticeQueue,
    in_flight: AtomicBool,
    auth_expired: AtomicBool,
}

/// Releases the in-flight flag when the request path unwinds.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ResourceModule<R: Resource> {
    inner: Arc<ModuleInner<R>>,
}

impl<R: Resource> Clone for ResourceModule<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Resource> ResourceModule<R> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            inner: Arc::new(ModuleInner {
                client,
                state: Mutex::new(ModuleState::default()),
                snapshot,
                notices: NoticeQueue::new(),
                in_flight: AtomicBool::new(false),
                auth_expired: AtomicBool::new(false),
            }),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Current item list (cheap `Arc` clone; server order preserved).
    pub fn items(&self) -> Arc<Vec<R>> {
        self.inner.snapshot.borrow().clone()
    }

    /// Subscribe to item-list changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<R>>> {
        self.inner.snapshot.subscribe()
    }

    /// Queued notifications for the UI to drain.
    pub fn notices(&self) -> &NoticeQueue {
        &self.inner.notices
    }

    pub fn editing_id(&self) -> Option<u64> {
        self.state().editing_id
    }

    pub fn deleting_id(&self) -> Option<u64> {
        self.state().deleting_id
    }

    pub fn editor_open(&self) -> bool {
        self.state().editor.is_open()
    }

    pub fn confirm_open(&self) -> bool {
        self.state().confirm.is_open()
    }

    /// A request from this module is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    /// The server rejected the stored credential on some earlier call.
    /// Every caller treats this as "abort and return to the login flow".
    pub fn auth_expired(&self) -> bool {
        self.inner.auth_expired.load(Ordering::Acquire)
    }

    // ── Modal lifecycle ──────────────────────────────────────────────

    /// Open the editor for a new record. Form reset is the renderer's job;
    /// parent-selector preloading is orchestrated by the workspace.
    pub fn open_create(&self) {
        let mut state = self.state();
        state.editing_id = None;
        state.editor.open();
    }

    /// Open the editor for an existing record, returning it for form
    /// population. Silent no-op when the id is not in the current list --
    /// a defensive guard against stale references.
    pub fn open_edit(&self, id: u64) -> Option<R> {
        let record = self
            .inner
            .snapshot
            .borrow()
            .iter()
            .find(|r| r.id() == id)
            .cloned()?;
        let mut state = self.state();
        state.editing_id = Some(id);
        state.editor.open();
        Some(record)
    }

    /// Close the editor, abandoning any pending edit.
    pub fn close_editor(&self) {
        let mut state = self.state();
        state.editor.close();
        state.editing_id = None;
    }

    /// Record the id and ask for confirmation. No network call yet.
    pub fn request_delete(&self, id: u64) {
        let mut state = self.state();
        state.deleting_id = Some(id);
        state.confirm.open();
    }

    /// Cancel a pending deletion.
    pub fn close_confirm(&self) {
        let mut state = self.state();
        state.confirm.close();
        state.deleting_id = None;
    }

    // ── Network operations ───────────────────────────────────────────

    /// Fetch the full list, replacing the snapshot on success. On failure
    /// the previous list stays visible (stale beats blank) and an error
    /// notice is queued.
    pub async fn load(&self) -> Result<(), CoreError> {
        match self.inner.client.list::<R::Wire>(R::COLLECTION).await {
            Ok(wires) => {
                let items: Vec<R> = wires.into_iter().map(R::from_wire).collect();
                debug!(resource = R::SINGULAR, count = items.len(), "loaded");
                self.inner
                    .snapshot
                    .send_modify(|snap| *snap = Arc::new(items));
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.record_failure(&err);
                self.inner
                    .notices
                    .error(format!("failed to load {}s: {err}", R::SINGULAR));
                Err(err)
            }
        }
    }

    /// Validate, then create or update depending on `editing_id`. On
    /// success the editor closes and the list is reloaded -- sequenced
    /// after the mutation's own response. On failure the editor stays open
    /// with the server's message queued.
    pub async fn save(&self, draft: R::Draft) -> Result<SaveOutcome, CoreError> {
        R::validate(&draft)?;

        let Some(_guard) = self.try_begin() else {
            debug!(resource = R::SINGULAR, "save ignored: request in flight");
            return Ok(SaveOutcome::Busy);
        };

        let editing_id = self.state().editing_id;
        let wire = R::draft_to_wire(&draft, editing_id);

        let result = if editing_id.is_some() {
            self.inner.client.update(R::COLLECTION, &wire).await
        } else {
            self.inner.client.create(R::COLLECTION, &wire).await
        };

        match result {
            Ok(_) => {
                {
                    let mut state = self.state();
                    state.editor.close();
                    state.editing_id = None;
                }
                let outcome = if editing_id.is_some() {
                    self.inner
                        .notices
                        .success(format!("{} updated", R::SINGULAR));
                    SaveOutcome::Updated
                } else {
                    self.inner
                        .notices
                        .success(format!("{} created", R::SINGULAR));
                    SaveOutcome::Created
                };
                let _ = self.load().await;
                Ok(outcome)
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.record_failure(&err);
                self.inner
                    .notices
                    .error(format!("failed to save {}: {err}", R::SINGULAR));
                Err(err)
            }
        }
    }

    /// Delete the record recorded by `request_delete`. No-op when nothing
    /// is pending. On failure the confirmation state is left as-is so the
    /// user may retry or cancel.
    pub async fn confirm_delete(&self) -> Result<DeleteOutcome, CoreError> {
        let Some(id) = self.state().deleting_id else {
            return Ok(DeleteOutcome::NothingPending);
        };

        let Some(_guard) = self.try_begin() else {
            debug!(resource = R::SINGULAR, "delete ignored: request in flight");
            return Ok(DeleteOutcome::Busy);
        };

        match self.inner.client.remove(R::COLLECTION, id).await {
            Ok(()) => {
                {
                    let mut state = self.state();
                    state.confirm.close();
                    state.deleting_id = None;
                }
                self.inner
                    .notices
                    .success(format!("{} deleted", R::SINGULAR));
                let _ = self.load().await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.record_failure(&err);
                self.inner
                    .notices
                    .error(format!("failed to delete {}: {err}", R::SINGULAR));
                Err(err)
            }
        }
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn state(&self) -> MutexGuard<'_, ModuleState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn record_failure(&self, err: &CoreError) {
        if err.is_auth_expired() {
            self.inner.auth_expired.store(true, Ordering::Release);
        }
    }

    fn try_begin(&self) -> Option<InFlight<'_>> {
        self.inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(&self.inner.in_flight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Unit;
    use voltra_api::TransportConfig;

    fn offline_module() -> ResourceModule<Unit> {
        let client = ApiClient::new(
            "http://127.0.0.1:9".parse().expect("static url"),
            &TransportConfig::default(),
        )
        .expect("client");
        ResourceModule::new(Arc::new(client))
    }

    #[test]
    fn open_edit_is_a_noop_for_unknown_ids() {
        let module = offline_module();
        assert!(module.open_edit(42).is_none());
        assert!(!module.editor_open());
        assert_eq!(module.editing_id(), None);
    }

    #[test]
    fn open_create_clears_a_previous_edit() {
        let module = offline_module();
        // Simulate the state a previous edit would have left behind.
        {
            let mut state = module.state();
            state.editing_id = Some(7);
        }
        module.open_create();
        assert_eq!(module.editing_id(), None);
        assert!(module.editor_open());
    }

    #[test]
    fn request_delete_then_cancel_round_trip() {
        let module = offline_module();
        module.request_delete(7);
        assert!(module.confirm_open());
        assert_eq!(module.deleting_id(), Some(7));

        module.close_confirm();
        assert!(!module.confirm_open());
        assert_eq!(module.deleting_id(), None);
    }

    #[tokio::test]
    async fn confirm_delete_without_pending_id_is_a_noop() {
        let module = offline_module();
        // The client points at a dead port; a network call would error.
        let outcome = module.confirm_delete().await.expect("no-op");
        assert_eq!(outcome, DeleteOutcome::NothingPending);
    }
}
