use std::sync::Arc;

use tokio::sync::Mutex;

use sn_core::registration::RegistrationDraft;
use sn_core::wizard::WizardState;

/// Shared wizard context containing control state, draft and dispatch lock.
///
/// This context is shared between `WizardOrchestrator` and the wizard
/// usecases to ensure consistent state access and proper serialization of
/// dispatch calls.
///
/// ## Lock Ordering
/// When acquiring more than one lock, acquire `dispatch_lock` first, then
/// `draft`, then `state`.
/// - `dispatch_lock`: Serializes dispatches. Ensures the entire
///   transition + state_update + execute_actions sequence runs without
///   interleaving writers.
/// - `draft`: The accumulated form content. Read during transitions,
///   written by edits and clearing actions. Field edits take this lock
///   alone, so they land while a dispatch is parked on a port call.
/// - `state`: Used for both reading (`get_state`) and writing (during
///   `dispatch`). NOT acquired by `get_state` via `dispatch_lock`, so
///   reads never wait on in-flight port calls.
#[derive(Clone)]
pub struct WizardContext {
    state: Arc<Mutex<WizardState>>,
    draft: Arc<Mutex<RegistrationDraft>>,
    dispatch_lock: Arc<Mutex<()>>,
}

impl WizardContext {
    /// Creates a new WizardContext with the given initial state and draft.
    pub fn new(initial_state: WizardState, draft: RegistrationDraft) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            draft: Arc::new(Mutex::new(draft)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a WizardContext on the first step with an empty employee
    /// draft.
    pub fn default() -> Self {
        Self::new(WizardState::default(), RegistrationDraft::default())
    }

    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Returns a copy of the current control state.
    ///
    /// This is a lightweight read operation that does NOT acquire
    /// `dispatch_lock`.
    pub async fn get_state(&self) -> WizardState {
        self.state.lock().await.clone()
    }

    /// Acquires the dispatch lock for serializing concurrent dispatch calls.
    ///
    /// Returns a guard that releases the lock when dropped.
    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Updates the control state to the given value.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn set_state(&self, state: WizardState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }

    /// Runs `f` with read access to the draft.
    pub async fn with_draft<R>(&self, f: impl FnOnce(&RegistrationDraft) -> R) -> R {
        let guard = self.draft.lock().await;
        f(&guard)
    }

    /// Runs `f` with write access to the draft.
    pub async fn with_draft_mut<R>(&self, f: impl FnOnce(&mut RegistrationDraft) -> R) -> R {
        let mut guard = self.draft.lock().await;
        f(&mut guard)
    }
}
