/*
[INPUT]:  Client and provider handles installed by the session manager
[OUTPUT]: Observable session state with phase-transition broadcasts
[POS]:    Session layer - the one shared object, passed by handle
[UPDATE]: When the lifecycle gains phases or new observers
*/

use std::fmt;
use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use crate::rpc::Provider;
use crate::session::AuthClient;

/// Lifecycle phase of a session.
///
/// `Uninitialized -> Initializing -> Ready -> Connected`, and back to
/// `Ready` on logout. Every transition is published to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Initializing,
    Ready,
    Connected,
}

impl SessionPhase {
    /// Client constructed and usable (`Ready` or `Connected`)
    pub fn is_client_ready(self) -> bool {
        matches!(self, SessionPhase::Ready | SessionPhase::Connected)
    }

    /// Live provider attached
    pub fn is_connected(self) -> bool {
        matches!(self, SessionPhase::Connected)
    }
}

#[derive(Default)]
struct SessionInner {
    client: Option<Arc<dyn AuthClient>>,
    provider: Option<Arc<dyn Provider>>,
}

/// The live pairing of an authenticated client and its provider.
///
/// Cheap to clone; all clones observe the same state. Mutation goes
/// through the session manager (and the binder's one provider-adoption
/// step); everything else only reads.
#[derive(Clone)]
pub struct Session {
    id: Uuid,
    inner: Arc<RwLock<SessionInner>>,
    phase_tx: Arc<watch::Sender<SessionPhase>>,
}

impl Session {
    /// Create an empty, uninitialized session
    pub fn new() -> Self {
        let (phase_tx, _phase_rx) = watch::channel(SessionPhase::Uninitialized);
        Self {
            id: Uuid::new_v4(),
            inner: Arc::new(RwLock::new(SessionInner::default())),
            phase_tx: Arc::new(phase_tx),
        }
    }

    /// Stable identity of this session, recorded in plugin bindings
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        *self.phase_tx.borrow()
    }

    /// Subscribe to phase transitions.
    ///
    /// The receiver starts at the current phase; every later transition
    /// marks it changed exactly once.
    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.phase_tx.subscribe()
    }

    /// The auth client, once initialized
    pub fn client(&self) -> Option<Arc<dyn AuthClient>> {
        self.inner.read().unwrap().client.clone()
    }

    /// The active provider, once connected
    pub fn provider(&self) -> Option<Arc<dyn Provider>> {
        self.inner.read().unwrap().provider.clone()
    }

    fn shift(&self, phase: SessionPhase) {
        let previous = self.phase_tx.send_replace(phase);
        if previous != phase {
            debug!(session = %self.id, from = ?previous, to = ?phase, "session phase transition");
        }
    }

    pub(crate) fn begin_initializing(&self) {
        self.shift(SessionPhase::Initializing);
    }

    pub(crate) fn install_client(&self, client: Arc<dyn AuthClient>) {
        self.inner.write().unwrap().client = Some(client);
        self.shift(SessionPhase::Ready);
    }

    pub(crate) fn install_provider(&self, provider: Arc<dyn Provider>) {
        self.inner.write().unwrap().provider = Some(provider);
        self.shift(SessionPhase::Connected);
    }

    pub(crate) fn clear_provider(&self) {
        self.inner.write().unwrap().provider = None;
        self.shift(SessionPhase::Ready);
    }

    /// Failed initialization leaves nothing behind: no client, no
    /// provider, phase back to `Uninitialized`.
    pub(crate) fn reset_uninitialized(&self) {
        let mut guard = self.inner.write().unwrap();
        guard.client = None;
        guard.provider = None;
        drop(guard);
        self.shift(SessionPhase::Uninitialized);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("phase", &self.phase())
            .finish()
    }
}
