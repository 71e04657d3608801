//! Session store: the single source of truth for the bearer token.
//!
//! A [`Session`] is a cheap handle; clones share the same token, storage and
//! event channel. Independent sessions can coexist in one process.

use notes_types::{AuthToken, TOKEN_KEY};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::storage::Storage;

const EVENT_CAPACITY: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    Anonymous,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut,
    /// The backend rejected the session. The host should navigate to
    /// `redirect_to`.
    Expired { redirect_to: String },
}

#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    token: RwLock<Option<AuthToken>>,
    storage: Option<Arc<dyn Storage>>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// Builds a session backed by `storage`, picking up a previously
    /// persisted token if one exists. An empty stored value counts as absent.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let restored = storage
            .read(TOKEN_KEY)
            .filter(|raw| !raw.is_empty())
            .map(AuthToken);
        Self::build(restored, Some(storage))
    }

    /// A session with no durable storage behind it.
    pub fn detached() -> Self {
        Self::build(None, None)
    }

    fn build(token: Option<AuthToken>, storage: Option<Arc<dyn Storage>>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(SessionInner {
                token: RwLock::new(token),
                storage,
                events,
            }),
        }
    }

    pub fn get_token(&self) -> Option<AuthToken> {
        self.inner.token.read().clone()
    }

    pub fn state(&self) -> SessionState {
        if self.inner.token.read().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    // Every mutation persists and emits while holding the write lock, so
    // stored value, in-memory value and event order follow one writer.

    pub fn set_token(&self, token: impl Into<AuthToken>) {
        let token = token.into();
        let mut current = self.inner.token.write();
        if let Some(storage) = &self.inner.storage {
            if let Err(e) = storage.write(TOKEN_KEY, token.as_str()) {
                warn!("failed to persist session token: {e}");
            }
        }
        *current = Some(token);
        info!("session signed in");
        self.emit(SessionEvent::SignedIn);
    }

    pub fn clear_token(&self) {
        let mut current = self.inner.token.write();
        if self.forget(&mut current) {
            info!("session signed out");
            self.emit(SessionEvent::SignedOut);
        }
    }

    /// Clears the token after the backend rejected it and announces the
    /// expiry, whether or not a token was held.
    pub fn expire(&self, redirect_to: impl Into<String>) {
        let mut current = self.inner.token.write();
        self.forget(&mut current);
        let redirectTo = redirect_to.into();
        info!("session expired, redirecting to {redirectTo}");
        self.emit(SessionEvent::Expired {
            redirect_to: redirectTo,
        });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Drops the token from memory and storage. Returns whether one was held.
    ///
    /// If the storage cannot remove the key, the token is overwritten with an
    /// empty value so a reload still starts anonymous.
    fn forget(&self, current: &mut Option<AuthToken>) -> bool {
        if let Some(storage) = &self.inner.storage {
            if let Err(e) = storage.remove(TOKEN_KEY) {
                warn!("failed to remove persisted session token: {e}");
                if let Err(e) = storage.write(TOKEN_KEY, "") {
                    warn!("failed to blank persisted session token: {e}");
                }
            }
        }
        current.take().is_some()
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }
}
