//! Session store: key → per-key async-locked [`Session`].
//!
//! The key map sits behind a `parking_lot::Mutex` that is only held for
//! lookup/insert. Each entry is an `Arc<tokio::sync::Mutex<Session>>`;
//! callers hold that guard across a full turn so two requests for the
//! same key never interleave, while different keys never wait on each
//! other beyond the map access.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use ct_domain::trace::TraceEvent;

use crate::session::{Session, SessionSummary};

/// Exclusive access to one session. Lock it for the duration of a turn.
pub type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Backing store for conversation sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Return the handle for `session_key`, creating an empty session on
    /// first use. Idempotent; never fails.
    fn get_or_create(&self, session_key: &str) -> SessionHandle;

    /// Clear history, counter and terminated flag for `session_key` only.
    /// Creates the session if it does not exist. Waits for any in-flight
    /// turn on the same key.
    async fn reset(&self, session_key: &str);

    /// Summaries of every known session, sorted by key.
    async fn list(&self) -> Vec<SessionSummary>;

    /// Copy of the session state, or `None` if the key was never used.
    async fn snapshot(&self, session_key: &str) -> Option<Session>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// In-memory implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Process-local store. State lives only as long as the process.
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    fn existing(&self, session_key: &str) -> Option<SessionHandle> {
        self.sessions.lock().get(session_key).cloned()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn get_or_create(&self, session_key: &str) -> SessionHandle {
        let (handle, is_new) = {
            let mut sessions = self.sessions.lock();
            match sessions.get(session_key) {
                Some(handle) => (handle.clone(), false),
                None => {
                    let handle = Arc::new(tokio::sync::Mutex::new(Session::new(session_key)));
                    sessions.insert(session_key.to_owned(), handle.clone());
                    (handle, true)
                }
            }
        };

        if is_new {
            TraceEvent::SessionCreated {
                session_key: session_key.to_owned(),
            }
            .emit();
        }
        handle
    }

    async fn reset(&self, session_key: &str) {
        let handle = self.get_or_create(session_key);
        let mut session = handle.lock().await;
        let previous_turn_count = session.turn_count;
        session.clear();
        drop(session);

        TraceEvent::SessionReset {
            session_key: session_key.to_owned(),
            previous_turn_count,
        }
        .emit();
    }

    async fn list(&self) -> Vec<SessionSummary> {
        let handles: Vec<SessionHandle> = self.sessions.lock().values().cloned().collect();
        let mut out = Vec::with_capacity(handles.len());
        for handle in handles {
            out.push(handle.lock().await.summary());
        }
        out.sort_by(|a, b| a.session_key.cmp(&b.session_key));
        out
    }

    async fn snapshot(&self, session_key: &str) -> Option<Session> {
        let handle = self.existing(session_key)?;
        let session = handle.lock().await;
        Some(session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let store = InMemorySessionStore::new();
        let a = store.get_or_create("u1");
        let b = store.get_or_create("u1");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.session_count(), 1);
    }

    #[tokio::test]
    async fn new_session_starts_empty() {
        let store = InMemorySessionStore::new();
        let handle = store.get_or_create("fresh");
        let s = handle.lock().await;
        assert_eq!(s.session_key, "fresh");
        assert_eq!(s.turn_count, 0);
        assert!(s.history.is_empty());
        assert!(!s.terminated);
    }

    #[tokio::test]
    async fn reset_only_touches_its_key() {
        let store = InMemorySessionStore::new();
        {
            let h = store.get_or_create("a");
            let mut s = h.lock().await;
            s.push_user("hi");
            s.terminate();
        }
        {
            let h = store.get_or_create("b");
            h.lock().await.push_user("hello");
        }

        store.reset("a").await;

        let a = store.snapshot("a").await.unwrap();
        assert_eq!(a.turn_count, 0);
        assert!(a.history.is_empty());
        assert!(!a.terminated);

        let b = store.snapshot("b").await.unwrap();
        assert_eq!(b.turn_count, 1);
        assert_eq!(b.history.len(), 1);
    }

    #[tokio::test]
    async fn reset_creates_unknown_key() {
        let store = InMemorySessionStore::new();
        store.reset("never-seen").await;
        assert!(store.snapshot("never-seen").await.is_some());
    }

    #[tokio::test]
    async fn snapshot_does_not_create() {
        let store = InMemorySessionStore::new();
        assert!(store.snapshot("ghost").await.is_none());
        assert_eq!(store.session_count(), 0);
    }

    #[tokio::test]
    async fn list_is_sorted_by_key() {
        let store = InMemorySessionStore::new();
        store.get_or_create("zeta");
        store.get_or_create("alpha");
        store.get_or_create("mid");
        let keys: Vec<_> = store
            .list()
            .await
            .into_iter()
            .map(|s| s.session_key)
            .collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn reset_waits_for_in_flight_turn() {
        let store = Arc::new(InMemorySessionStore::new());
        let handle = store.get_or_create("u1");
        let mut guard = handle.lock().await;
        guard.push_user("in flight");

        let store2 = store.clone();
        let reset = tokio::spawn(async move { store2.reset("u1").await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!reset.is_finished());

        guard.push_assistant("done");
        drop(guard);
        reset.await.unwrap();

        let s = store.snapshot("u1").await.unwrap();
        assert!(s.history.is_empty());
        assert_eq!(s.turn_count, 0);
    }

    #[tokio::test]
    async fn different_keys_do_not_contend() {
        let store = InMemorySessionStore::new();
        let a = store.get_or_create("a");
        let _held = a.lock().await;

        let b = store.get_or_create("b");
        let got = tokio::time::timeout(Duration::from_millis(100), b.lock()).await;
        assert!(got.is_ok());
    }
}
