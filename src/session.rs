//! Per-user conversation sessions.
//! One session per chat identity; events for the same session are
//! serialized through its async mutex, sessions never share state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::state_machine::ChatState;

/// Mutable record of one user's conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub state: ChatState,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub word: Option<String>,
    /// Id of the in-flight fetch+rank invocation, if any. A reply is only
    /// applied while this still names the request that produced it.
    pub pending_request: Option<Uuid>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: ChatState::Welcome,
            source_lang: None,
            target_lang: None,
            word: None,
            pending_request: None,
        }
    }

    /// Restart: back to the initial state with all fields cleared.
    pub fn reset(&mut self) {
        *self = Session::new();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

type SharedSession = Arc<tokio::sync::Mutex<Session>>;

/// Map from chat identity to its session. Lookup is cheap and synchronous;
/// callers hold the per-session mutex for the whole event, which gives the
/// strict per-session sequencing while different sessions run in parallel.
pub struct SessionStore {
    sessions: Mutex<HashMap<i64, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Get or create the session for a chat id.
    pub fn session(&self, chat_id: i64) -> SharedSession {
        self.sessions
            .lock()
            .entry(chat_id)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(Session::new())))
            .clone()
    }

    /// Drop a session entirely (chat expired or closed).
    pub fn remove(&self, chat_id: i64) {
        self.sessions.lock().remove(&chat_id);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_session_starts_at_welcome() {
        let store = SessionStore::new();
        let session = store.session(7);
        assert_eq!(session.lock().await.state, ChatState::Welcome);
    }

    #[tokio::test]
    async fn same_chat_id_yields_same_session() {
        let store = SessionStore::new();
        let a = store.session(1);
        let b = store.session(1);
        assert!(Arc::ptr_eq(&a, &b));

        let other = store.session(2);
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[tokio::test]
    async fn remove_discards_state() {
        let store = SessionStore::new();
        {
            let session = store.session(3);
            session.lock().await.word = Some("cane".to_string());
        }
        store.remove(3);
        let fresh = store.session(3);
        assert_eq!(fresh.lock().await.word, None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = Session::new();
        session.state = ChatState::WordEntry;
        session.source_lang = Some("en".to_string());
        session.target_lang = Some("it".to_string());
        session.word = Some("cat".to_string());
        session.pending_request = Some(Uuid::new_v4());

        session.reset();
        assert_eq!(session, Session::new());
    }
}
