use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Session;

/// In-memory registry of logged-in sessions
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session for a user who has just logged in or registered
    pub async fn start(&self, username: &str) -> Session {
        let session = Session::new(username);
        self.inner
            .write()
            .await
            .insert(session.token, session.clone());
        tracing::info!(username = %username, "Session started");
        session
    }

    pub async fn get(&self, token: &Uuid) -> Option<Session> {
        self.inner.read().await.get(token).cloned()
    }

    /// Ends a session; returns whether it existed
    pub async fn end(&self, token: &Uuid) -> bool {
        let removed = self.inner.write().await.remove(token);
        if let Some(session) = &removed {
            tracing::info!(username = %session.username, "Session ended");
        }
        removed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let sessions = SessionStore::new();
        let session = sessions.start("sample").await;

        let found = sessions.get(&session.token).await.unwrap();
        assert_eq!(found.username, "sample");

        assert!(sessions.end(&session.token).await);
        assert!(sessions.get(&session.token).await.is_none());
        assert!(!sessions.end(&session.token).await);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let sessions = SessionStore::new();
        let first = sessions.start("sample").await;
        let second = sessions.start("sample").await;

        assert_ne!(first.token, second.token);
        sessions.end(&first.token).await;
        assert!(sessions.get(&second.token).await.is_some());
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let sessions = SessionStore::new();
        assert!(sessions.get(&Uuid::new_v4()).await.is_none());
    }
}
