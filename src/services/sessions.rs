//! Bearer-token sessions for the HTTP layer

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::Session;

/// Logged-in sessions keyed by opaque token
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<Uuid, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `session` under a fresh token
    pub fn open(&mut self, session: Session) -> Uuid {
        let token = Uuid::new_v4();
        self.sessions.insert(token, session);
        token
    }

    /// Session for `token`; unknown tokens resolve to a logged-out session
    pub fn resolve(&self, token: &Uuid) -> Session {
        self.sessions.get(token).cloned().unwrap_or_default()
    }

    /// Swap the session behind a live `token`; unknown tokens are left alone
    pub fn replace(&mut self, token: &Uuid, session: Session) -> bool {
        match self.sessions.get_mut(token) {
            Some(slot) => {
                *slot = session;
                true
            }
            None => false,
        }
    }

    /// Forget `token`, returning the session it held
    pub fn close(&mut self, token: &Uuid) -> Option<Session> {
        self.sessions.remove(token)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
