//! Cookie-keyed sessions for the WiFi settings gate.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "flowpanel_session";

#[derive(Debug, Clone)]
struct Session {
    authenticated: bool,
}

/// In-memory session table.
///
/// A session is created only when the shared password is entered correctly,
/// so every known id is currently authenticated. Sessions do not survive a
/// restart.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the browser presenting `jar` has passed the password prompt.
    pub async fn is_authenticated(&self, jar: &CookieJar) -> bool {
        let Some(id) = session_id(jar) else {
            return false;
        };
        let sessions = self.sessions.read().await;
        sessions.get(&id).is_some_and(|s| s.authenticated)
    }

    /// Mark the caller's session authenticated, creating it if needed.
    ///
    /// Ids the store never issued are replaced with a fresh one. Returns the
    /// jar with the session cookie to send back.
    pub async fn authenticate(&self, jar: CookieJar) -> CookieJar {
        let id = {
            let mut sessions = self.sessions.write().await;
            let id = session_id(&jar)
                .filter(|id| sessions.contains_key(id))
                .unwrap_or_else(Uuid::new_v4);
            sessions
                .entry(id)
                .and_modify(|s| s.authenticated = true)
                .or_insert(Session { authenticated: true });
            id
        };
        info!("WiFi settings session authenticated: {}", id);

        let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        jar.add(cookie)
    }

    /// Number of known sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}
