//! Per-browser sessions that each own an independent transaction store.
//!
//! A session is identified by a random ID kept in a private (encrypted)
//! cookie. The cookie has no expiry date, so the browser discards it when the
//! browser session ends. Sessions that have not been used for longer than the
//! idle timeout are dropped the next time any request comes in.

use std::{
    collections::HashMap,
    fmt::Display,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, Key, SameSite},
};
use uuid::Uuid;

use crate::{AppState, Error, transaction::Transaction, transaction::TransactionStore};

pub(crate) const COOKIE_SESSION_ID: &str = "session_id";

/// The default duration after which an unused session is dropped.
pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// A random identifier for a browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session ID from a string.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct Session {
    transactions: TransactionStore,
    last_seen: Instant,
}

impl Session {
    fn new(now: Instant) -> Self {
        Self {
            transactions: TransactionStore::new(),
            last_seen: now,
        }
    }
}

/// The registry of active sessions.
///
/// Cloning the registry is cheap and every clone refers to the same sessions.
/// Each session's transactions are only ever visible to that session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Create an empty registry that drops sessions unused for longer than `idle_timeout`.
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, Session>>, Error> {
        self.sessions
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
            .map_err(|_| Error::SessionLockError)
    }

    /// Mark the session `session_id` as used, creating it if it does not
    /// exist, and drop any other sessions that have been idle for too long.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the session lock is poisoned.
    pub fn touch(&self, session_id: SessionId) -> Result<(), Error> {
        self.touch_at(session_id, Instant::now())
    }

    fn touch_at(&self, session_id: SessionId, now: Instant) -> Result<(), Error> {
        let mut sessions = self.lock()?;

        let idle_timeout = self.idle_timeout;
        let count_before = sessions.len();
        sessions.retain(|id, session| {
            *id == session_id || now.saturating_duration_since(session.last_seen) <= idle_timeout
        });
        let dropped = count_before - sessions.len();
        if dropped > 0 {
            tracing::info!("dropped {dropped} idle sessions");
        }

        sessions
            .entry(session_id)
            .or_insert_with(|| {
                tracing::debug!("started session {session_id}");
                Session::new(now)
            })
            .last_seen = now;

        Ok(())
    }

    /// Append `transaction` to the store of `session_id` and return a snapshot
    /// of all the session's transactions including the new one.
    ///
    /// A session that has been dropped in the meantime is started again.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the session lock is poisoned.
    pub fn append(
        &self,
        session_id: SessionId,
        transaction: Transaction,
    ) -> Result<Vec<Transaction>, Error> {
        let mut sessions = self.lock()?;
        let session = sessions
            .entry(session_id)
            .or_insert_with(|| Session::new(Instant::now()));

        session.transactions.append(transaction);

        Ok(session.transactions.all().to_vec())
    }

    /// A copy of the transactions of `session_id` in insertion order.
    ///
    /// Unknown sessions have no transactions.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the session lock is poisoned.
    pub fn snapshot(&self, session_id: SessionId) -> Result<Vec<Transaction>, Error> {
        let sessions = self.lock()?;

        Ok(sessions
            .get(&session_id)
            .map(|session| session.transactions.all().to_vec())
            .unwrap_or_default())
    }

    /// The number of active sessions.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the session lock is poisoned.
    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.lock()?.len())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_IDLE_TIMEOUT)
    }
}

/// The state needed for the session middleware.
#[derive(Clone)]
pub struct SessionState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// Whether the session cookie should only be sent over HTTPS.
    pub secure_cookies: bool,
    /// The transactions of every active session.
    pub sessions: SessionStore,
}

impl FromRef<AppState> for SessionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            secure_cookies: state.secure_cookies,
            sessions: state.sessions.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<SessionState> for Key {
    fn from_ref(state: &SessionState) -> Self {
        state.cookie_key.clone()
    }
}

fn session_cookie(session_id: SessionId, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_SESSION_ID, session_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .build()
}

/// Middleware that makes sure every request belongs to a session.
///
/// The session ID is read from the session cookie, or a new session is
/// started if the cookie is missing or cannot be read. The ID is placed into
/// the request so that route handlers can use the function argument
/// `Extension(session_id): Extension<SessionId>` to receive it.
///
/// **Note**: The state must contain an `axum_extra::extract::cookie::Key` for
/// encrypting and decrypting the cookie contents.
pub async fn session_guard(
    State(state): State<SessionState>,
    jar: PrivateCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let existing_session = jar
        .get(COOKIE_SESSION_ID)
        .and_then(|cookie| SessionId::parse(cookie.value()).ok());

    let (jar, session_id) = match existing_session {
        Some(session_id) => (jar, session_id),
        None => {
            let session_id = SessionId::new();
            let jar = jar.add(session_cookie(session_id, state.secure_cookies));
            (jar, session_id)
        }
    };

    if let Err(error) = state.sessions.touch(session_id) {
        return error.into_response();
    }

    request.extensions_mut().insert(session_id);
    let response = next.run(request).await;

    (jar, response).into_response()
}


#[cfg(test)]
mod session_guard_tests {
    use axum::{Extension, Router, middleware, routing::get};
    use axum_extra::extract::cookie::{Cookie, Key, SameSite};
    use axum_test::TestServer;
    use sha2::Digest;

    use super::{COOKIE_SESSION_ID, SessionId, SessionState, SessionStore, session_guard};

    async fn echo_session_id(Extension(session_id): Extension<SessionId>) -> String {
        session_id.to_string()
    }

    fn get_test_server(sessions: SessionStore) -> TestServer {
        let hash = sha2::Sha512::digest("nafstenoas");
        let state = SessionState {
            cookie_key: Key::from(&hash),
            secure_cookies: false,
            sessions,
        };

        let app = Router::new()
            .route("/session", get(echo_session_id))
            .route_layer(middleware::from_fn_with_state(state.clone(), session_guard))
            .with_state(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn starts_session_and_sets_cookie() {
        let sessions = SessionStore::default();
        let server = get_test_server(sessions.clone());

        let response = server.get("/session").await;

        response.assert_status_ok();
        let cookie = response.cookie(COOKIE_SESSION_ID);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert!(
            cookie.expires().is_none(),
            "session cookie should end with the browser session"
        );
        assert_eq!(sessions.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn reuses_session_from_cookie() {
        let sessions = SessionStore::default();
        let server = get_test_server(sessions.clone());
        let first = server.get("/session").await;
        let cookie = first.cookie(COOKIE_SESSION_ID);

        let second = server.get("/session").add_cookie(cookie).await;

        assert_eq!(first.text(), second.text());
        assert_eq!(sessions.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn different_clients_get_different_sessions() {
        let sessions = SessionStore::default();
        let server = get_test_server(sessions.clone());

        let first = server.get("/session").await;
        let second = server.get("/session").await;

        assert_ne!(first.text(), second.text());
        assert_eq!(sessions.len().unwrap(), 2);
    }

    #[tokio::test]
    async fn tampered_cookie_starts_new_session() {
        let sessions = SessionStore::default();
        let server = get_test_server(sessions.clone());
        let forged_id = SessionId::new();

        let response = server
            .get("/session")
            .add_cookie(Cookie::new(COOKIE_SESSION_ID, forged_id.to_string()))
            .await;

        response.assert_status_ok();
        assert_ne!(response.text(), forged_id.to_string());
    }
}
