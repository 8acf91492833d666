//! Typed HTTP client for the NoteSpace REST API.
//!
//! Every operation except login funnels through one request primitive:
//! build headers (JSON content type, plus `Authorization: Bearer <token>`
//! when the session holds one), issue the call, classify the status.
//! - 2xx with a body decodes as the declared JSON type
//! - 204 resolves empty; the body is never parsed
//! - anything else becomes a single [`ApiError`] whose message is the
//!   server's `detail` field when the body decodes, otherwise a fixed
//!   generic fallback
//!
//! Login is the one exception: the backend expects form-encoded
//! credentials, and a successful login persists the token into the
//! [`SessionStore`] before resolving, so the caller can immediately issue
//! an authenticated follow-up request.
//!
//! No method retries, spawns background work, or touches any state other
//! than the session token slot (login/logout only).

pub mod models;

use crate::config::ClientConfig;
use crate::error::{self, ApiError};
use crate::session::SessionStore;
use models::{
    ActivityLog, Collaborator, Note, NoteCreate, NoteUpdate, Registered, ShareRequest, Token, User,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Placeholder for requests without a body.
const NO_BODY: Option<&()> = None;

/// Stateless request executor over a configured base URL and a shared
/// [`SessionStore`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Build a client from a config and a session store.
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            session,
        })
    }

    /// The session store this client reads its token from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request primitive: headers, one HTTP call, status classification.
    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut req = self
            .http
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.get() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = error::error_message(resp, error::GENERIC_FAILURE).await;
            return Err(ApiError::Status { status, message });
        }
        Ok(resp)
    }

    /// Request whose success body decodes as `T`.
    async fn fetch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let resp = self.request(method, path, body).await?;
        resp.json().await.map_err(ApiError::Decode)
    }

    /// Request whose success response carries no body (204).
    async fn fetch_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.request(method, path, NO_BODY).await.map(drop)
    }

    // ── Auth ─────────────────────────────────────────────────

    /// Create an account. Does not authenticate; the backend expects a
    /// follow-up login with the same credentials.
    pub async fn register(&self, email: &str, password: &str) -> Result<Registered, ApiError> {
        let body = json!({ "email": email, "password": password });
        self.fetch(Method::POST, "/auth/register", Some(&body)).await
    }

    /// Log in with form-encoded credentials.
    ///
    /// On success the access token is written to the session store before
    /// this resolves; callers rely on that ordering to immediately fetch
    /// the current user.
    pub async fn login(&self, username: &str, password: &str) -> Result<Token, ApiError> {
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = error::error_message(resp, error::LOGIN_FAILURE).await;
            return Err(ApiError::Status { status, message });
        }

        let token: Token = resp.json().await.map_err(ApiError::Decode)?;
        self.session.set(Some(token.access_token.clone()));
        Ok(token)
    }

    /// Drop the local session token. Purely local; no network call.
    pub fn logout(&self) {
        self.session.set(None);
    }

    /// Identity behind the current token.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.fetch(Method::GET, "/users/me", NO_BODY).await
    }

    /// All registered users, for populating a share-target picker.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.fetch(Method::GET, "/users/", NO_BODY).await
    }

    /// The current user's own activity trail.
    pub async fn my_activity(&self) -> Result<Vec<ActivityLog>, ApiError> {
        self.fetch(Method::GET, "/users/me/activity", NO_BODY).await
    }

    // ── Notes ────────────────────────────────────────────────

    /// Owned notes, optionally filtered by a full-text query.
    pub async fn list_notes(&self, query: Option<&str>) -> Result<Vec<Note>, ApiError> {
        let path = match query {
            Some(q) => format!("/notes/?q={}", urlencoding::encode(q)),
            None => "/notes/".to_string(),
        };
        self.fetch(Method::GET, &path, NO_BODY).await
    }

    /// Owned and shared notes matching a full-text query.
    pub async fn search_notes(&self, query: &str) -> Result<Vec<Note>, ApiError> {
        let path = format!("/notes/search?q={}", urlencoding::encode(query));
        self.fetch(Method::GET, &path, NO_BODY).await
    }

    /// Notes other users have shared with the current user.
    pub async fn shared_notes(&self) -> Result<Vec<Note>, ApiError> {
        self.fetch(Method::GET, "/notes/shared", NO_BODY).await
    }

    pub async fn get_note(&self, id: i64) -> Result<Note, ApiError> {
        self.fetch(Method::GET, &format!("/notes/{id}"), NO_BODY)
            .await
    }

    pub async fn create_note(&self, note: &NoteCreate) -> Result<Note, ApiError> {
        self.fetch(Method::POST, "/notes/", Some(note)).await
    }

    /// Partial update; unset fields are left untouched server-side.
    pub async fn update_note(&self, id: i64, update: &NoteUpdate) -> Result<Note, ApiError> {
        self.fetch(Method::PUT, &format!("/notes/{id}"), Some(update))
            .await
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), ApiError> {
        self.fetch_empty(Method::DELETE, &format!("/notes/{id}"))
            .await
    }

    // ── Collaboration ────────────────────────────────────────

    /// Grant another user access to a note, addressed by email.
    pub async fn share_note(
        &self,
        note_id: i64,
        share: &ShareRequest,
    ) -> Result<Collaborator, ApiError> {
        self.fetch(Method::POST, &format!("/notes/{note_id}/share"), Some(share))
            .await
    }

    pub async fn remove_collaborator(
        &self,
        note_id: i64,
        collaborator_id: i64,
    ) -> Result<(), ApiError> {
        self.fetch_empty(
            Method::DELETE,
            &format!("/notes/{note_id}/collaborators/{collaborator_id}"),
        )
        .await
    }

    pub async fn list_collaborators(&self, note_id: i64) -> Result<Vec<Collaborator>, ApiError> {
        self.fetch(
            Method::GET,
            &format!("/notes/{note_id}/collaborators"),
            NO_BODY,
        )
        .await
    }

    // ── Version history ──────────────────────────────────────

    pub async fn list_versions(&self, note_id: i64) -> Result<Vec<Note>, ApiError> {
        self.fetch(Method::GET, &format!("/notes/{note_id}/versions"), NO_BODY)
            .await
    }

    pub async fn get_version(&self, note_id: i64, version: i64) -> Result<Note, ApiError> {
        self.fetch(
            Method::GET,
            &format!("/notes/{note_id}/versions/{version}"),
            NO_BODY,
        )
        .await
    }

    /// Roll a note back to an earlier version. The server re-snapshots and
    /// returns the restored note.
    pub async fn restore_version(&self, note_id: i64, version: i64) -> Result<Note, ApiError> {
        self.fetch(
            Method::POST,
            &format!("/notes/{note_id}/restore/{version}"),
            NO_BODY,
        )
        .await
    }

    // ── Activity ─────────────────────────────────────────────

    pub async fn note_activity(&self, note_id: i64) -> Result<Vec<ActivityLog>, ApiError> {
        self.fetch(Method::GET, &format!("/notes/{note_id}/activity"), NO_BODY)
            .await
    }

    // ── Best-effort reads ────────────────────────────────────
    //
    // Three reads where failure is an expected outcome (e.g. the caller is
    // not the note's owner). They degrade to an empty list instead of
    // surfacing an error.

    pub async fn shared_notes_or_empty(&self) -> Vec<Note> {
        self.shared_notes().await.unwrap_or_else(|err| {
            tracing::debug!("shared notes unavailable: {err}");
            Vec::new()
        })
    }

    pub async fn list_users_or_empty(&self) -> Vec<User> {
        self.list_users().await.unwrap_or_else(|err| {
            tracing::debug!("user list unavailable: {err}");
            Vec::new()
        })
    }

    pub async fn collaborators_or_empty(&self, note_id: i64) -> Vec<Collaborator> {
        self.list_collaborators(note_id).await.unwrap_or_else(|err| {
            tracing::debug!("collaborator list unavailable: {err}");
            Vec::new()
        })
    }
}
