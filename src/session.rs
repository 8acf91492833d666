//! Bearer-token session storage.
//!
//! Single source of truth for the session token: an in-memory slot backed
//! by at most one durable file on disk. Every mutation funnels through
//! [`SessionStore::set`], which updates both layers before returning, so
//! the two copies never diverge from the caller's point of view.
//!
//! No expiry is tracked client-side. A stale token is discovered
//! reactively when the server rejects it, and cleared by the auth-session
//! bootstrap path.

use parking_lot::Mutex;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Owns the bearer token for one client process.
pub struct SessionStore {
    /// In-memory copy. `None` means "not loaded yet or cleared".
    token: Mutex<Option<String>>,
    /// Durable location, or `None` for a memory-only store.
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Store backed by a token file at `path`.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            token: Mutex::new(None),
            path: Some(path),
        }
    }

    /// Memory-only store for execution contexts without durable storage.
    pub fn ephemeral() -> Self {
        Self {
            token: Mutex::new(None),
            path: None,
        }
    }

    /// Current token: the in-memory copy when present, otherwise one read
    /// from durable storage, cached for subsequent calls.
    ///
    /// A missing or unreadable token file yields `None`, never an error.
    pub fn get(&self) -> Option<String> {
        let mut slot = self.token.lock();
        if slot.is_some() {
            return slot.clone();
        }
        if let Some(path) = &self.path {
            if let Ok(raw) = fs::read_to_string(path) {
                let stored = raw.trim();
                if !stored.is_empty() {
                    *slot = Some(stored.to_string());
                }
            }
        }
        slot.clone()
    }

    /// Replace (`Some`) or clear (`None`) the token in memory and on disk.
    ///
    /// This is the only mutation path. Persistence failures are logged and
    /// do not affect the in-memory copy; the server re-validates every
    /// request regardless of what survives on disk.
    pub fn set(&self, token: Option<String>) {
        let mut slot = self.token.lock();
        if let Some(path) = &self.path {
            match &token {
                Some(value) => {
                    if let Some(dir) = path.parent() {
                        if let Err(err) = fs::create_dir_all(dir) {
                            tracing::warn!("failed to create session directory: {err}");
                        }
                    }
                    if let Err(err) = fs::write(path, value) {
                        tracing::warn!("failed to persist session token: {err}");
                    }
                }
                None => {
                    if let Err(err) = fs::remove_file(path) {
                        if err.kind() != ErrorKind::NotFound {
                            tracing::warn!("failed to remove session token: {err}");
                        }
                    }
                }
            }
        }
        *slot = token;
    }
}
