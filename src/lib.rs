//! Rust client for the NoteSpace collaborative notes API.
//!
//! Three collaborating pieces:
//! - [`session::SessionStore`] — owns the bearer token: one in-memory slot
//!   mirrored to one durable file
//! - [`api::ApiClient`] — stateless typed REST calls with normalized
//!   success and error shapes
//! - [`auth::AuthSession`] — derives "who is logged in" from the token,
//!   with deterministic startup and self-healing of stale tokens
//!
//! Nothing in this crate is a global: the application shell constructs the
//! store/client/session triple explicitly and passes it down.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod session;

pub use api::models;
pub use api::ApiClient;
pub use auth::{AuthSession, AuthState};
pub use config::ClientConfig;
pub use error::ApiError;
pub use session::SessionStore;
