//! Access layer for the interpretation platform API.
//!
//! The crate is organised leaves first:
//!
//! - [`endpoint`]: picks the base address from the context the client was
//!   reached through
//! - [`auth`]: the single bearer credential and the stores that hold it
//! - [`navigation`]: where the layer sends the user when a session dies
//! - [`api`]: the request pipeline and the typed auth/call/queue clients
//! - [`models`]: request and response bodies
//! - [`config`]: persisted settings and environment overrides

pub mod api;
pub mod auth;
pub mod config;
pub mod endpoint;
pub mod models;
pub mod navigation;

pub use api::{ApiClient, ApiError};
pub use auth::{CredentialStore, FileCredentialStore, KeyringCredentialStore, MemoryCredentialStore};
pub use config::Config;
pub use endpoint::ExecutionContext;
pub use navigation::{NavigationSlot, Navigator, LOGIN_PATH};
