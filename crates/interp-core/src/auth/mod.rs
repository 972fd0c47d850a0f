//! Bearer credential storage.
//!
//! This module provides:
//! - `CredentialStore`: read/write/evict of the single bearer token
//! - `MemoryCredentialStore`: process-local slot, used by tests and short-lived tools
//! - `FileCredentialStore`: token persisted as JSON in the config directory
//! - `KeyringCredentialStore`: token kept in the OS keychain
//!
//! No expiry is tracked here; the service decides whether a token is still
//! valid on every request.

pub mod credentials;
pub mod store;

pub use credentials::KeyringCredentialStore;
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoredToken};
