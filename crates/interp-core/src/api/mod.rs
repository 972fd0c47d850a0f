//! REST API access for the interpretation platform.
//!
//! `ApiClient` resolves the base address once, wraps the HTTP transport in
//! the credential interceptors, and hands out the typed façades:
//!
//! - `AuthApi`: login, logout, current user, account verification
//! - `CallsApi`: active calls, start/end, history
//! - `QueueApi`: waiting list and its metrics
//! - `TranslatorsApi`: translator registration
//!
//! A 401 from any endpoint clears the stored token and asks the navigator
//! to show the login page; the error is still returned to the caller.

pub mod auth;
pub mod calls;
pub mod client;
pub mod error;
pub mod pipeline;
pub mod queue;
pub mod translators;
pub mod transport;

pub use auth::AuthApi;
pub use calls::{CallsApi, DEFAULT_HISTORY_LIMIT};
pub use client::ApiClient;
pub use error::ApiError;
pub use pipeline::{BearerAuth, Pipeline, RequestInterceptor, ResponseInterceptor, UnauthorizedRedirect};
pub use queue::QueueApi;
pub use translators::TranslatorsApi;
pub use transport::{ReqwestTransport, Transport};
