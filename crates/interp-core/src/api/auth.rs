use tracing::{info, warn};

use super::pipeline::Pipeline;
use super::ApiError;
use crate::auth::CredentialStore;
use crate::models::{Acknowledgment, LoginRequest, LoginResponse, NewUser, User};

/// Session and account endpoints under `/auth`
pub struct AuthApi<'a> {
    pipeline: &'a Pipeline,
    store: &'a dyn CredentialStore,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(pipeline: &'a Pipeline, store: &'a dyn CredentialStore) -> Self {
        Self { pipeline, store }
    }

    /// Log in and keep the returned token for subsequent requests
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let session: LoginResponse = self
            .pipeline
            .post("/auth/login", &LoginRequest { email, password })
            .await?;

        self.store
            .write(&session.access_token)
            .map_err(ApiError::Credential)?;
        info!(user = %session.user.email, "Login successful");
        Ok(session)
    }

    /// End the session on the service. The local token is dropped even if
    /// the service call fails.
    pub async fn logout(&self) -> Result<Acknowledgment, ApiError> {
        let result = self.pipeline.post_empty("/auth/logout").await;
        if let Err(e) = self.store.evict() {
            warn!(error = %e, "Failed to clear session token");
        }
        info!("Logged out");
        result
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.pipeline.get("/auth/me").await
    }

    /// Create an account. The service emails a verification link.
    pub async fn register(&self, user: &NewUser) -> Result<User, ApiError> {
        self.pipeline.post("/auth/register", user).await
    }

    pub async fn verify_email(&self, token: &str) -> Result<Acknowledgment, ApiError> {
        let mut url = self.pipeline.endpoint("/auth/verify-email")?;
        url.query_pairs_mut().append_pair("token", token);
        self.pipeline
            .send_json::<_, ()>(reqwest::Method::POST, url, None)
            .await
    }

    pub async fn resend_verification(&self, email: &str) -> Result<Acknowledgment, ApiError> {
        let mut url = self.pipeline.endpoint("/auth/resend-verification")?;
        url.query_pairs_mut().append_pair("email", email);
        self.pipeline
            .send_json::<_, ()>(reqwest::Method::POST, url, None)
            .await
    }
}
