//! The assembled access layer.

use std::sync::Arc;

use tracing::debug;

use super::pipeline::{BearerAuth, Pipeline, UnauthorizedRedirect};
use super::transport::{ReqwestTransport, Transport};
use super::{ApiError, AuthApi, CallsApi, QueueApi, TranslatorsApi};
use crate::auth::CredentialStore;
use crate::config::Config;
use crate::endpoint::{self, ExecutionContext};
use crate::navigation::{Navigator, LOGIN_PATH};

/// API client for the interpretation platform.
/// Clone is cheap - the pipeline and store are shared.
#[derive(Clone)]
pub struct ApiClient {
    pipeline: Pipeline,
    store: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Client for `base_url` over a default reqwest transport
    pub fn new(
        base_url: &str,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new()?;
        Self::with_transport(base_url, Arc::new(transport), store, navigator)
    }

    /// Client whose address is resolved from where it is running
    pub fn for_context(
        context: &ExecutionContext,
        configured: Option<&str>,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let base_url = endpoint::resolve_base_url(context, configured);
        debug!(?context, base_url = %base_url, "Resolved API endpoint");
        Self::new(&base_url, store, navigator)
    }

    pub fn from_config(
        config: &Config,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        Self::for_context(
            &config.execution_context(),
            config.api_url.as_deref(),
            store,
            navigator,
        )
    }

    /// Standard chain (bearer token out, 401 redirect in) over any transport
    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let pipeline = Pipeline::new(base_url, transport)?
            .with_request_interceptor(Arc::new(BearerAuth::new(store.clone())))
            .with_response_interceptor(Arc::new(UnauthorizedRedirect::new(
                store.clone(),
                navigator,
                LOGIN_PATH,
            )));
        Ok(Self { pipeline, store })
    }

    pub fn base_url(&self) -> &str {
        self.pipeline.base_url()
    }

    /// True when a token is stored. Says nothing about whether the service
    /// still accepts it.
    pub fn has_credential(&self) -> bool {
        self.store.is_present()
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.pipeline, self.store.as_ref())
    }

    pub fn calls(&self) -> CallsApi<'_> {
        CallsApi::new(&self.pipeline)
    }

    pub fn queue(&self) -> QueueApi<'_> {
        QueueApi::new(&self.pipeline)
    }

    pub fn translators(&self) -> TranslatorsApi<'_> {
        TranslatorsApi::new(&self.pipeline)
    }
}
