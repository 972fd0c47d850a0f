//! Request pipeline: a transport wrapped by outgoing and incoming
//! interceptors.
//!
//! Every request runs the outgoing interceptors in order, goes through the
//! transport once, then every response (success or failure status) runs the
//! incoming interceptors in order before the status is turned into a result.
//! Transport failures never reach the incoming interceptors.

use std::sync::Arc;

use reqwest::header::{self, HeaderValue};
use reqwest::{Method, Request, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::transport::Transport;
use super::ApiError;
use crate::auth::CredentialStore;
use crate::navigation::Navigator;

/// Runs on each request before it is sent
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: &mut Request);
}

/// Runs on each received response before its status is inspected
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, status: StatusCode);
}

/// Attaches `Authorization: Bearer <token>` when a credential is stored.
pub struct BearerAuth {
    store: Arc<dyn CredentialStore>,
}

impl BearerAuth {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

impl RequestInterceptor for BearerAuth {
    fn on_request(&self, request: &mut Request) {
        let Some(token) = self.store.read() else {
            return;
        };
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(header::AUTHORIZATION, value);
            }
            Err(_) => warn!("Stored token is not a valid header value, sending without it"),
        }
    }
}

/// On 401: drop the stored credential and send the user to the login page.
/// Any other status passes through untouched.
pub struct UnauthorizedRedirect {
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    target: String,
}

impl UnauthorizedRedirect {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            store,
            navigator,
            target: target.into(),
        }
    }
}

impl ResponseInterceptor for UnauthorizedRedirect {
    fn on_response(&self, status: StatusCode) {
        if status != StatusCode::UNAUTHORIZED {
            return;
        }
        warn!(target_path = %self.target, "Session rejected, clearing credential");
        if let Err(e) = self.store.evict() {
            warn!(error = %e, "Failed to evict credential");
        }
        self.navigator.navigate(&self.target);
    }
}

/// Interceptor chain over a transport, bound to one base address.
/// Clone is cheap - everything inside is shared.
#[derive(Clone)]
pub struct Pipeline {
    base_url: String,
    transport: Arc<dyn Transport>,
    outgoing: Vec<Arc<dyn RequestInterceptor>>,
    incoming: Vec<Arc<dyn ResponseInterceptor>>,
}

impl Pipeline {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("Invalid base URL {:?}: {}", base_url, e)))?;
        Ok(Self {
            base_url,
            transport,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        })
    }

    pub fn with_request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.outgoing.push(interceptor);
        self
    }

    pub fn with_response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.incoming.push(interceptor);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` (which may carry a query string)
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        Url::parse(&url).map_err(|e| ApiError::Config(format!("Invalid URL {:?}: {}", url, e)))
    }

    /// Send one request through the chain. Non-2xx statuses become errors
    /// after the incoming interceptors have seen them.
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Response, ApiError> {
        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }

        for interceptor in &self.outgoing {
            interceptor.on_request(&mut request);
        }

        debug!(method = %request.method(), url = %request.url(), "Sending request");
        let response = self.transport.send(request).await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Received response");

        for interceptor in &self.incoming {
            interceptor.on_response(status);
        }

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Send with an optional JSON body and decode the JSON response.
    pub async fn send_json<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to serialize body: {}", e)))?;
        let response = self.execute(method, url, body).await?;
        Self::decode(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        self.send_json::<T, ()>(Method::GET, url, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        self.send_json(Method::POST, url, Some(body)).await
    }

    /// POST without a body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        self.send_json::<T, ()>(Method::POST, url, None).await
    }

    /// Decode a JSON body; an empty body decodes as `null`.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let path = response.url().path().to_string();
        let bytes = response.bytes().await?;
        let parsed = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_slice(&bytes)
        };
        parsed.map_err(|e| ApiError::InvalidResponse(format!("{}: {}", path, e)))
    }
}
