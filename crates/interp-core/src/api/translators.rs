use tracing::info;

use super::pipeline::Pipeline;
use super::ApiError;
use crate::models::{Acknowledgment, TranslatorRegistration};

/// Translator onboarding endpoints
pub struct TranslatorsApi<'a> {
    pipeline: &'a Pipeline,
}

impl<'a> TranslatorsApi<'a> {
    pub(crate) fn new(pipeline: &'a Pipeline) -> Self {
        Self { pipeline }
    }

    /// Submit a translator sign-up. The form is checked first and nothing is
    /// sent if the passwords differ or no language is selected. On success
    /// the service emails a verification link to the given address.
    pub async fn register(&self, form: &TranslatorRegistration) -> Result<Acknowledgment, ApiError> {
        let body = form.to_request()?;
        let ack = self.pipeline.post("/translators/register", &body).await?;
        info!(email = %form.email, "Translator registration submitted");
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::ApiClient;
    use crate::auth::MemoryCredentialStore;
    use crate::models::{Language, RegistrationError};
    use crate::navigation::NavigationSlot;

    fn form() -> TranslatorRegistration {
        TranslatorRegistration {
            email: "li@example.com".to_string(),
            name: "Li Wei".to_string(),
            password: "pw-123".to_string(),
            confirm_password: "pw-123".to_string(),
            languages: vec![Language::French, Language::German],
            hourly_rate: "$45/hour".to_string(),
        }
    }

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(
            &server.uri(),
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(NavigationSlot::new()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_register_sends_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translators/register"))
            .and(body_json(json!({
                "email": "li@example.com",
                "name": "Li Wei",
                "password": "pw-123",
                "languages": ["FRENCH", "GERMAN"],
                "hourly_rate": "$45/hour"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "email": "li@example.com"})))
            .expect(1)
            .mount(&server)
            .await;

        let ack = client(&server).translators().register(&form()).await.unwrap();
        assert_eq!(ack.body()["email"], "li@example.com");
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = client(&server);

        let mut mismatch = form();
        mismatch.confirm_password = "other".to_string();
        let err = api.translators().register(&mismatch).await.unwrap_err();
        assert!(matches!(err, ApiError::Registration(RegistrationError::PasswordMismatch)));

        let mut no_langs = form();
        no_langs.languages.clear();
        let err = api.translators().register(&no_langs).await.unwrap_err();
        assert!(matches!(err, ApiError::Registration(RegistrationError::NoLanguages)));

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translators/register"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})))
            .mount(&server)
            .await;

        let err = client(&server).translators().register(&form()).await.unwrap_err();
        assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
        assert_eq!(err.detail(), Some("Email already registered"));
    }
}
