use super::pipeline::Pipeline;
use super::ApiError;
use crate::models::{Acknowledgment, CallSession, CustomerInfo, EndCallRequest, Id, StartCallRequest};

/// Number of completed calls fetched when no limit is given
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Call lifecycle endpoints under `/calls`
pub struct CallsApi<'a> {
    pipeline: &'a Pipeline,
}

impl<'a> CallsApi<'a> {
    pub(crate) fn new(pipeline: &'a Pipeline) -> Self {
        Self { pipeline }
    }

    pub async fn active_calls(&self) -> Result<Vec<CallSession>, ApiError> {
        self.pipeline.get("/calls/active").await
    }

    pub async fn start_call(
        &self,
        room_name: &str,
        customer_info: Option<&CustomerInfo>,
    ) -> Result<CallSession, ApiError> {
        let body = StartCallRequest {
            room_name,
            customer_info,
        };
        self.pipeline.post("/calls/start", &body).await
    }

    pub async fn end_call(&self, call_id: &Id) -> Result<Acknowledgment, ApiError> {
        self.pipeline
            .post("/calls/end", &EndCallRequest { call_id })
            .await
    }

    /// Most recent completed calls, [`DEFAULT_HISTORY_LIMIT`] when `limit` is `None`
    pub async fn call_history(&self, limit: Option<u32>) -> Result<Vec<CallSession>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        self.pipeline
            .get(&format!("/calls/history?limit={}", limit))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::ApiClient;
    use crate::auth::MemoryCredentialStore;
    use crate::navigation::NavigationSlot;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(
            &server.uri(),
            Arc::new(MemoryCredentialStore::with_token("tok")),
            Arc::new(NavigationSlot::new()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_active_calls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calls/active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "roomName": "r-1", "status": "active"},
                {"id": 2, "roomName": "r-2", "status": "ringing"}
            ])))
            .mount(&server)
            .await;

        let calls = client(&server).calls().active_calls().await.unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].status.as_deref(), Some("ringing"));
    }

    #[tokio::test]
    async fn test_start_call_with_and_without_customer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calls/start"))
            .and(body_json(json!({"roomName": "r-9"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c-9", "roomName": "r-9"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/calls/start"))
            .and(body_json(json!({"roomName": "r-10", "customerInfo": {"name": "Mei", "language": "FRENCH"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c-10", "roomName": "r-10"})))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server);
        let call = api.calls().start_call("r-9", None).await.unwrap();
        assert_eq!(call.id.as_str(), "c-9");

        let info = CustomerInfo {
            name: Some("Mei".to_string()),
            language: Some("FRENCH".to_string()),
            ..Default::default()
        };
        let call = api.calls().start_call("r-10", Some(&info)).await.unwrap();
        assert_eq!(call.room_name.as_deref(), Some("r-10"));
    }

    #[tokio::test]
    async fn test_end_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calls/end"))
            .and(body_json(json!({"callId": "381"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Call ended"})))
            .mount(&server)
            .await;

        let ack = client(&server).calls().end_call(&Id::from(381)).await.unwrap();
        assert_eq!(ack.message(), Some("Call ended"));
    }

    #[tokio::test]
    async fn test_history_default_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calls/history"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let history = client(&server).calls().call_history(None).await.unwrap();
        assert!(history.is_empty());

        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].url.path(), "/calls/history");
        assert_eq!(received[0].url.query(), Some("limit=50"));
    }

    #[tokio::test]
    async fn test_history_explicit_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calls/history"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "duration_seconds": 61}])))
            .mount(&server)
            .await;

        let history = client(&server).calls().call_history(Some(5)).await.unwrap();
        assert_eq!(history[0].duration_display(), "1m 01s");
    }
}
