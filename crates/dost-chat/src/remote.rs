//! Delegation to the remote answering service.
//!
//! One POST per call, no retry. Every failure is turned into a localized
//! string for the caller; the structured [`RemoteError`] travels alongside in
//! [`RemoteResolution`] for logs and tests.

use std::sync::Arc;

use async_trait::async_trait;
use dost_core::Language;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::RemoteError;
use crate::types::{ChatReply, ChatRequest};

/// Raw HTTP outcome: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a chat request somewhere and returns the raw response.
///
/// Only transport failures are errors here; status and body are interpreted
/// by [`RemoteResolver`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<TransportResponse, RemoteError>;
}

// =============================================================================
// HttpTransport
// =============================================================================

/// JSON-over-HTTP transport backed by `reqwest`.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<TransportResponse, RemoteError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Unavailable(format!("reading response body: {}", e)))?;
        Ok(TransportResponse { status, body })
    }
}

// =============================================================================
// RemoteResolver
// =============================================================================

/// Text to show plus the failure behind it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResolution {
    pub text: String,
    pub error: Option<RemoteError>,
}

/// Asks the remote service and degrades every failure to a localized string.
#[derive(Clone)]
pub struct RemoteResolver {
    transport: Arc<dyn ChatTransport>,
}

impl RemoteResolver {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    /// Resolver POSTing to `endpoint` over HTTP.
    pub fn http(endpoint: impl Into<String>) -> Self {
        Self::new(Arc::new(HttpTransport::new(endpoint)))
    }

    /// Ask once and return the answer or the structured failure.
    pub async fn ask(&self, utterance: &str, language: Language) -> Result<String, RemoteError> {
        let request = ChatRequest::new(utterance, language);
        let response = self.transport.send(&request).await?;

        if !response.is_success() {
            return Err(RemoteError::Rejected(response.status));
        }

        extract_answer(&response.body).ok_or(RemoteError::Malformed)
    }

    /// Ask once; failures become the localized substitute text.
    pub async fn resolve_detailed(&self, utterance: &str, language: Language) -> RemoteResolution {
        match self.ask(utterance, language).await {
            Ok(text) => {
                debug!(%language, "Remote answer received");
                RemoteResolution { text, error: None }
            }
            Err(err) => {
                warn!(error = %err, %language, "Remote answer unavailable, substituting message");
                RemoteResolution {
                    text: err.message().text(language).to_string(),
                    error: Some(err),
                }
            }
        }
    }

    /// Ask once and always return display text.
    pub async fn resolve(&self, utterance: &str, language: Language) -> String {
        self.resolve_detailed(utterance, language).await.text
    }
}

/// The non-blank `answer` of a [`ChatReply`] body, if present.
fn extract_answer(body: &str) -> Option<String> {
    let reply: ChatReply = serde_json::from_str(body).ok()?;
    if reply.answer.trim().is_empty() {
        return None;
    }
    Some(reply.answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Message;
    use std::sync::Mutex;

    /// Transport returning a canned outcome and recording requests.
    struct StubTransport {
        outcome: Result<TransportResponse, RemoteError>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl StubTransport {
        fn new(outcome: Result<TransportResponse, RemoteError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn respond(status: u16, body: &str) -> Arc<Self> {
            Self::new(Ok(TransportResponse {
                status,
                body: body.to_string(),
            }))
        }
    }

    #[async_trait]
    impl ChatTransport for StubTransport {
        async fn send(&self, request: &ChatRequest) -> Result<TransportResponse, RemoteError> {
            self.seen.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn test_relays_answer() {
        let stub = StubTransport::respond(200, r#"{"answer":"DBT means Direct Benefit Transfer."}"#);
        let resolver = RemoteResolver::new(stub.clone());
        let res = resolver.resolve_detailed("what is dbt", Language::English).await;
        assert_eq!(res.text, "DBT means Direct Benefit Transfer.");
        assert!(res.error.is_none());

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], ChatRequest::new("what is dbt", Language::English));
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        for lang in Language::ALL {
            let stub = StubTransport::new(Err(RemoteError::Unavailable("refused".into())));
            let res = RemoteResolver::new(stub).resolve_detailed("dbt", lang).await;
            assert_eq!(res.text, Message::NetworkError.text(lang));
            assert!(matches!(res.error, Some(RemoteError::Unavailable(_))));
        }
    }

    #[tokio::test]
    async fn test_error_status_is_server_error() {
        for lang in Language::ALL {
            let stub = StubTransport::respond(500, r#"{"answer":"ignored"}"#);
            let res = RemoteResolver::new(stub).resolve_detailed("dbt", lang).await;
            assert_eq!(res.text, Message::ServerError.text(lang));
            assert_eq!(res.error, Some(RemoteError::Rejected(500)));
        }
    }

    #[tokio::test]
    async fn test_missing_answer_is_no_answer() {
        for lang in Language::ALL {
            let stub = StubTransport::respond(200, r#"{"detail":"nothing"}"#);
            let res = RemoteResolver::new(stub).resolve_detailed("dbt", lang).await;
            assert_eq!(res.text, Message::NoAnswer.text(lang));
            assert_eq!(res.error, Some(RemoteError::Malformed));
        }
    }

    #[tokio::test]
    async fn test_ask_exposes_structured_error() {
        let stub = StubTransport::respond(404, "");
        let err = RemoteResolver::new(stub)
            .ask("dbt", Language::Hindi)
            .await
            .unwrap_err();
        assert_eq!(err, RemoteError::Rejected(404));
    }

    #[tokio::test]
    async fn test_resolve_returns_plain_text() {
        let stub = StubTransport::respond(503, "");
        let text = RemoteResolver::new(stub).resolve("dbt", Language::Hindi).await;
        assert_eq!(text, Message::ServerError.text(Language::Hindi));
    }

    #[test]
    fn test_extract_answer() {
        assert_eq!(extract_answer(r#"{"answer":"yes"}"#), Some("yes".to_string()));
        assert_eq!(
            extract_answer(r#"{"answer":"yes","sources":["kb"]}"#),
            Some("yes".to_string())
        );
        assert_eq!(extract_answer(r#"{"answer":null}"#), None);
        assert_eq!(extract_answer(r#"{"answer":42}"#), None);
        assert_eq!(extract_answer(r#"{"answer":"  "}"#), None);
        assert_eq!(extract_answer(r#"["answer"]"#), None);
        assert_eq!(extract_answer("<html>"), None);
        assert_eq!(extract_answer(""), None);
    }

    #[test]
    fn test_transport_response_success_range() {
        let ok = TransportResponse { status: 204, body: String::new() };
        let redirect = TransportResponse { status: 302, body: String::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}
