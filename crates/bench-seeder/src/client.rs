//! HTTP implementation of [`CrmApi`].

use crate::api::{CallOutcome, CrmApi};
use crate::config::SeederConfig;
use crate::dataset::AttributeDefinition;
use crate::payload;
use async_trait::async_trait;
use mcp_bench_core::{Error, Result};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Error bodies are truncated to this many characters in logs and outcomes.
pub const MAX_ERROR_TEXT: usize = 200;

/// CRM REST client.
///
/// Every request waits for the configured delay first, so consecutive calls
/// are spaced at least that far apart.
#[derive(Debug)]
pub struct HttpCrmClient {
    client: reqwest::Client,
    base_url: String,
    api_key: secrecy::SecretString,
    rate_limit_delay: Duration,
}

impl HttpCrmClient {
    /// Builds a client from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn new(config: &SeederConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::ConfigError {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: secrecy::SecretString::from(config.bearer_token().to_owned()),
            rate_limit_delay: config.rate_limit_delay,
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        query: Option<(&str, &str)>,
        body: Option<&Value>,
        label: &str,
    ) -> CallOutcome {
        tokio::time::sleep(self.rate_limit_delay).await;

        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(secrecy::ExposeSecret::expose_secret(&self.api_key));
        if let Some(pair) = query {
            request = request.query(&[pair]);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(label, %method, path, error = %e, "request failed");
                return CallOutcome::Failed {
                    status: None,
                    message: e.to_string(),
                };
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        match status {
            StatusCode::OK | StatusCode::CREATED => match serde_json::from_str(&text) {
                Ok(body) => {
                    debug!(label, status = status.as_u16(), "request succeeded");
                    CallOutcome::Success(body)
                }
                Err(e) => {
                    warn!(label, status = status.as_u16(), error = %e, "undecodable response body");
                    CallOutcome::Failed {
                        status: Some(status.as_u16()),
                        message: format!("invalid JSON response: {e}"),
                    }
                }
            },
            StatusCode::CONFLICT => {
                debug!(label, "already exists");
                CallOutcome::Conflict { detail: text }
            }
            _ => {
                let message = truncate(&text, MAX_ERROR_TEXT);
                warn!(label, status = status.as_u16(), body = %message, "request rejected");
                CallOutcome::Failed {
                    status: Some(status.as_u16()),
                    message,
                }
            }
        }
    }
}

#[async_trait]
impl CrmApi for HttpCrmClient {
    async fn whoami(&self) -> CallOutcome {
        self.call(Method::GET, "/self", None, None, "whoami").await
    }

    async fn create_attribute(&self, object: &str, definition: &AttributeDefinition) -> CallOutcome {
        let body = payload::attribute_body(definition);
        let label = format!("{object}.{}", definition.api_slug);
        self.call(
            Method::POST,
            &format!("/objects/{object}/attributes"),
            None,
            Some(&body),
            &label,
        )
        .await
    }

    async fn assert_record(&self, object: &str, matching_attribute: &str, values: Value) -> CallOutcome {
        let body = payload::record_body(values);
        self.call(
            Method::PUT,
            &format!("/objects/{object}/records"),
            Some(("matching_attribute", matching_attribute)),
            Some(&body),
            object,
        )
        .await
    }

    async fn create_record(&self, object: &str, values: Value) -> CallOutcome {
        let body = payload::record_body(values);
        self.call(
            Method::POST,
            &format!("/objects/{object}/records"),
            None,
            Some(&body),
            object,
        )
        .await
    }

    async fn update_record(&self, object: &str, record_id: &str, values: Value) -> CallOutcome {
        let body = payload::record_body(values);
        self.call(
            Method::PATCH,
            &format!("/objects/{object}/records/{record_id}"),
            None,
            Some(&body),
            record_id,
        )
        .await
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpCrmClient {
        let config = SeederConfig::new("test-key")
            .with_base_url(server.uri())
            .with_rate_limit_delay(Duration::ZERO);
        HttpCrmClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_whoami_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/self"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"workspace": {"name": "Sandbox"}}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server).whoami().await;
        assert_eq!(
            outcome,
            CallOutcome::Success(json!({"data": {"workspace": {"name": "Sandbox"}}}))
        );
    }

    #[tokio::test]
    async fn test_assert_record_uses_matching_attribute() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/objects/companies/records"))
            .and(query_param("matching_attribute", "domains"))
            .and(body_json(json!({"data": {"values": {"name": [{"value": "Apple"}]}}})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"id": {"record_id": "rec_apple"}}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .assert_record("companies", "domains", json!({"name": [{"value": "Apple"}]}))
            .await;
        assert_eq!(outcome.record_id(), Some("rec_apple"));
    }

    #[tokio::test]
    async fn test_created_status_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/objects/deals/records"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"data": {"id": {"record_id": "rec_deal"}}})),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server).create_record("deals", json!({})).await;
        assert_eq!(outcome.record_id(), Some("rec_deal"));
    }

    #[tokio::test]
    async fn test_conflict_maps_to_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/objects/companies/attributes"))
            .respond_with(ResponseTemplate::new(409).set_body_string("slug taken"))
            .mount(&server)
            .await;

        let definition = AttributeDefinition {
            title: "Industry".into(),
            api_slug: "industry".into(),
            attribute_type: "select".into(),
            description: "Primary industry vertical".into(),
        };
        let outcome = client_for(&server)
            .create_attribute("companies", &definition)
            .await;
        assert_eq!(
            outcome,
            CallOutcome::Conflict {
                detail: "slug taken".into()
            }
        );
    }

    #[tokio::test]
    async fn test_error_body_is_truncated() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/objects/deals/records/rec_1"))
            .respond_with(ResponseTemplate::new(422).set_body_string("x".repeat(500)))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .update_record("deals", "rec_1", json!({}))
            .await;
        match outcome {
            CallOutcome::Failed { status, message } => {
                assert_eq!(status, Some(422));
                assert_eq!(message.len(), MAX_ERROR_TEXT);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_error_is_failed_without_status() {
        let config = SeederConfig::new("k")
            .with_base_url("http://127.0.0.1:1")
            .with_rate_limit_delay(Duration::ZERO)
            .with_request_timeout(Duration::from_secs(2));
        let client = HttpCrmClient::new(&config).unwrap();

        let outcome = client.whoami().await;
        assert!(matches!(outcome, CallOutcome::Failed { status: None, .. }));
    }

    #[tokio::test]
    async fn test_delay_precedes_every_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/self"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .expect(3)
            .mount(&server)
            .await;

        let delay = Duration::from_millis(40);
        let config = SeederConfig::new("test-key")
            .with_base_url(server.uri())
            .with_rate_limit_delay(delay);
        let client = HttpCrmClient::new(&config).unwrap();

        let started = std::time::Instant::now();
        for _ in 0..3 {
            assert!(client.whoami().await.is_success());
        }
        assert!(started.elapsed() >= delay * 3);
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_failed() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/objects/companies/records"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .assert_record("companies", "domains", json!({}))
            .await;
        assert!(matches!(outcome, CallOutcome::Failed { status: Some(200), .. }));
        assert_eq!(outcome.record_id(), None);
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("short", 200), "short");
    }
}
