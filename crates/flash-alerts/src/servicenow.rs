//! ServiceNow incident creation via the Table API.

use serde::Deserialize;

use crate::error::AlertError;

/// Default urgency/impact for sentiment incidents ("2" = medium).
const URGENCY: &str = "2";
const IMPACT: &str = "2";

pub struct ServiceNowClient {
    client: reqwest::Client,
    base_url: String,
    user: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct IncidentResponse {
    result: IncidentResult,
}

#[derive(Debug, Deserialize)]
struct IncidentResult {
    #[serde(default)]
    number: Option<String>,
}

impl ServiceNowClient {
    /// Client for `https://{instance}.service-now.com`.
    #[must_use]
    pub fn new(client: reqwest::Client, instance: &str, user: &str, password: &str) -> Self {
        Self::with_base_url(
            client,
            &format!("https://{instance}.service-now.com"),
            user,
            password,
        )
    }

    /// Custom base URL for pointing at a mock server in tests.
    #[must_use]
    pub fn with_base_url(
        client: reqwest::Client,
        base_url: &str,
        user: &str,
        password: &str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            password: password.to_string(),
        }
    }

    /// Open an incident and return its number.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Http`] on transport or status failure, or
    /// [`AlertError::ServiceNow`] when the response lacks an incident
    /// number.
    pub async fn create_incident(
        &self,
        title: &str,
        description: &str,
    ) -> Result<String, AlertError> {
        let resp = self
            .client
            .post(format!("{}/api/now/table/incident", self.base_url))
            .basic_auth(&self.user, Some(&self.password))
            .json(&serde_json::json!({
                "short_description": title,
                "description": description,
                "urgency": URGENCY,
                "impact": IMPACT,
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: IncidentResponse = resp.json().await?;
        body.result
            .number
            .ok_or_else(|| AlertError::ServiceNow("response carried no incident number".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn creates_an_incident_and_returns_its_number() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/now/table/incident"))
            .and(body_partial_json(json!({ "urgency": "2", "impact": "2" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "result": { "number": "INC0012345" }
            })))
            .mount(&server)
            .await;

        let client = ServiceNowClient::with_base_url(
            reqwest::Client::new(),
            &server.uri(),
            "agent",
            "secret",
        );
        let number = client
            .create_incident("Negative spike", "details")
            .await
            .expect("incident created");
        assert_eq!(number, "INC0012345");
    }

    #[tokio::test]
    async fn auth_failure_surfaces_as_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/now/table/incident"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = ServiceNowClient::with_base_url(
            reqwest::Client::new(),
            &server.uri(),
            "agent",
            "wrong",
        );
        let result = client.create_incident("t", "d").await;
        assert!(matches!(result, Err(AlertError::Http(_))));
    }

    #[tokio::test]
    async fn missing_number_is_a_servicenow_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/now/table/incident"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "result": {} })))
            .mount(&server)
            .await;

        let client = ServiceNowClient::with_base_url(
            reqwest::Client::new(),
            &server.uri(),
            "agent",
            "secret",
        );
        let result = client.create_incident("t", "d").await;
        assert!(matches!(result, Err(AlertError::ServiceNow(_))));
    }
}
