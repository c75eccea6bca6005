use crate::error::{ContentError, Result};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const USER_AGENT: &str = concat!("Marquee/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings shared by every client in this crate.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }

    pub fn parse(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ContentError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
        Ok(Self::new(endpoint))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build_http(&self) -> Result<Client> {
        let client = Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.timeout)
            .connect_timeout(self.timeout / 2)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;
        Ok(client)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

fn join_errors(errors: &[GraphQlErrorMessage]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Minimal GraphQL-over-HTTP transport: POST `{ query, variables }`, read `{ data, errors }`.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: Client,
    endpoint: Url,
}

impl GraphQlClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: config.build_http()?,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        debug!("POST {} ({} bytes of query)", self.endpoint, query.len());

        let body = json!({ "query": query, "variables": variables });
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            // Servers report validation failures as errors with a 4xx status
            if let Ok(parsed) = serde_json::from_slice::<GraphQlResponse<Value>>(&bytes)
                && !parsed.errors.is_empty()
            {
                return Err(ContentError::GraphQlError(join_errors(&parsed.errors)));
            }
            return Err(ContentError::StatusError {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let parsed: GraphQlResponse<T> = serde_json::from_slice(&bytes)?;
        if !parsed.errors.is_empty() {
            return Err(ContentError::GraphQlError(join_errors(&parsed.errors)));
        }
        parsed.data.ok_or(ContentError::MissingData("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, method, path},
    };

    #[derive(Debug, Deserialize)]
    struct Ping {
        ping: String,
    }

    async fn client_for(server: &MockServer) -> GraphQlClient {
        let config = ClientConfig::parse(&format!("{}/graphql", server.uri())).unwrap();
        GraphQlClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_query_sends_variables_and_reads_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "variables": { "storeId": "s1" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "ping": "pong" } })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let data: Ping = client
            .query("query { ping }", json!({ "storeId": "s1" }))
            .await
            .unwrap();
        assert_eq!(data.ping, "pong");
    }

    #[tokio::test]
    async fn test_errors_array_becomes_graphql_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [ { "message": "first" }, { "message": "second" } ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.query::<Ping>("query { ping }", json!({})).await.unwrap_err();
        match err {
            ContentError::GraphQlError(msg) => assert_eq!(msg, "first; second"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.query::<Ping>("query { ping }", json!({})).await.unwrap_err();
        assert!(matches!(err, ContentError::StatusError { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_missing_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.query::<Ping>("query { ping }", json!({})).await.unwrap_err();
        assert!(matches!(err, ContentError::MissingData("data")));
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            ClientConfig::parse("not a url"),
            Err(ContentError::InvalidUrl(_))
        ));
    }
}
