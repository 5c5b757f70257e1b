// GitHub GraphQL transport
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::Value;
use stargraph_core::{Error, GraphQuery, GraphSource, QueryKind, Result};
use std::time::Duration;
use tracing::{trace, warn};

use crate::credential::Credential;

pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!("stargraph/", env!("CARGO_PKG_VERSION"));

/// Client for a GraphQL endpoint speaking GitHub's schema.
pub struct GithubClient {
    http: Client,
    endpoint: String,
    credential: Credential,
}

impl GithubClient {
    pub fn new(endpoint: impl Into<String>, credential: Credential) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Transport(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            credential,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GraphSource for GithubClient {
    async fn execute(&self, query: &GraphQuery) -> Result<Value> {
        trace!(kind = %query.kind, variables = %query.variables, "posting query");

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, self.credential.header_value())
            .json(&query.to_body())
            .send()
            .await
            .map_err(|e| Error::Transport(format!("{} request failed: {}", query.kind, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "{} query failed with status {}: {}",
                query.kind, status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("unreadable {} response: {}", query.kind, e)))?;
        into_data(body, query.kind)
    }
}

/// Pull `data` out of a GraphQL response envelope.
///
/// Errors alongside data are logged and the data is returned; lookups of
/// unknown ids come back that way. Errors without data fail the query.
fn into_data(mut body: Value, kind: QueryKind) -> Result<Value> {
    let data = body.get_mut("data").map(Value::take).unwrap_or(Value::Null);
    let messages: Vec<&str> = body
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if data.is_null() {
        let reason = if messages.is_empty() {
            "response carried no data".to_string()
        } else {
            messages.join("; ")
        };
        return Err(Error::Query(format!("{} query failed: {}", kind, reason)));
    }

    if !messages.is_empty() {
        warn!(kind = %kind, errors = %messages.join("; "), "query returned partial errors");
    }
    Ok(data)
}
