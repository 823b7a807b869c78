use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use tracing::instrument;
use tracing::warn;

use super::executor::ExecutorError;
use super::executor::MutationData;
use super::executor::MutationExecutor;
use super::executor::QueryData;
use super::executor::QueryExecutor;
use super::executor::Variables;
use super::gitlab_curl::GitlabCurlClient;
use crate::config::Config;

// -----------------------------------------------------------------------------
// Types

/// Client to execute GraphQL documents against the GitLab API.
#[derive(Clone)]
pub struct GitlabClient {
    http_client: GitlabCurlClient,
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: &'a Variables,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

// -----------------------------------------------------------------------------
// GitlabClient impl

impl GitlabClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: GitlabCurlClient::new(
                config.endpoint_url.clone(),
                config.token.clone(),
            ),
        }
    }

    #[instrument(skip_all, fields(operation = operation_name(document)))]
    async fn execute<T: DeserializeOwned + Default>(
        &self,
        document: &str,
        variables: &Variables,
    ) -> Result<T, ExecutorError> {
        let request = GraphqlRequest {
            query: document,
            variables,
        };
        let body = serde_json::to_string(&request)
            .map_err(|e| ExecutorError::Protocol(format!("cannot encode request: {}", e)))?;

        debug!(endpoint = self.http_client.endpoint(), "posting GraphQL request");
        let response = self
            .http_client
            .post(&body)
            .await
            .map_err(|e| ExecutorError::Transport(format!("{:#}", e)))?;

        let response: GraphqlResponse<T> = serde_json::from_str(&response)
            .map_err(|e| ExecutorError::Protocol(format!("cannot decode response: {}", e)))?;
        into_data(response)
    }
}

#[async_trait(?Send)]
impl QueryExecutor for GitlabClient {
    async fn execute_query(
        &self,
        document: &str,
        variables: Variables,
    ) -> Result<QueryData, ExecutorError> {
        self.execute(document, &variables).await
    }
}

#[async_trait(?Send)]
impl MutationExecutor for GitlabClient {
    async fn execute_mutation(
        &self,
        document: &str,
        variables: Variables,
    ) -> Result<MutationData, ExecutorError> {
        self.execute(document, &variables).await
    }
}

/// Partial data wins over top-level errors; errors without data are a protocol failure.
fn into_data<T: Default>(response: GraphqlResponse<T>) -> Result<T, ExecutorError> {
    let messages: Vec<String> = response
        .errors
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.message)
        .collect();

    match response.data {
        Some(data) => {
            if !messages.is_empty() {
                warn!(errors = ?messages, "GraphQL response carried errors next to data");
            }
            Ok(data)
        }
        None if messages.is_empty() => Ok(T::default()),
        None => Err(ExecutorError::Protocol(messages.join("; "))),
    }
}

/// Name of a GraphQL operation, e.g. `CREATE_BRANCH` for `mutation CREATE_BRANCH(...)`.
fn operation_name(document: &str) -> &str {
    document
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.split('(').next())
        .unwrap_or("")
}
