//! The query/mutation execution capability consumed by [`crate::service`].
//!
//! Response types are hand-written shapes covering only the fields the service
//! reads. Every field is optional because GitLab answers an unauthorized request
//! with `null` fields instead of an error.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use thiserror::Error;

/// Values bound to the variables a GraphQL document declares.
pub type Variables = serde_json::Map<String, serde_json::Value>;

// -----------------------------------------------------------------------------
// Executor traits

/// Executes GraphQL queries
#[cfg_attr(test, automock)]
#[async_trait(?Send)]
pub trait QueryExecutor {
    async fn execute_query(
        &self,
        document: &str,
        variables: Variables,
    ) -> Result<QueryData, ExecutorError>;
}

/// Executes GraphQL mutations
#[cfg_attr(test, automock)]
#[async_trait(?Send)]
pub trait MutationExecutor {
    async fn execute_mutation(
        &self,
        document: &str,
        variables: Variables,
    ) -> Result<MutationData, ExecutorError>;
}

#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The request never produced a usable HTTP response.
    #[error("transport error: {0}")]
    Transport(String),
    /// A response arrived but could not be read as a GraphQL result.
    #[error("protocol error: {0}")]
    Protocol(String),
}

// -----------------------------------------------------------------------------
// Query response shapes

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryData {
    pub echo: Option<String>,
    pub project: Option<Project>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub merge_requests: Option<MergeRequestConnection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeRequestConnection {
    pub nodes: Option<Vec<MergeRequest>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    pub web_url: Option<String>,
}

// -----------------------------------------------------------------------------
// Mutation response shapes

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationData {
    pub create_branch: Option<ErrorsPayload>,
    /// Alias of `commitCreate` used for the optional CREATE action.
    pub create: Option<ErrorsPayload>,
    pub commit_create: Option<ErrorsPayload>,
    pub merge_request_create: Option<ErrorsPayload>,
    pub echo_create: Option<EchoCreatePayload>,
}

/// Any mutation payload of which only `errors` is selected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorsPayload {
    pub errors: Option<Vec<String>>,
}

impl ErrorsPayload {
    pub fn with_errors<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            errors: Some(errors.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EchoCreatePayload {
    pub echoes: Option<Vec<String>>,
}
