//! Branch, commit and merge request operations against GitLab, plus the access probe.
//!
//! Every operation validates its input before touching the network, issues its
//! round trips strictly one after another, and reports domain errors from GitLab
//! as data in a [`GitlabResult`]. Only transport, access and consistency failures
//! become a [`GitlabError`].

pub mod documents;
mod result;

pub use result::GitlabResult;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use tracing::instrument;
use uuid::Uuid;

use crate::clients::executor::ExecutorError;
use crate::clients::executor::MutationData;
use crate::clients::executor::MutationExecutor;
use crate::clients::executor::QueryData;
use crate::clients::executor::QueryExecutor;
use crate::clients::executor::Variables;

// -----------------------------------------------------------------------------
// Types

#[derive(Debug, Error)]
pub enum GitlabError {
    #[error("parameter '{parameter}' must not be blank")]
    InvalidArgument { parameter: &'static str },
    #[error("GitLab GraphQL service not available")]
    ServiceUnavailable(#[from] ExecutorError),
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub struct GitlabService<Q, M> {
    query_executor: Q,
    mutation_executor: M,
    /// Echoed back by both access probes. Fixed for the lifetime of the service.
    probe_token: String,
}

// -----------------------------------------------------------------------------
// GitlabService impl

impl<Q: QueryExecutor, M: MutationExecutor> GitlabService<Q, M> {
    pub fn new(query_executor: Q, mutation_executor: M) -> Self {
        Self::with_probe_token(query_executor, mutation_executor, Uuid::new_v4().to_string())
    }

    pub fn with_probe_token(query_executor: Q, mutation_executor: M, probe_token: String) -> Self {
        Self {
            query_executor,
            mutation_executor,
            probe_token,
        }
    }

    pub fn probe_token(&self) -> &str {
        &self.probe_token
    }

    /// Fail unless the current credentials can both read and write.
    #[instrument(skip_all)]
    pub async fn require_access(&self) -> Result<(), GitlabError> {
        self.can_query().await?;
        self.can_mutate().await
    }

    /// Read probe: the `echo` query must answer with the probe token as suffix.
    #[instrument(skip_all)]
    pub async fn can_query(&self) -> Result<(), GitlabError> {
        let data = self
            .query(
                documents::ECHO_QUERY,
                variables([("message", self.probe_token.as_str().into())]),
            )
            .await?;

        // A wrong token yields a null field, not an error
        match data.echo {
            Some(echo) if echo.ends_with(&self.probe_token) => Ok(()),
            echo => {
                debug!(?echo, "read probe did not echo the token");
                Err(GitlabError::AccessDenied("no read access".to_string()))
            }
        }
    }

    /// Write probe: the first message returned by `echoCreate` must end with the probe token.
    #[instrument(skip_all)]
    pub async fn can_mutate(&self) -> Result<(), GitlabError> {
        let data = self
            .mutate(
                documents::ECHO_MUTATION,
                variables([("message", self.probe_token.as_str().into())]),
            )
            .await?;

        let first_echo = data
            .echo_create
            .and_then(|payload| payload.echoes)
            .and_then(|echoes| echoes.into_iter().next());
        match first_echo {
            Some(echo) if echo.ends_with(&self.probe_token) => Ok(()),
            echo => {
                debug!(?echo, "write probe did not echo the token");
                Err(GitlabError::AccessDenied("no write access".to_string()))
            }
        }
    }

    /// Create `branch_name` from `base_branch` in the project at `project_path`.
    #[instrument(skip_all, fields(project = project_path, branch = branch_name))]
    pub async fn create_branch(
        &self,
        project_path: &str,
        base_branch: &str,
        branch_name: &str,
    ) -> Result<GitlabResult, GitlabError> {
        require_not_blank("projectPath", project_path)?;
        require_not_blank("baseBranch", base_branch)?;
        require_not_blank("branchName", branch_name)?;

        let data = self
            .mutate(
                documents::CREATE_BRANCH,
                variables([
                    ("projectPath", project_path.into()),
                    ("sourceBranch", branch_name.into()),
                    ("targetBranch", base_branch.into()),
                ]),
            )
            .await?;

        // An absent payload (e.g. wrong token) is indistinguishable from success here
        let errors = data
            .create_branch
            .and_then(|payload| payload.errors)
            .unwrap_or_default();
        Ok(GitlabResult::new(errors))
    }

    /// Commit `file_content` to `file_path` on `branch_name`.
    ///
    /// With `must_be_created` the file is first created with `create_message`. The
    /// update with `update_message` is always sent, so a file that already exists
    /// still ends up with the new content. Only the update's errors are returned.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all, fields(project = project_path, branch = branch_name, file = file_path))]
    pub async fn commit(
        &self,
        project_path: &str,
        branch_name: &str,
        file_path: &str,
        file_content: &str,
        must_be_created: bool,
        create_message: &str,
        update_message: &str,
    ) -> Result<GitlabResult, GitlabError> {
        require_not_blank("projectPath", project_path)?;
        require_not_blank("branchName", branch_name)?;
        require_not_blank("fileName", file_path)?;
        require_not_blank("fileContent", file_content)?;
        require_not_blank("createMessage", create_message)?;
        require_not_blank("updateMessage", update_message)?;

        let data = self
            .mutate(
                documents::CREATE_FILE,
                variables([
                    ("projectPath", project_path.into()),
                    ("sourceBranch", branch_name.into()),
                    ("createMessage", create_message.into()),
                    ("updateMessage", update_message.into()),
                    ("filePath", file_path.into()),
                    ("fileContent", file_content.into()),
                    ("create", must_be_created.into()),
                ]),
            )
            .await?;

        if let Some(create_errors) = data.create.and_then(|payload| payload.errors) {
            if !create_errors.is_empty() {
                debug!(errors = ?create_errors, "file creation rejected, relying on update");
            }
        }

        let errors = data
            .commit_create
            .and_then(|payload| payload.errors)
            .unwrap_or_default();
        Ok(GitlabResult::new(errors))
    }

    /// Open a merge request from `source_branch` into `base_branch` and return its URL.
    ///
    /// The lookup of the open merge request runs even if creation reported errors,
    /// so an already existing merge request still yields its URL.
    #[instrument(skip_all, fields(project = project_path, source = source_branch))]
    pub async fn create_merge_request(
        &self,
        project_path: &str,
        source_branch: &str,
        base_branch: &str,
        title: &str,
    ) -> Result<GitlabResult, GitlabError> {
        require_not_blank("projectPath", project_path)?;
        require_not_blank("sourceBranch", source_branch)?;
        require_not_blank("title", title)?;
        require_not_blank("baseBranch", base_branch)?;

        let mutation = self
            .mutate(
                documents::CREATE_MERGE,
                variables([
                    ("projectPath", project_path.into()),
                    ("sourceBranch", source_branch.into()),
                    ("targetBranch", base_branch.into()),
                    ("commitMessage", title.into()),
                ]),
            )
            .await?;

        let query = self
            .query(
                documents::OPEN_MERGE_REQUESTS,
                variables([
                    ("projectPath", project_path.into()),
                    ("sourceBranch", source_branch.into()),
                ]),
            )
            .await?;

        let errors = mutation
            .merge_request_create
            .and_then(|payload| payload.errors)
            .unwrap_or_default();
        let url = query
            .project
            .and_then(|project| project.merge_requests)
            .and_then(|connection| connection.nodes)
            .and_then(|nodes| nodes.into_iter().next())
            .and_then(|node| node.web_url)
            .ok_or_else(|| {
                GitlabError::NotFound("expected open merge request not found".to_string())
            })?;

        Ok(GitlabResult::with_url(errors, url))
    }

    async fn query(&self, document: &str, variables: Variables) -> Result<QueryData, GitlabError> {
        Ok(self.query_executor.execute_query(document, variables).await?)
    }

    async fn mutate(
        &self,
        document: &str,
        variables: Variables,
    ) -> Result<MutationData, GitlabError> {
        Ok(self
            .mutation_executor
            .execute_mutation(document, variables)
            .await?)
    }
}

fn require_not_blank(parameter: &'static str, value: &str) -> Result<(), GitlabError> {
    if value.trim().is_empty() {
        return Err(GitlabError::InvalidArgument { parameter });
    }
    Ok(())
}

fn variables<const N: usize>(pairs: [(&str, Value); N]) -> Variables {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}
