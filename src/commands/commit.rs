use std::path::Path;

use anyhow::Context;
use anyhow::Result;

use crate::App;
use crate::clients::executor::MutationExecutor;
use crate::clients::executor::QueryExecutor;

/// Where the committed file content comes from
pub enum FileContent<'a> {
    Inline(&'a str),
    Local(&'a Path),
}

/// Commit a single file to a branch
pub struct CommitRequest<'a> {
    pub project: &'a str,
    pub branch: &'a str,
    pub file_path: &'a str,
    pub content: FileContent<'a>,
    pub create: bool,
    pub create_message: &'a str,
    pub update_message: &'a str,
}

impl<Q: QueryExecutor, M: MutationExecutor> App<Q, M> {
    /// Create and/or update a file on a branch.
    ///
    /// With `create` the file is created first; the update is always applied.
    pub async fn cmd_commit(
        &self,
        request: CommitRequest<'_>,
        stdout: &mut impl std::io::Write,
    ) -> Result<()> {
        let content = match request.content {
            FileContent::Inline(content) => content.to_string(),
            FileContent::Local(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?,
        };

        let result = self
            .service
            .commit(
                request.project,
                request.branch,
                request.file_path,
                &content,
                request.create,
                request.create_message,
                request.update_message,
            )
            .await?;

        self.report(
            &format!("commit {} to {}", request.file_path, request.branch),
            &result,
            stdout,
        )
    }
}
