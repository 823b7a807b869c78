use anyhow::Result;

use crate::App;
use crate::clients::executor::MutationExecutor;
use crate::clients::executor::QueryExecutor;

impl<Q: QueryExecutor, M: MutationExecutor> App<Q, M> {
    pub async fn cmd_create_branch(
        &self,
        project: &str,
        base: &str,
        branch: &str,
        stdout: &mut impl std::io::Write,
    ) -> Result<()> {
        let result = self.service.create_branch(project, base, branch).await?;
        self.report(
            &format!("create branch {} from {} in {}", branch, base, project),
            &result,
            stdout,
        )
    }
}
