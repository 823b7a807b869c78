use anyhow::Result;
use colored::Colorize;

use crate::App;
use crate::clients::executor::MutationExecutor;
use crate::clients::executor::QueryExecutor;

impl<Q: QueryExecutor, M: MutationExecutor> App<Q, M> {
    /// Verify the configured credentials can read from and write to GitLab.
    pub async fn cmd_check(&self, stdout: &mut impl std::io::Write) -> Result<()> {
        self.service.require_access().await?;
        writeln!(stdout, "{} read and write access", "✓".green())?;
        Ok(())
    }
}
