use colored::Colorize;

use crate::clients::executor::MutationExecutor;
use crate::clients::executor::QueryExecutor;
use crate::clients::gitlab::GitlabClient;
use crate::config::Config;
use crate::service::GitlabResult;
use crate::service::GitlabService;

pub struct App<Q: QueryExecutor, M: MutationExecutor> {
    pub service: GitlabService<Q, M>,
}

impl<Q: QueryExecutor, M: MutationExecutor> App<Q, M> {
    pub fn new(service: GitlabService<Q, M>) -> Self {
        Self { service }
    }
}

impl App<GitlabClient, GitlabClient> {
    pub fn from_config(config: &Config) -> Self {
        let client = GitlabClient::new(config);
        Self::new(GitlabService::new(client.clone(), client))
    }
}

/// Shared helper methods for App
impl<Q: QueryExecutor, M: MutationExecutor> App<Q, M> {
    /// Print a result and turn GitLab-reported errors into a command failure.
    ///
    /// `action` is the imperative form, e.g. "create branch x".
    pub(crate) fn report(
        &self,
        action: &str,
        result: &GitlabResult,
        stdout: &mut impl std::io::Write,
    ) -> anyhow::Result<()> {
        if result.successful() {
            writeln!(stdout, "{} Done: {}", "✓".green(), action)?;
        } else {
            writeln!(stdout, "{} Failed to {}", "✗".red(), action)?;
            for error in result.errors() {
                writeln!(stdout, "  {}", error)?;
            }
        }
        if !result.url().is_empty() {
            writeln!(stdout, "  {}", result.url().dimmed())?;
        }

        if !result.successful() {
            anyhow::bail!("GitLab reported {} error(s)", result.errors().len());
        }
        Ok(())
    }
}
