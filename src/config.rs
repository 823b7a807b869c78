use anyhow::Context;
use anyhow::Result;

pub const ENDPOINT_ENV: &str = "GLAB_OPS_ENDPOINT";
pub const TOKEN_ENV: &str = "GLAB_OPS_TOKEN";

const ENDPOINT_GIT_KEY: &str = "glab-ops.endpoint";
const TOKEN_GIT_KEY: &str = "glab-ops.token";

#[derive(Debug, Clone)]
pub struct Config {
    /// GitLab GraphQL endpoint, e.g. https://gitlab.com/api/graphql
    pub endpoint_url: String,
    /// Personal access token; empty sends unauthenticated requests
    pub token: String,
}

impl Config {
    /// Load config from the environment, falling back to git config
    pub fn load() -> Result<Self> {
        let endpoint_url = lookup(ENDPOINT_ENV, ENDPOINT_GIT_KEY)?.with_context(|| {
            format!(
                "No GraphQL endpoint configured. Set {} or run 'glab-ops init'.",
                ENDPOINT_ENV
            )
        })?;
        let token = lookup(TOKEN_ENV, TOKEN_GIT_KEY)?.unwrap_or_default();

        Ok(Self {
            endpoint_url,
            token,
        })
    }

    /// Save config to .git/config
    pub fn save(&self) -> Result<()> {
        set_git_config(ENDPOINT_GIT_KEY, &self.endpoint_url)?;
        if !self.token.is_empty() {
            set_git_config(TOKEN_GIT_KEY, &self.token)?;
        }
        Ok(())
    }

    /// Create a new config with explicit values (useful for tests)
    pub fn new(endpoint_url: String, token: String) -> Self {
        Self {
            endpoint_url,
            token,
        }
    }

    /// Default config for tests
    pub fn default_for_tests() -> Self {
        Self {
            endpoint_url: "http://127.0.0.1:9/api/graphql".to_string(),
            token: "test-token".to_string(),
        }
    }
}

/// Non-blank value of `env`, else of git config `key`
fn lookup(env: &str, key: &str) -> Result<Option<String>> {
    if let Ok(value) = std::env::var(env) {
        let value = value.trim();
        if !value.is_empty() {
            return Ok(Some(value.to_string()));
        }
    }

    let output = std::process::Command::new("git")
        .args(["config", "--get", key])
        .output()
        .context("Failed to execute git command")?;

    if !output.status.success() {
        return Ok(None);
    }

    let value = String::from_utf8(output.stdout)?.trim().to_string();
    Ok((!value.is_empty()).then_some(value))
}

fn set_git_config(key: &str, value: &str) -> Result<()> {
    let output = std::process::Command::new("git")
        .args(["config", key, value])
        .output()
        .context("Failed to execute git command")?;

    if !output.status.success() {
        anyhow::bail!("Failed to save {} to .git/config", key);
    }

    Ok(())
}
