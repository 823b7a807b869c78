use anyhow::Result;

use crate::config::Config;

/// Save the endpoint (and token, if given) to .git/config.
pub fn cmd_init(endpoint: &str, token: Option<&str>, stdout: &mut impl std::io::Write) -> Result<()> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        anyhow::bail!("Endpoint must not be empty");
    }

    let config = Config::new(endpoint.to_string(), token.unwrap_or("").trim().to_string());
    config.save()?;

    writeln!(stdout, "Configuration saved to .git/config")?;
    if config.token.is_empty() {
        writeln!(stdout)?;
        writeln!(stdout, "No token stored. Create a personal access token with scope:")?;
        writeln!(stdout, "  - api")?;
        writeln!(
            stdout,
            "and pass it with --token or the {} environment variable.",
            crate::config::TOKEN_ENV
        )?;
    }

    Ok(())
}
