use anyhow::Context;
use anyhow::Result;
use std::process::Stdio;

use anyhow::bail;
use serde::Deserialize;
use tokio::io::AsyncWriteExt as _;
use tokio::process::Command;

/// HTTP client using curl for posting to the GitLab GraphQL endpoint
#[derive(Clone)]
pub struct GitlabCurlClient {
    endpoint: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct GitlabApiError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl GitlabCurlClient {
    /// An empty `token` sends no Authorization header.
    pub fn new(endpoint: String, token: String) -> Self {
        Self { endpoint, token }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Make a POST request with a JSON body
    ///
    /// The body is streamed through curl's stdin since file contents easily exceed
    /// the size limit of a single command line argument.
    pub async fn post(&self, json_data: &str) -> Result<String> {
        let mut args = vec![
            "-s".to_string(),
            "-S".to_string(),
            "-w".to_string(),
            "\n%{http_code}".to_string(),
            "-X".to_string(),
            "POST".to_string(),
            "-H".to_string(),
            "Accept: application/json".to_string(),
            "-H".to_string(),
            "Content-Type: application/json".to_string(),
            "-H".to_string(),
            "User-Agent: glab-ops".to_string(),
            // Disable "Expect: 100-continue" on large bodies
            "-H".to_string(),
            "Expect:".to_string(),
        ];
        if !self.token.is_empty() {
            args.push("-H".to_string());
            args.push(format!("Authorization: Bearer {}", self.token));
        }
        args.push("--data-binary".to_string());
        args.push("@-".to_string());
        args.push(self.endpoint.clone());

        let mut child = Command::new("curl")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to execute curl command")?;

        let mut stdin = child.stdin.take().context("curl stdin not captured")?;
        let written = stdin.write_all(json_data.as_bytes()).await;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .context("Failed to execute curl command")?;

        if !output.status.success() {
            bail!(
                "curl command failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        written.context("Failed to write request body to curl")?;

        parse_response(output.stdout)
    }
}

/// Parse curl response with status code appended
fn parse_response(stdout: Vec<u8>) -> Result<String> {
    let output_str = String::from_utf8(stdout)?;
    let mut lines: Vec<&str> = output_str.rsplitn(2, '\n').collect();
    lines.reverse();

    let (response, status_code) = match lines.as_slice() {
        [body, code] => (body.to_string(), code.parse::<u16>().unwrap_or(0)),
        _ => (String::new(), 0),
    };

    if status_code >= 400 {
        if let Ok(error) = serde_json::from_str::<GitlabApiError>(&response) {
            if let Some(message) = error.message.or(error.error_description) {
                bail!("GitLab API error ({}): {}", status_code, message);
            }
        }
        bail!(
            "GitLab API request failed with status {}: {}",
            status_code,
            response
        );
    }
    if status_code == 0 {
        bail!("GitLab API response carried no HTTP status code");
    }

    Ok(response)
}
