use std::fmt::Display;

/// Outcome of a mutating GitLab operation.
///
/// `errors` are the domain errors GitLab reported inside a well-formed response.
/// Transport and access failures never end up here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitlabResult {
    errors: Vec<String>,
    url: String,
}

impl GitlabResult {
    pub fn new(errors: Vec<String>) -> Self {
        Self::with_url(errors, String::new())
    }

    pub fn with_url(errors: Vec<String>, url: String) -> Self {
        Self { errors, url }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Web URL of the open merge request, empty for other operations.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn successful(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for GitlabResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.successful() {
            f.write_str("ok")?;
        } else {
            f.write_str(&self.errors.join("; "))?;
        }
        if !self.url.is_empty() {
            write!(f, " ({})", self.url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_ignores_url() {
        assert!(GitlabResult::new(vec![]).successful());
        assert!(GitlabResult::with_url(vec![], "webUrl".to_string()).successful());
        assert!(!GitlabResult::with_url(vec!["error".to_string()], "webUrl".to_string()).successful());
    }

    #[test]
    fn test_display() {
        assert_eq!(GitlabResult::new(vec![]).to_string(), "ok");
        assert_eq!(
            GitlabResult::with_url(
                vec!["hello".to_string(), "error".to_string()],
                "webUrl".to_string()
            )
            .to_string(),
            "hello; error (webUrl)"
        );
    }
}
