use anyhow::Result;

use crate::App;
use crate::clients::executor::MutationExecutor;
use crate::clients::executor::QueryExecutor;

impl<Q: QueryExecutor, M: MutationExecutor> App<Q, M> {
    /// Open a merge request, printing the URL of the open merge request for `source`.
    pub async fn cmd_create_mr(
        &self,
        project: &str,
        source: &str,
        target: &str,
        title: &str,
        stdout: &mut impl std::io::Write,
    ) -> Result<()> {
        let result = self
            .service
            .create_merge_request(project, source, target, title)
            .await?;
        self.report(
            &format!("create merge request {} -> {}", source, target),
            &result,
            stdout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::executor::ErrorsPayload;
    use crate::clients::executor::MergeRequest;
    use crate::clients::executor::MergeRequestConnection;
    use crate::clients::executor::MockMutationExecutor;
    use crate::clients::executor::MockQueryExecutor;
    use crate::clients::executor::MutationData;
    use crate::clients::executor::Project;
    use crate::clients::executor::QueryData;
    use crate::service::GitlabService;

    const MR_URL: &str = "https://gitlab.example.com/group/project/-/merge_requests/12";

    fn app_with_errors(
        errors: &'static [&'static str],
    ) -> App<MockQueryExecutor, MockMutationExecutor> {
        let mut mock_mutation = MockMutationExecutor::new();
        mock_mutation
            .expect_execute_mutation()
            .times(1)
            .returning(move |_, _| {
                Ok(MutationData {
                    merge_request_create: Some(ErrorsPayload::with_errors(errors.iter().copied())),
                    ..Default::default()
                })
            });
        let mut mock_query = MockQueryExecutor::new();
        mock_query.expect_execute_query().times(1).returning(|_, _| {
            Ok(QueryData {
                project: Some(Project {
                    merge_requests: Some(MergeRequestConnection {
                        nodes: Some(vec![MergeRequest {
                            web_url: Some(MR_URL.to_string()),
                        }]),
                    }),
                }),
                ..Default::default()
            })
        });
        App::new(GitlabService::new(mock_query, mock_mutation))
    }

    #[tokio::test]
    async fn test_cmd_create_mr() {
        let app = app_with_errors(&[]);
        let mut stdout = Vec::new();
        app.cmd_create_mr("group/project", "feature", "main", "Add feature", &mut stdout)
            .await
            .unwrap();
        insta::assert_snapshot!(String::from_utf8(stdout).unwrap(), @r"
        ✓ Done: create merge request feature -> main
          https://gitlab.example.com/group/project/-/merge_requests/12
        ");
    }

    #[tokio::test]
    async fn test_cmd_create_mr_already_exists() {
        let app = app_with_errors(&["Another open merge request already exists for this source branch: !12"]);
        let mut stdout = Vec::new();
        let result = app
            .cmd_create_mr("group/project", "feature", "main", "Add feature", &mut stdout)
            .await;
        assert!(result.is_err());
        insta::assert_snapshot!(String::from_utf8(stdout).unwrap(), @r"
        ✗ Failed to create merge request feature -> main
          Another open merge request already exists for this source branch: !12
          https://gitlab.example.com/group/project/-/merge_requests/12
        ");
    }
}
