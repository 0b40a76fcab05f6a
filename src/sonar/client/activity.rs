use async_trait::async_trait;
use log::{debug, error, info};

use super::SonarClient;
use crate::sonar::error::SonarError;
use crate::sonar::model::{truncate, TaskActivity, TaskStatus};
use crate::sonar::traits::ActivityOperations;

#[async_trait]
impl ActivityOperations for SonarClient {
    async fn list_unfinished_tasks(&self, project_key: &str) -> Result<TaskActivity, SonarError> {
        let statuses = TaskStatus::query_value(&TaskStatus::UNFINISHED);
        let (status, body) = self
            .base
            .get_text(
                "api/ce/activity",
                &[("status", statuses.as_str()), ("component", project_key)],
            )
            .await?;

        let activity: TaskActivity = match serde_json::from_str(&body) {
            Ok(activity) => activity,
            Err(e) => {
                error!("Failed to decode activity response ({status}). Error: {e}");
                error!("Response body (first 500 chars): {}", truncate(&body));
                return Err(SonarError::Decode { source: e, body });
            }
        };

        for task in &activity.tasks {
            debug!(
                "Task {} ({}) is {}",
                task.id,
                task.task_type.as_deref().unwrap_or("unknown type"),
                task.status
            );
        }
        info!("{} unfinished tasks for {project_key}", activity.len());
        Ok(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sonar::client::test_support::{get_test_client, TEST_AUTH_HEADER};
    use indoc::indoc;
    use mockito::Matcher;

    const ONE_PENDING: &str = indoc! {r#"
        {
          "tasks": [
            {
              "id": "AVAn5RKqYwETbXvgas-I",
              "type": "REPORT",
              "componentKey": "externals",
              "status": "PENDING",
              "submittedAt": "2015-10-02T11:32:15+0200",
              "logs": false
            }
          ]
        }
    "#};

    fn activity_query(project_key: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("status".into(), "PENDING,IN_PROGRESS".into()),
            Matcher::UrlEncoded("component".into(), project_key.into()),
        ])
    }

    #[tokio::test]
    async fn test_list_unfinished_tasks() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/ce/activity")
            .match_query(activity_query("externals"))
            .match_header("authorization", TEST_AUTH_HEADER)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ONE_PENDING)
            .expect(1)
            .create_async()
            .await;

        let client = get_test_client(&server.url());
        let activity = client.list_unfinished_tasks("externals").await.unwrap();

        assert_eq!(activity.len(), 1);
        assert_eq!(activity.tasks[0].status, TaskStatus::Pending);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_unfinished_tasks() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/ce/activity")
            .match_query(activity_query("externals"))
            .with_status(200)
            .with_body(r#"{"tasks":[]}"#)
            .create_async()
            .await;

        let client = get_test_client(&server.url());
        let activity = client.list_unfinished_tasks("externals").await.unwrap();

        assert!(activity.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/ce/activity")
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = get_test_client(&server.url());
        let err = client.list_unfinished_tasks("externals").await.unwrap_err();
        assert!(matches!(err, SonarError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_error_envelope_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/ce/activity")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"errors":[{"msg":"Authentication is required"}]}"#)
            .create_async()
            .await;

        let client = get_test_client(&server.url());
        let err = client.list_unfinished_tasks("externals").await.unwrap_err();
        assert!(matches!(err, SonarError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_error() {
        let client = get_test_client("http://127.0.0.1:1/");
        let err = client.list_unfinished_tasks("externals").await.unwrap_err();
        assert!(matches!(err, SonarError::Request { .. }));
    }
}
