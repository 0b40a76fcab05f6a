use serde::{Deserialize, Serialize};
use strum::Display;

/// Compute Engine task state as reported by `api/ce/activity`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Success,
    Failed,
    Canceled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Statuses of tasks that still block the Quality Gate evaluation.
    pub const UNFINISHED: [TaskStatus; 2] = [TaskStatus::Pending, TaskStatus::InProgress];

    /// Comma separated value for the `status` query parameter.
    pub fn query_value(statuses: &[TaskStatus]) -> String {
        statuses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A single background task of the Compute Engine.
#[allow(clippy::struct_field_names)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    pub organization: Option<String>,
    pub id: String,
    #[serde(alias = "type")]
    pub task_type: Option<String>,
    pub component_id: Option<String>,
    pub component_key: Option<String>,
    pub component_name: Option<String>,
    pub component_qualifier: Option<String>,
    pub status: TaskStatus,
    pub submitted_at: Option<String>,
    pub started_at: Option<String>,
    pub executed_at: Option<String>,
    pub execution_time_ms: Option<i64>,
    pub logs: bool,
    pub error_message: Option<String>,
    pub has_error_stacktrace: bool,
    pub has_scanner_context: bool,
}

/// Tasks currently pending or in progress for one component.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskActivity {
    pub tasks: Vec<Task>,
}

impl TaskActivity {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use rstest::rstest;

    const ACTIVITY: &str = indoc! {r#"
        {
          "tasks": [
            {
              "organization": "default-organization",
              "id": "AVAn5RKqYwETbXvgas-I",
              "type": "REPORT",
              "componentId": "AVAn5RJmYwETbXvgas-H",
              "componentKey": "externals",
              "componentName": "Externals",
              "componentQualifier": "TRK",
              "status": "IN_PROGRESS",
              "submittedAt": "2015-10-02T11:32:15+0200",
              "startedAt": "2015-10-02T11:32:16+0200",
              "executionTimeMs": 5286,
              "logs": false,
              "hasScannerContext": true
            },
            {
              "id": "AVAn5RKqYwETbXvgas-J",
              "taskType": "REPORT",
              "componentKey": "externals",
              "status": "PENDING",
              "submittedAt": "2015-10-02T11:32:17+0200"
            }
          ]
        }
    "#};

    #[test]
    fn decodes_activity() {
        let activity: TaskActivity = serde_json::from_str(ACTIVITY).unwrap();
        assert_eq!(activity.len(), 2);

        let first = &activity.tasks[0];
        assert_eq!(first.task_type.as_deref(), Some("REPORT"));
        assert_eq!(first.component_key.as_deref(), Some("externals"));
        assert_eq!(first.status, TaskStatus::InProgress);
        assert_eq!(first.execution_time_ms, Some(5286));
        assert!(first.has_scanner_context);
        assert!(first.error_message.is_none());

        let second = &activity.tasks[1];
        assert_eq!(second.task_type.as_deref(), Some("REPORT"));
        assert_eq!(second.status, TaskStatus::Pending);
        assert!(second.executed_at.is_none());
    }

    #[test]
    fn empty_activity() {
        let activity: TaskActivity = serde_json::from_str(r#"{"tasks":[]}"#).unwrap();
        assert!(activity.is_empty());
    }

    #[test]
    fn body_without_tasks_is_rejected() {
        let result = serde_json::from_str::<TaskActivity>(r#"{"errors":[{"msg":"Unauthorized"}]}"#);
        assert!(result.is_err());
    }

    #[rstest]
    #[case("PENDING", TaskStatus::Pending)]
    #[case("IN_PROGRESS", TaskStatus::InProgress)]
    #[case("SUCCESS", TaskStatus::Success)]
    #[case("FAILED", TaskStatus::Failed)]
    #[case("CANCELED", TaskStatus::Canceled)]
    #[case("SOMETHING_NEW", TaskStatus::Unknown)]
    fn decodes_status(#[case] raw: &str, #[case] expected: TaskStatus) {
        let status: TaskStatus = serde_json::from_str(&format!("\"{raw}\"")).unwrap();
        assert_eq!(status, expected);
    }

    #[test]
    fn unfinished_query_value() {
        assert_eq!(
            TaskStatus::query_value(&TaskStatus::UNFINISHED),
            "PENDING,IN_PROGRESS"
        );
    }
}
