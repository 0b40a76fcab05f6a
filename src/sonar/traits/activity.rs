use async_trait::async_trait;

use crate::sonar::error::SonarError;
use crate::sonar::model::TaskActivity;

/// Trait for Compute Engine activity operations
#[async_trait]
pub trait ActivityOperations: Send + Sync {
    /// List tasks of the given project that are still `PENDING` or `IN_PROGRESS`
    async fn list_unfinished_tasks(&self, project_key: &str) -> Result<TaskActivity, SonarError>;
}
