use async_trait::async_trait;

use crate::sonar::error::SonarError;
use crate::sonar::model::ProjectStatus;

/// Trait for Quality Gate operations
#[async_trait]
pub trait QualityGateOperations: Send + Sync {
    /// Get the Quality Gate status of a project.
    ///
    /// A response carrying a non-empty error envelope is reported as
    /// [`SonarError::Api`] even when the HTTP status is 200.
    async fn get_project_status(&self, project_key: &str) -> Result<ProjectStatus, SonarError>;
}
