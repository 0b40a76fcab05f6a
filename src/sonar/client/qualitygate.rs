use async_trait::async_trait;
use log::{info, warn};

use super::SonarClient;
use crate::sonar::error::SonarError;
use crate::sonar::model::{ProjectStatus, ProjectStatusResponse};
use crate::sonar::traits::QualityGateOperations;

#[async_trait]
impl QualityGateOperations for SonarClient {
    async fn get_project_status(&self, project_key: &str) -> Result<ProjectStatus, SonarError> {
        let (status, body) = self
            .base
            .get_text(
                "api/qualitygates/project_status",
                &[("projectKey", project_key)],
            )
            .await?;

        match ProjectStatusResponse::decode(&body) {
            Ok(response) => {
                info!(
                    "Quality Gate status for {project_key}: {}",
                    response.project_status.status
                );
                Ok(response.project_status)
            }
            Err(e) => {
                warn!("Project status request for {project_key} failed ({status}): {e}");
                Err(e)
            }
        }
    }
}
