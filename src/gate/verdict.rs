use std::io::{self, Write};

use log::{error, info};

use crate::sonar::error::SonarError;
use crate::sonar::model::GateStatus;
use crate::sonar::traits::QualityGateOperations;

const SEPARATOR: &str = "==============================================";

/// Outcome of reading a project's Quality Gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    Passed,
    NotPassed(GateStatus),
    /// The status could not be obtained (request, decode or API error).
    Unavailable,
}

impl GateVerdict {
    pub fn is_passed(&self) -> bool {
        *self == GateVerdict::Passed
    }
}

/// Query the Quality Gate of `project_key` and report the verdict on `out`.
///
/// Only the literal status `OK` passes. Errors of the query are reported and
/// turned into [`GateVerdict::Unavailable`]; only a failing `out` is an error.
pub async fn check_quality_gate<C, W>(client: &C, project_key: &str, out: &mut W) -> io::Result<GateVerdict>
where
    C: QualityGateOperations + ?Sized,
    W: Write,
{
    let project_status = match client.get_project_status(project_key).await {
        Ok(project_status) => project_status,
        Err(e) => {
            error!("Project status request for {project_key} failed: {e}");
            if let SonarError::Api { body, .. } | SonarError::Decode { body, .. } = &e {
                writeln!(out, "{body}")?;
            }
            writeln!(out, "Failed to get project status for projectKey {project_key}")?;
            return Ok(GateVerdict::Unavailable);
        }
    };

    writeln!(out, "\n{SEPARATOR}")?;
    writeln!(out, "Project Status: {}", project_status.status)?;
    writeln!(out, "{SEPARATOR}")?;

    let verdict = if project_status.status.is_ok() {
        GateVerdict::Passed
    } else {
        GateVerdict::NotPassed(project_status.status)
    };
    info!("Quality Gate verdict for {project_key}: {verdict:?}");
    Ok(verdict)
}
