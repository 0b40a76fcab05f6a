use std::fmt::{Display, Formatter};

use log::error;
use serde::{Deserialize, Serialize};

use super::ApiErrorResponse;
use super::truncate;
use crate::sonar::error::SonarError;

/// Quality Gate verdict computed by the server for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GateStatus {
    Ok,
    Warn,
    Error,
    None,
    Other(String),
}

impl GateStatus {
    pub fn is_ok(&self) -> bool {
        *self == GateStatus::Ok
    }
}

impl From<String> for GateStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OK" => GateStatus::Ok,
            "WARN" => GateStatus::Warn,
            "ERROR" => GateStatus::Error,
            "NONE" => GateStatus::None,
            _ => GateStatus::Other(value),
        }
    }
}

impl From<GateStatus> for String {
    fn from(value: GateStatus) -> Self {
        value.to_string()
    }
}

impl Display for GateStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GateStatus::Ok => write!(f, "OK"),
            GateStatus::Warn => write!(f, "WARN"),
            GateStatus::Error => write!(f, "ERROR"),
            GateStatus::None => write!(f, "NONE"),
            GateStatus::Other(status) => write!(f, "{status}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStatus {
    pub status: GateStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatusResponse {
    pub project_status: ProjectStatus,
}

impl ProjectStatusResponse {
    /// Decode an `api/qualitygates/project_status` body.
    ///
    /// The body is parsed once. A non-empty `errors` list takes priority and is
    /// reported as [`SonarError::Api`]; only otherwise is the success shape read.
    pub fn decode(body: &str) -> Result<Self, SonarError> {
        let decode_error = |e: serde_json::Error| {
            error!("Failed to decode project status response. Error: {e}");
            error!("Response body (first 500 chars): {}", truncate(body));
            SonarError::Decode {
                source: e,
                body: body.to_string(),
            }
        };

        let value: serde_json::Value = serde_json::from_str(body).map_err(decode_error)?;

        let envelope = ApiErrorResponse::deserialize(&value).map_err(decode_error)?;
        if envelope.is_error() {
            return Err(SonarError::Api {
                messages: envelope.messages(),
                body: body.to_string(),
            });
        }

        ProjectStatusResponse::deserialize(value).map_err(decode_error)
    }
}
