use serde::{Deserialize, Deserializer, Serialize};

/// Error envelope returned by the Web API, e.g. `{"errors":[{"msg":"..."}]}`.
/// Any JSON object decodes into it; only a non-empty `errors` list means failure.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<ApiErrorMessage>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ApiErrorMessage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorMessage {
    pub msg: String,
}

impl ApiErrorResponse {
    pub fn is_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn messages(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.msg.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_messages() {
        let response: ApiErrorResponse = serde_json::from_str(
            r#"{"errors":[{"msg":"Project not found"},{"msg":"Insufficient privileges"}]}"#,
        )
        .unwrap();
        assert!(response.is_error());
        assert_eq!(
            response.messages(),
            "Project not found; Insufficient privileges"
        );
    }

    #[test]
    fn success_body_is_not_an_error() {
        let response: ApiErrorResponse =
            serde_json::from_str(r#"{"projectStatus":{"status":"OK"}}"#).unwrap();
        assert!(!response.is_error());
    }

    #[test]
    fn null_errors_is_not_an_error() {
        let response: ApiErrorResponse =
            serde_json::from_str(r#"{"errors":null,"projectStatus":{"status":"OK"}}"#).unwrap();
        assert!(response.errors.is_empty());
        assert!(!response.is_error());
    }
}
