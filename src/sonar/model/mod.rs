pub mod error;
pub mod qualitygate;
pub mod task;

// Re-export common types for easier access
pub use error::ApiErrorResponse;
pub use qualitygate::{GateStatus, ProjectStatus, ProjectStatusResponse};
pub use task::{TaskActivity, TaskStatus};

/// First 500 characters of a response body, for logging decode failures.
pub(crate) fn truncate(body: &str) -> String {
    body.chars().take(500).collect()
}
