pub mod activity;
pub mod qualitygate;

pub use activity::ActivityOperations;
pub use qualitygate::QualityGateOperations;

/// Super-trait combining the SonarQube Web API operations used by the gate check.
pub trait SonarApi: ActivityOperations + QualityGateOperations {}

impl<T> SonarApi for T where T: ActivityOperations + QualityGateOperations {}
