mod activity;
pub mod base;
mod qualitygate;

use base::BaseClient;

use crate::sonar::config::ServerConfig;
use crate::sonar::error::SonarError;

/// SonarQube Web API client implementing the operation traits.
#[derive(Debug, Clone)]
pub struct SonarClient {
    base: BaseClient,
}

impl SonarClient {
    pub fn new(config: &ServerConfig) -> Result<Self, SonarError> {
        Ok(Self {
            base: BaseClient::try_from(config)?,
        })
    }
}
