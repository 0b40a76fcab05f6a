use std::time::Duration;

use log::{debug, info};
use reqwest::{Method, StatusCode, Url};

use crate::sonar::config::ServerConfig;
use crate::sonar::error::SonarError;

/// Base HTTP client for SonarQube Web API communication.
/// Handles authentication and provides base request building functionality.
#[derive(Debug, Clone)]
pub struct BaseClient {
    pub client: reqwest::Client,
    pub config: ServerConfig,
}

impl BaseClient {
    pub fn new(config: ServerConfig) -> Result<Self, SonarError> {
        let mut client_builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .use_rustls_tls();

        // Configure proxy if specified in config (takes priority)
        if let Some(proxy_url) = &config.proxy {
            client_builder = client_builder.proxy(reqwest::Proxy::all(proxy_url)?);
            info!("🔀 Using proxy from config: {proxy_url}");
        } else {
            // Fall back to standard environment variables if no config proxy
            if let Ok(http_proxy) = std::env::var("HTTP_PROXY").or_else(|_| std::env::var("http_proxy")) {
                client_builder = client_builder.proxy(reqwest::Proxy::http(&http_proxy)?);
                info!("🔀 Using proxy from HTTP_PROXY: {http_proxy}");
            }
            if let Ok(https_proxy) = std::env::var("HTTPS_PROXY").or_else(|_| std::env::var("https_proxy")) {
                client_builder = client_builder.proxy(reqwest::Proxy::https(&https_proxy)?);
                info!("🔀 Using proxy from HTTPS_PROXY: {https_proxy}");
            }
        }

        let client = client_builder.build()?;
        Ok(Self { client, config })
    }

    /// Build a request against `endpoint` (relative to the server URL) with Basic Auth.
    pub fn base_api(&self, method: Method, endpoint: &str) -> Result<reqwest::RequestBuilder, SonarError> {
        // Ensure base URL ends with a trailing slash for proper path joining
        let mut base_endpoint = self.config.endpoint.clone();
        if !base_endpoint.ends_with('/') {
            base_endpoint.push('/');
        }

        let base_url = Url::parse(&base_endpoint)?;
        let url = base_url.join(endpoint)?;
        debug!("🔗 Request URL: {url}");

        let auth = &self.config.auth;
        Ok(self
            .client
            .request(method, url)
            .basic_auth(&auth.username, auth.password.as_deref()))
    }

    /// Issue one GET request and drain the whole response body.
    ///
    /// The HTTP status is returned alongside the body and is not interpreted here.
    pub async fn get_text(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<(StatusCode, String), SonarError> {
        let response = self
            .base_api(Method::GET, endpoint)?
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("{endpoint} answered {status} with {} bytes", body.len());
        Ok((status, body))
    }
}

impl TryFrom<&ServerConfig> for BaseClient {
    type Error = SonarError;

    fn try_from(config: &ServerConfig) -> Result<Self, Self::Error> {
        Self::new(config.clone())
    }
}
