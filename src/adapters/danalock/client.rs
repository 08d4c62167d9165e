//! Danalock cloud adapter.
//!
//! Implements the `LockGateway` trait against the vendor's REST API and
//! bridge service. Authentication is an OAuth2 password grant; the access
//! token is cached in-process and refreshed once when a request comes back
//! 401. A second consecutive 401 surfaces as an authentication error.

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use async_trait::async_trait;

use crate::config::LockApiConfig;
use crate::domain::lock::{BridgeCommand, BridgeJob, BridgeResponse, Lock, PairedDevice};
use crate::ports::{GatewayError, LockGateway};

use super::dto::{ExecuteRequest, ExecuteResponse, PollRequest, PollResponse, TokenResponse};

/// OAuth2 client id registered for the web frontend; the API accepts it for
/// password grants with an empty secret.
const OAUTH_CLIENT_ID: &str = "danalock-web";

/// Danalock API configuration.
#[derive(Clone)]
pub struct DanalockConfig {
    /// Account username.
    username: String,

    /// Account password, exchanged for bearer tokens.
    password: SecretString,

    /// Base URL for the cloud API.
    api_base_url: String,

    /// Base URL for the bridge execute/poll service.
    bridge_base_url: String,
}

impl DanalockConfig {
    /// Create a new configuration with the vendor's production endpoints.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
            api_base_url: "https://api.danalock.com".to_string(),
            bridge_base_url: "https://bridge.danalockservices.com".to_string(),
        }
    }

    /// Set custom API and bridge base URLs (for testing).
    pub fn with_base_urls(
        mut self,
        api_base_url: impl Into<String>,
        bridge_base_url: impl Into<String>,
    ) -> Self {
        self.api_base_url = api_base_url.into();
        self.bridge_base_url = bridge_base_url.into();
        self
    }
}

impl From<&LockApiConfig> for DanalockConfig {
    fn from(config: &LockApiConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            api_base_url: config.api_base_url.clone(),
            bridge_base_url: config.bridge_base_url.clone(),
        }
    }
}

/// Danalock cloud adapter.
///
/// Implements `LockGateway` for the vendor REST API.
pub struct DanalockClient {
    config: DanalockConfig,
    http_client: reqwest::Client,
    access_token: RwLock<Option<String>>,
}

impl DanalockClient {
    /// Create a new adapter with the given configuration.
    pub fn new(config: DanalockConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
            access_token: RwLock::new(None),
        }
    }

    /// Exchange credentials for a fresh access token and cache it.
    async fn authenticate(&self) -> Result<String, GatewayError> {
        let url = format!("{}/oauth2/token", self.config.api_base_url);

        let params = [
            ("grant_type", "password"),
            ("username", self.config.username.as_str()),
            ("password", self.config.password.expose_secret()),
            ("client_id", OAUTH_CLIENT_ID),
            ("client_secret", ""),
            ("scope", ""),
        ];

        let response = self
            .http_client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, "Lock cloud token exchange failed");
            return Err(GatewayError::authentication(format!(
                "Authentication failed (status {})",
                status.as_u16()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::invalid_response(e.to_string()))?;

        *self.access_token.write().await = Some(token.access_token.clone());
        Ok(token.access_token)
    }

    async fn cached_or_fresh_token(&self) -> Result<String, GatewayError> {
        if let Some(token) = self.access_token.read().await.clone() {
            return Ok(token);
        }
        self.authenticate().await
    }

    async fn send_with_token(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
        token: &str,
    ) -> Result<reqwest::Response, GatewayError> {
        let mut request = self.http_client.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))
    }

    /// Send an authenticated request, re-authenticating exactly once if the
    /// first attempt comes back 401.
    async fn authenticated_request(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, GatewayError> {
        let token = self.cached_or_fresh_token().await?;
        let response = self
            .send_with_token(method.clone(), url, body, &token)
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::debug!(url, "Access token rejected, re-authenticating once");
        let token = self.authenticate().await?;
        self.send_with_token(method, url, body, &token).await
    }

    /// Run an authenticated request and decode the JSON body, mapping
    /// residual non-2xx statuses (including a second 401) to errors.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
        context: &str,
    ) -> Result<T, GatewayError> {
        let response = self.authenticated_request(method, url, body).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(GatewayError::authentication(format!(
                "{}: still unauthorized after token refresh",
                context
            )));
        }
        if !status.is_success() {
            tracing::warn!(status = %status, context, "Lock cloud request failed");
            return Err(GatewayError::upstream(status.as_u16(), context));
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::invalid_response(format!("{}: {}", context, e)))
    }
}

#[async_trait]
impl LockGateway for DanalockClient {
    async fn list_locks(&self) -> Result<Vec<Lock>, GatewayError> {
        let url = format!("{}/locks/v1", self.config.api_base_url);
        self.fetch_json(Method::GET, &url, None, "Failed to get locks")
            .await
    }

    async fn paired_devices(
        &self,
        serial_number: &str,
    ) -> Result<Vec<PairedDevice>, GatewayError> {
        let url = format!(
            "{}/devices/v1/{}/paired_devices",
            self.config.api_base_url, serial_number
        );
        self.fetch_json(Method::GET, &url, None, "Failed to get paired devices")
            .await
    }

    async fn submit_command(&self, command: &BridgeCommand) -> Result<BridgeJob, GatewayError> {
        let url = format!("{}/bridge/v1/execute", self.config.bridge_base_url);
        let body = serde_json::to_value(ExecuteRequest::from(command))
            .map_err(|e| GatewayError::invalid_response(e.to_string()))?;

        tracing::debug!(
            device = %command.device,
            operation = command.command.operation(),
            "Submitting bridge command"
        );

        let response: ExecuteResponse = self
            .fetch_json(
                Method::POST,
                &url,
                Some(&body),
                "Failed to execute bridge command",
            )
            .await?;
        Ok(response.into())
    }

    async fn poll_job(&self, job: &BridgeJob) -> Result<BridgeResponse, GatewayError> {
        let url = format!("{}/bridge/v1/poll", self.config.bridge_base_url);
        let body = serde_json::to_value(PollRequest { id: job.id.clone() })
            .map_err(|e| GatewayError::invalid_response(e.to_string()))?;

        let response: PollResponse = self
            .fetch_json(
                Method::POST,
                &url,
                Some(&body),
                "Failed to poll bridge command",
            )
            .await?;
        Ok(response.into())
    }
}
