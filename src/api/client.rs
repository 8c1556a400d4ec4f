//! The reqwest-backed client.

use std::time::Duration;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::{extract_error_message, ApiError};
use crate::api::types::{
    CreatedPerson, ListResponse, NewForm, NewPerson, NewUser, OrgUnit, ReportForm, Role, User,
};
use crate::config::ApiConfig;

/// Client for the remote reporting API.
///
/// Cheap to clone; every clone shares the underlying connection pool, so
/// concurrent effect tasks reuse sockets.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token_env: String,
    request_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_env: config.token_env.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_seconds),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.list("users").await
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.list("roles").await
    }

    pub async fn list_forms(&self) -> Result<Vec<ReportForm>, ApiError> {
        self.list("forms").await
    }

    pub async fn list_org_units(&self) -> Result<Vec<OrgUnit>, ApiError> {
        self.list("orgunits").await
    }

    pub async fn create_person(&self, draft: &NewPerson) -> Result<CreatedPerson, ApiError> {
        self.post("persons", draft).await
    }

    pub async fn create_user(&self, draft: &NewUser) -> Result<User, ApiError> {
        self.post("users", draft).await
    }

    pub async fn create_form(&self, draft: &NewForm) -> Result<ReportForm, ApiError> {
        self.post("forms", draft).await
    }

    pub async fn delete_user(&self, uuid: &str) -> Result<(), ApiError> {
        self.delete("users", uuid).await
    }

    pub async fn delete_form(&self, uuid: &str) -> Result<(), ApiError> {
        self.delete("forms", uuid).await
    }

    async fn list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, ApiError> {
        let response = self.send(Method::GET, resource, None::<&()>).await?;
        let body: ListResponse<T> = decode(response, resource).await?;
        Ok(body.results)
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        resource: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::POST, resource, Some(body)).await?;
        decode(response, resource).await
    }

    async fn delete(&self, resource: &str, uuid: &str) -> Result<(), ApiError> {
        let endpoint = format!("{resource}/{uuid}");
        self.send(Method::DELETE, &endpoint, None::<&()>).await?;
        Ok(())
    }

    /// Issue one request and normalize the failure modes. Non-success
    /// statuses become [`ApiError::Status`] with the message dug out of the
    /// response body.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let request_id = Uuid::new_v4();
        tracing::debug!(%method, endpoint, %request_id, "api request");

        let mut request = self
            .http
            .request(method, &url)
            .header("x-request-id", request_id.to_string());
        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| {
            if source.is_timeout() {
                ApiError::Timeout {
                    endpoint: endpoint.to_string(),
                    seconds: self.request_timeout.as_secs(),
                }
            } else {
                ApiError::Transport {
                    endpoint: endpoint.to_string(),
                    source,
                }
            }
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(endpoint, status = status.as_u16(), %request_id, "api response");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(status.as_u16(), &body);
        tracing::warn!(endpoint, status = status.as_u16(), %message, "api error");
        Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        })
    }

    /// Bearer token from the configured environment variable, if set.
    /// Resolved per request so a token rotated mid-session is picked up.
    fn token(&self) -> Option<String> {
        if self.token_env.is_empty() {
            return None;
        }
        match std::env::var(&self.token_env) {
            Ok(token) if !token.trim().is_empty() => Some(token),
            _ => None,
        }
    }
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<T, ApiError> {
    response.json().await.map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}
