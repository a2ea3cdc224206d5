//! Typed HTTP client for the prospection backend
//!
//! Every call site goes through the same request path: build the URL from
//! the configured base, attach the bearer token and optional CSRF header,
//! send, then map non-2xx responses to [`ProspectError::Api`] carrying the
//! backend's `message` field when the body has one. Transport failures map
//! to [`ProspectError::Http`]. No call site handles HTTP plumbing itself.

use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

use crate::api::types::{
    AddQuotaRequest, ChangePasswordRequest, Commercial, CommercialRequest, CommercialUpdate,
    GrantPermissionsRequest, LoginRequest, Permission, Prospection, ProspectionRequest,
    ProspectionUpdate, QuotaUpdate, ResetPasswordRequest, SuiviRequest,
};
use crate::api::types::{
    Quota, ROUTE_ADD_PERMISSION, ROUTE_ADD_QUOTA, ROUTE_CHANGE_PASSWORD, ROUTE_COMMERCIALS,
    ROUTE_LOGIN, ROUTE_PERMISSIONS, ROUTE_PROSPECTIONS, ROUTE_QUOTAS, ROUTE_RESET_PASSWORD,
    ROUTE_SUIVIS,
};
use crate::config::ApiConfig;
use crate::error::{ProspectError, Result};

/// Header carrying the CSRF token when one is configured
pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// Backend API client
///
/// Holds the base URL, the session's bearer token when one is attached, and
/// the optional CSRF token. Cheap to construct per command.
///
/// # Examples
///
/// ```no_run
/// use prospect::api::ApiClient;
/// use prospect::config::ApiConfig;
///
/// # tokio_test::block_on(async {
/// let config = ApiConfig::default();
/// let client = ApiClient::new(&config).unwrap().with_token("tok_abc123");
/// let commercials = client.list_commercials().await.unwrap();
/// println!("{} commerciaux", commercials.len());
/// # });
/// ```
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    csrf_token: Option<String>,
}

impl ApiClient {
    /// Create a client from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("prospect/0.2.0")
            .build()
            .map_err(|e| {
                ProspectError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
            csrf_token: config.csrf_token.clone(),
        })
    }

    /// Attach the session's bearer token for protected routes
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL the client was configured with
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_headers(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(csrf) = &self.csrf_token {
            request = request.header(CSRF_HEADER, csrf);
        }
        request
    }

    async fn execute(&self, request: RequestBuilder, context: &str) -> Result<Response> {
        let response = self.apply_headers(request).send().await.map_err(|e| {
            tracing::warn!("Request failed ({}): {}", context, e);
            ProspectError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            tracing::error!("Backend returned {} ({}): {}", status, context, message);
            return Err(ProspectError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        Ok(response)
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
        context: &str,
    ) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse response ({}): {}", context, e);
            ProspectError::Http(e).into()
        })
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    /// Log in as responsable and return the raw session payload.
    ///
    /// The payload shape varies across backend revisions, so it is returned
    /// untyped; the caller extracts the token and stores the rest verbatim.
    pub async fn login(&self, request: &LoginRequest) -> Result<serde_json::Value> {
        let url = self.url(ROUTE_LOGIN);
        tracing::debug!("Logging in at {}", url);
        let response = self
            .execute(self.client.post(&url).json(request), "login")
            .await?;
        self.parse(response, "login").await
    }

    /// Request a password reset email
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<()> {
        let url = self.url(ROUTE_RESET_PASSWORD);
        tracing::debug!("Requesting password reset at {}", url);
        self.execute(self.client.post(&url).json(request), "reset password")
            .await?;
        Ok(())
    }

    /// Change the password of the user with the given id
    pub async fn change_password(
        &self,
        user_id: u64,
        request: &ChangePasswordRequest,
    ) -> Result<()> {
        let url = self.url(&format!("{}/{}", ROUTE_CHANGE_PASSWORD, user_id));
        tracing::debug!("Changing password at {}", url);
        self.execute(self.client.post(&url).json(request), "change password")
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Commercials
    // -----------------------------------------------------------------------

    /// Fetch the full commercial collection
    pub async fn list_commercials(&self) -> Result<Vec<Commercial>> {
        let url = self.url(ROUTE_COMMERCIALS);
        tracing::debug!("Fetching commercials from {}", url);
        let response = self.execute(self.client.get(&url), "list commercials").await?;
        self.parse(response, "list commercials").await
    }

    /// Fetch a single commercial by id
    pub async fn get_commercial(&self, id: u64) -> Result<Commercial> {
        let url = self.url(&format!("{}/{}", ROUTE_COMMERCIALS, id));
        tracing::debug!("Fetching commercial {} from {}", id, url);
        let response = self.execute(self.client.get(&url), "get commercial").await?;
        self.parse(response, "get commercial").await
    }

    pub async fn add_commercial(&self, request: &CommercialRequest) -> Result<()> {
        let url = self.url(ROUTE_COMMERCIALS);
        tracing::debug!("Adding commercial at {}", url);
        self.execute(self.client.post(&url).json(request), "add commercial")
            .await?;
        Ok(())
    }

    pub async fn update_commercial(&self, id: u64, request: &CommercialUpdate) -> Result<()> {
        let url = self.url(&format!("{}/{}", ROUTE_COMMERCIALS, id));
        tracing::debug!("Updating commercial {} at {}", id, url);
        self.execute(self.client.put(&url).json(request), "update commercial")
            .await?;
        Ok(())
    }

    pub async fn delete_commercial(&self, id: u64) -> Result<()> {
        let url = self.url(&format!("{}/{}", ROUTE_COMMERCIALS, id));
        tracing::debug!("Deleting commercial {} at {}", id, url);
        self.execute(self.client.delete(&url), "delete commercial")
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Quotas
    // -----------------------------------------------------------------------

    /// Fetch all quotas joined with their commercial
    pub async fn list_quotas(&self) -> Result<Vec<Quota>> {
        let url = self.url(ROUTE_QUOTAS);
        tracing::debug!("Fetching quotas from {}", url);
        let response = self.execute(self.client.get(&url), "list quotas").await?;
        self.parse(response, "list quotas").await
    }

    /// Create a quota for a commercial
    pub async fn add_quota(&self, request: &AddQuotaRequest) -> Result<()> {
        let url = self.url(ROUTE_ADD_QUOTA);
        tracing::debug!("Adding quota at {}", url);
        self.execute(self.client.post(&url).json(request), "add quota")
            .await?;
        Ok(())
    }

    pub async fn update_quota(&self, id: u64, request: &QuotaUpdate) -> Result<()> {
        let url = self.url(&format!("{}/{}", ROUTE_QUOTAS, id));
        tracing::debug!("Updating quota {} at {}", id, url);
        self.execute(self.client.put(&url).json(request), "update quota")
            .await?;
        Ok(())
    }

    pub async fn delete_quota(&self, id: u64) -> Result<()> {
        let url = self.url(&format!("{}/{}", ROUTE_QUOTAS, id));
        tracing::debug!("Deleting quota {} at {}", id, url);
        self.execute(self.client.delete(&url), "delete quota").await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Prospections
    // -----------------------------------------------------------------------

    /// Fetch the full prospection collection
    pub async fn list_prospections(&self) -> Result<Vec<Prospection>> {
        let url = self.url(ROUTE_PROSPECTIONS);
        tracing::debug!("Fetching prospections from {}", url);
        let response = self
            .execute(self.client.get(&url), "list prospections")
            .await?;
        self.parse(response, "list prospections").await
    }

    /// Fetch a single prospection with its follow-ups
    pub async fn get_prospection(&self, id: u64) -> Result<Prospection> {
        let url = self.url(&format!("{}/{}", ROUTE_PROSPECTIONS, id));
        tracing::debug!("Fetching prospection {} from {}", id, url);
        let response = self.execute(self.client.get(&url), "get prospection").await?;
        self.parse(response, "get prospection").await
    }

    pub async fn add_prospection(&self, request: &ProspectionRequest) -> Result<()> {
        let url = self.url(ROUTE_PROSPECTIONS);
        tracing::debug!("Adding prospection at {}", url);
        self.execute(self.client.post(&url).json(request), "add prospection")
            .await?;
        Ok(())
    }

    pub async fn update_prospection(&self, id: u64, request: &ProspectionUpdate) -> Result<()> {
        let url = self.url(&format!("{}/{}", ROUTE_PROSPECTIONS, id));
        tracing::debug!("Updating prospection {} at {}", id, url);
        self.execute(self.client.put(&url).json(request), "update prospection")
            .await?;
        Ok(())
    }

    pub async fn delete_prospection(&self, id: u64) -> Result<()> {
        let url = self.url(&format!("{}/{}", ROUTE_PROSPECTIONS, id));
        tracing::debug!("Deleting prospection {} at {}", id, url);
        self.execute(self.client.delete(&url), "delete prospection")
            .await?;
        Ok(())
    }

    /// Attach a follow-up note to a prospection
    pub async fn add_suivi(&self, prospection_id: u64, request: &SuiviRequest) -> Result<()> {
        let url = self.url(&format!("{}/{}", ROUTE_SUIVIS, prospection_id));
        tracing::debug!("Adding follow-up to prospection {} at {}", prospection_id, url);
        self.execute(self.client.post(&url).json(request), "add follow-up")
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Permissions
    // -----------------------------------------------------------------------

    /// Fetch all grantable permissions
    pub async fn list_permissions(&self) -> Result<Vec<Permission>> {
        let url = self.url(ROUTE_PERMISSIONS);
        tracing::debug!("Fetching permissions from {}", url);
        let response = self
            .execute(self.client.get(&url), "list permissions")
            .await?;
        self.parse(response, "list permissions").await
    }

    /// Replace the permission set granted to a commercial
    pub async fn grant_permissions(
        &self,
        commercial_id: u64,
        request: &GrantPermissionsRequest,
    ) -> Result<()> {
        let url = self.url(&format!("{}/{}", ROUTE_ADD_PERMISSION, commercial_id));
        tracing::debug!("Granting permissions to commercial {} at {}", commercial_id, url);
        self.execute(self.client.post(&url).json(request), "grant permissions")
            .await?;
        Ok(())
    }
}

/// Extract the backend's `message` field from an error body, falling back to
/// the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
