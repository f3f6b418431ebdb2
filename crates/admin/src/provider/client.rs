//! Identity provider REST client.
//!
//! Wraps the provider's project-scoped account endpoints. Every method is a
//! single request; cancellation and timeouts are left to `reqwest` and the
//! provider itself.

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::config::ProviderConfig;

use super::ProviderError;
use super::types::{
    ApiError, ApiErrorEnvelope, CreateUserRequest, DeleteUserRequest, LookupRequest, UpdateUserRequest,
    UserRecord, UsersResponse,
};

/// Attribute name the provider expects when clearing a display name.
const DISPLAY_NAME_ATTRIBUTE: &str = "DISPLAY_NAME";

/// Client for the identity provider's administrative API.
///
/// Constructed once at startup and shared read-only across requests.
#[derive(Clone)]
pub struct IdentityClient {
    /// HTTP client.
    client: Client,
    /// Provider API base URL.
    api_url: String,
    /// Provider project identifier.
    project_id: String,
    /// Service account bearer token.
    api_token: SecretString,
}

impl std::fmt::Debug for IdentityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityClient")
            .field("api_url", &self.api_url)
            .field("project_id", &self.project_id)
            .field("api_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl IdentityClient {
    /// Create a new provider client from configuration.
    #[must_use]
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            project_id: config.project_id.clone(),
            api_token: config.api_token.clone(),
        }
    }

    /// Build a project-scoped accounts endpoint URL.
    ///
    /// `action` is the provider's custom-method suffix (`":lookup"`,
    /// `":update"`, ...) or empty for the collection itself.
    fn accounts_url(&self, action: &str) -> String {
        format!(
            "{}/v1/projects/{}/accounts{action}",
            self.api_url, self.project_id
        )
    }

    /// Create a new user account.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::AlreadyExists`] for a duplicate email,
    /// [`ProviderError::InvalidArgument`] for a malformed email or weak
    /// password, or another category the provider surfaces.
    #[instrument(skip(self, password))]
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<UserRecord, ProviderError> {
        let request = CreateUserRequest {
            email,
            password,
            display_name,
        };

        let response = self
            .client
            .post(self.accounts_url(""))
            .bearer_auth(self.api_token.expose_secret())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let user: UserRecord = response
            .json()
            .await
            .map_err(|e| ProviderError::Response(e.to_string()))?;

        debug!(uid = %user.local_id, "User created");

        Ok(user)
    }

    /// Fetch a single user by uid.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] when no account matches the uid.
    #[instrument(skip(self))]
    pub async fn get_user(&self, uid: &str) -> Result<UserRecord, ProviderError> {
        let request = LookupRequest { local_id: [uid] };

        let response = self
            .client
            .post(self.accounts_url(":lookup"))
            .bearer_auth(self.api_token.expose_secret())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let result: UsersResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Response(e.to_string()))?;

        // The provider answers a lookup for an unknown uid with an empty set
        result
            .users
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NotFound(uid.to_string()))
    }

    /// List the provider's first page of users.
    ///
    /// No pagination cursor is requested; ordering is whatever the provider
    /// returns. Zero users is an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the provider rejects it.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, ProviderError> {
        let response = self
            .client
            .get(self.accounts_url(":batchGet"))
            .bearer_auth(self.api_token.expose_secret())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let result: UsersResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Response(e.to_string()))?;

        debug!(count = result.users.len(), "Listed users");

        Ok(result.users)
    }

    /// Update a user's display name, leaving every other field untouched.
    ///
    /// An absent display name clears the attribute via the provider's
    /// delete-attribute form; the email field is never part of the request.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] for an unknown uid.
    #[instrument(skip(self))]
    pub async fn update_user(
        &self,
        uid: &str,
        display_name: Option<&str>,
    ) -> Result<UserRecord, ProviderError> {
        let request = match display_name {
            Some(name) => UpdateUserRequest {
                local_id: uid,
                display_name: Some(name),
                delete_attribute: None,
            },
            None => UpdateUserRequest {
                local_id: uid,
                display_name: None,
                delete_attribute: Some([DISPLAY_NAME_ATTRIBUTE]),
            },
        };

        let response = self
            .client
            .post(self.accounts_url(":update"))
            .bearer_auth(self.api_token.expose_secret())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let user: UserRecord = response
            .json()
            .await
            .map_err(|e| ProviderError::Response(e.to_string()))?;

        debug!(uid = %user.local_id, "User updated");

        Ok(user)
    }

    /// Delete a user account.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] for an unknown uid.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, uid: &str) -> Result<(), ProviderError> {
        let request = DeleteUserRequest { local_id: uid };

        let response = self
            .client
            .post(self.accounts_url(":delete"))
            .bearer_auth(self.api_token.expose_secret())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        debug!(uid = %uid, "User deleted");

        Ok(())
    }
}

/// Fold a non-success provider response into a [`ProviderError`].
async fn error_from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ApiErrorEnvelope>(&body) {
        Ok(envelope) => classify_api_error(status, &envelope.error),
        Err(_) if status.is_server_error() => ProviderError::Unavailable(status.to_string()),
        Err(_) => ProviderError::Response(format!("{status}: {body}")),
    }
}

/// Map the provider's structured error onto a failure category.
fn classify_api_error(status: StatusCode, error: &ApiError) -> ProviderError {
    let detail = if error.message.is_empty() {
        status.to_string()
    } else {
        error.message.clone()
    };
    let category = error.status.as_deref().unwrap_or_default();

    if category == "NOT_FOUND" || error.message.contains("USER_NOT_FOUND") {
        ProviderError::NotFound(detail)
    } else if category == "ALREADY_EXISTS"
        || error.message.contains("EMAIL_EXISTS")
        || error.message.contains("DUPLICATE_EMAIL")
    {
        ProviderError::AlreadyExists(detail)
    } else if category == "UNAVAILABLE" || status.is_server_error() {
        ProviderError::Unavailable(detail)
    } else {
        // Remaining structured rejections (INVALID_EMAIL, WEAK_PASSWORD,
        // MISSING_PASSWORD, ...) are argument problems
        ProviderError::InvalidArgument(detail)
    }
}
