//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `IDP_CREDENTIALS_FILE` - Path to the service credential JSON file
//!   (`{"project_id": "...", "api_token": "..."}`)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3007)
//! - `IDP_API_URL` - Identity provider API base URL
//!   (default: <https://identitytoolkit.googleapis.com>)

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_PROVIDER_API_URL: &str = "https://identitytoolkit.googleapis.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Failed to read credential file {0}: {1}")]
    CredentialsRead(String, String),
    #[error("Failed to parse credential file {0}: {1}")]
    CredentialsParse(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Identity provider configuration
    pub provider: ProviderConfig,
}

/// Identity provider API configuration.
///
/// Implements `Debug` manually to redact the service credential.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Provider API base URL (overridden in tests to point at a mock)
    pub api_url: String,
    /// Provider project identifier
    pub project_id: String,
    /// Service account bearer token (HIGH PRIVILEGE - full user management)
    pub api_token: SecretString,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_url", &self.api_url)
            .field("project_id", &self.project_id)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

/// Service credential as stored in the local secret file.
///
/// Resolved once at startup from an explicit file path; the token is
/// expected to be ready to use as a bearer credential.
#[derive(Deserialize)]
struct ServiceCredential {
    project_id: String,
    api_token: String,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present, then
    /// reads and parses the service credential file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the credential file cannot be read or parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3007")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;

        let credentials_path = get_required_env("IDP_CREDENTIALS_FILE")?;
        let api_url = get_env_or_default("IDP_API_URL", DEFAULT_PROVIDER_API_URL);
        let provider = ProviderConfig::from_credential_file(api_url, Path::new(&credentials_path))?;

        Ok(Self {
            host,
            port,
            provider,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ProviderConfig {
    /// Load provider configuration from a service credential file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or is not a valid
    /// credential document.
    pub fn from_credential_file(api_url: String, path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::CredentialsRead(path.display().to_string(), e.to_string())
        })?;
        let credential: ServiceCredential = serde_json::from_str(&raw).map_err(|e| {
            ConfigError::CredentialsParse(path.display().to_string(), e.to_string())
        })?;

        Ok(Self {
            api_url,
            project_id: credential.project_id,
            api_token: SecretString::from(credential.api_token),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
