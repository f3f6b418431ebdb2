//! Identity provider admin API client (HIGH PRIVILEGE).
//!
//! The provider is the system of record for user accounts; this module only
//! relays administrative operations (create, lookup, list, update, delete)
//! over its REST surface and reflects back whatever it returns.
//!
//! # Architecture
//!
//! - One HTTP request per operation, no retries, no caching
//! - Bearer authentication with the service credential from [`crate::config`]
//! - Provider failures are folded into [`ProviderError`], one variant per
//!   failure category
//!
//! # Example
//!
//! ```rust,ignore
//! use identity_admin::provider::IdentityClient;
//!
//! let client = IdentityClient::new(&config.provider);
//!
//! let user = client.create_user("a@b.com", "secret123", None).await?;
//! let same = client.get_user(&user.local_id).await?;
//! client.delete_user(&user.local_id).await?;
//! ```

mod client;
pub mod types;

pub use client::IdentityClient;

use thiserror::Error;

/// Errors that can occur when interacting with the identity provider.
///
/// Each variant corresponds to one provider failure category; the payload
/// carries the provider's detail text for the rendered message.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No user exists for the given uid.
    #[error("user not found: {0}")]
    NotFound(String),

    /// A user with the same email already exists.
    #[error("a user with that email already exists: {0}")]
    AlreadyExists(String),

    /// The provider rejected the request (malformed email, weak password, ...).
    #[error("the provider rejected the request: {0}")]
    InvalidArgument(String),

    /// The provider could not service the request.
    #[error("the identity provider is unavailable: {0}")]
    Unavailable(String),

    /// HTTP request failed before a provider response was received.
    #[error("request to the identity provider failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a response we could not decode.
    #[error("unexpected response from the identity provider: {0}")]
    Response(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::NotFound("uid-123".to_string());
        assert_eq!(err.to_string(), "user not found: uid-123");

        let err = ProviderError::AlreadyExists("EMAIL_EXISTS".to_string());
        assert_eq!(
            err.to_string(),
            "a user with that email already exists: EMAIL_EXISTS"
        );

        let err = ProviderError::Unavailable("503 Service Unavailable".to_string());
        assert!(err.to_string().contains("unavailable"));
    }
}
