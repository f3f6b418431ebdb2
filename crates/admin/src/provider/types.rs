//! Wire types for the identity provider admin API.
//!
//! Field names follow the provider's JSON conventions (`localId`,
//! `displayName`, millisecond-epoch timestamp strings).

use serde::{Deserialize, Serialize};

/// A provider-owned user account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Opaque stable identifier, provider-assigned, immutable once created.
    pub local_id: String,
    /// Account email, uniqueness enforced by the provider.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Creation time, milliseconds since the Unix epoch (provider-managed).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last sign-in time, milliseconds since the Unix epoch (provider-managed).
    #[serde(default)]
    pub last_login_at: Option<String>,
}

/// Request body for creating a user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<&'a str>,
}

/// Request body for looking up a single user by uid.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest<'a> {
    pub local_id: [&'a str; 1],
}

/// Request body for updating a user.
///
/// Only the display name is ever touched; when `delete_attribute` names
/// `DISPLAY_NAME` the attribute is cleared instead.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest<'a> {
    pub local_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_attribute: Option<[&'a str; 1]>,
}

/// Request body for deleting a user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRequest<'a> {
    pub local_id: &'a str,
}

/// Response envelope for lookup and list operations.
///
/// The provider omits the `users` field entirely when there are no accounts.
#[derive(Debug, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

/// Error envelope returned by the provider on failure.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiError,
}

/// Structured provider error.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_deserialize_full() {
        let json = r#"{
            "localId": "abc123",
            "email": "a@b.com",
            "displayName": "Ada",
            "createdAt": "1700000000000",
            "lastLoginAt": "1700000100000"
        }"#;

        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.local_id, "abc123");
        assert_eq!(user.email.as_deref(), Some("a@b.com"));
        assert_eq!(user.display_name.as_deref(), Some("Ada"));
        assert_eq!(user.created_at.as_deref(), Some("1700000000000"));
    }

    #[test]
    fn test_user_record_deserialize_sparse() {
        // Optional fields may be absent entirely
        let user: UserRecord = serde_json::from_str(r#"{"localId": "abc123"}"#).unwrap();
        assert_eq!(user.local_id, "abc123");
        assert!(user.email.is_none());
        assert!(user.display_name.is_none());
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_users_response_missing_users_field() {
        let resp: UsersResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.users.is_empty());
    }

    #[test]
    fn test_update_request_clear_omits_display_name() {
        let req = UpdateUserRequest {
            local_id: "abc123",
            display_name: None,
            delete_attribute: Some(["DISPLAY_NAME"]),
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["localId"], "abc123");
        assert!(json.get("displayName").is_none());
        assert_eq!(json["deleteAttribute"][0], "DISPLAY_NAME");
        // Update requests never carry the email field
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_error_envelope_deserialize() {
        let json = r#"{"error": {"code": 400, "message": "EMAIL_EXISTS", "status": "ALREADY_EXISTS"}}"#;
        let envelope: ApiErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.code, 400);
        assert_eq!(envelope.error.message, "EMAIL_EXISTS");
        assert_eq!(envelope.error.status.as_deref(), Some("ALREADY_EXISTS"));
    }
}
