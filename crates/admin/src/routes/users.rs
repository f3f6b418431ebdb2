//! User CRUD route handlers.
//!
//! Each handler performs exactly one provider call and renders the result as
//! an HTML fragment. Provider failures are caught at the call site and
//! rendered through the category error template; nothing propagates further.

use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::instrument;

use crate::provider::ProviderError;
use crate::provider::types::UserRecord;
use crate::state::AppState;

/// Rendered in place of absent optional fields.
const PLACEHOLDER: &str = "—";

// =============================================================================
// Form / Query Inputs
// =============================================================================

/// Create form body.
///
/// Implements `Debug` manually to redact the password.
#[derive(Deserialize)]
pub struct CreateForm {
    pub email: String,
    pub password: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

impl std::fmt::Debug for CreateForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Single-uid query string (`/get?uid=...`).
#[derive(Debug, Deserialize)]
pub struct UidQuery {
    pub uid: String,
}

/// Update form body.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub uid: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

/// Delete form body.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub uid: String,
}

// =============================================================================
// Views & Templates
// =============================================================================

/// User view for templates, with placeholders already applied.
#[derive(Debug, Clone)]
pub struct UserView {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub created_at: String,
    pub last_sign_in: String,
}

impl From<&UserRecord> for UserView {
    fn from(user: &UserRecord) -> Self {
        Self {
            uid: user.local_id.clone(),
            email: user
                .email
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            display_name: user
                .display_name
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            created_at: format_millis(user.created_at.as_deref())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            last_sign_in: format_millis(user.last_login_at.as_deref())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        }
    }
}

/// Format a provider millisecond-epoch timestamp string for display.
fn format_millis(value: Option<&str>) -> Option<String> {
    let millis = value?.parse::<i64>().ok()?;
    let timestamp = chrono::DateTime::from_timestamp_millis(millis)?;
    Some(timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

/// Treat empty or whitespace-only form values as absent.
fn none_if_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Created-user fragment.
#[derive(Template)]
#[template(path = "users/created.html")]
pub struct CreatedTemplate {
    pub uid: String,
    pub email: String,
    pub created_at: String,
}

/// Single-user detail fragment.
#[derive(Template)]
#[template(path = "users/detail.html")]
pub struct UserDetailTemplate {
    pub user: UserView,
}

/// User listing fragment.
#[derive(Template)]
#[template(path = "users/list.html")]
pub struct UsersListTemplate {
    pub users: Vec<UserView>,
}

/// Updated-user fragment.
#[derive(Template)]
#[template(path = "users/updated.html")]
pub struct UpdatedTemplate {
    pub uid: String,
    pub display_name: String,
}

/// Deletion confirmation fragment.
#[derive(Template)]
#[template(path = "users/deleted.html")]
pub struct DeletedTemplate {
    pub uid: String,
}

/// Category error fragment.
#[derive(Template)]
#[template(path = "users/error.html")]
pub struct ErrorTemplate {
    pub heading: &'static str,
    pub message: String,
}

/// Render a template, degrading to a plain error string on render failure.
pub fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// Render a provider failure as the category error fragment.
fn render_error(heading: &'static str, err: &ProviderError) -> Html<String> {
    tracing::error!(error = %err, heading, "Provider call failed");
    render(&ErrorTemplate {
        heading,
        message: err.to_string(),
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a user from form input.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<CreateForm>,
) -> Html<String> {
    let display_name = none_if_empty(form.display_name.as_deref());

    match state
        .provider()
        .create_user(&form.email, &form.password, display_name)
        .await
    {
        Ok(user) => render(&CreatedTemplate {
            uid: user.local_id,
            email: user.email.unwrap_or(form.email),
            created_at: format_millis(user.created_at.as_deref())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        }),
        Err(e) => render_error("Error creating user", &e),
    }
}

/// Fetch a single user by uid.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Query(query): Query<UidQuery>) -> Html<String> {
    match state.provider().get_user(&query.uid).await {
        Ok(user) => render(&UserDetailTemplate {
            user: UserView::from(&user),
        }),
        Err(e) => render_error("Error fetching user", &e),
    }
}

/// List the provider's first page of users.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Html<String> {
    match state.provider().list_users().await {
        Ok(users) => render(&UsersListTemplate {
            users: users.iter().map(UserView::from).collect(),
        }),
        Err(e) => render_error("Error listing users", &e),
    }
}

/// Update a user's display name.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateForm>,
) -> Html<String> {
    let display_name = none_if_empty(form.display_name.as_deref());

    match state.provider().update_user(&form.uid, display_name).await {
        Ok(user) => render(&UpdatedTemplate {
            uid: user.local_id,
            display_name: user
                .display_name
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        }),
        Err(e) => render_error("Error updating user", &e),
    }
}

/// Delete a user by uid.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Html<String> {
    match state.provider().delete_user(&form.uid).await {
        Ok(()) => render(&DeletedTemplate { uid: form.uid }),
        Err(e) => render_error("Error deleting user", &e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_millis_valid() {
        // 2023-11-14T22:13:20Z
        let formatted = format_millis(Some("1700000000000")).unwrap();
        assert_eq!(formatted, "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn test_format_millis_absent_or_garbage() {
        assert!(format_millis(None).is_none());
        assert!(format_millis(Some("not-a-number")).is_none());
    }

    #[test]
    fn test_none_if_empty() {
        assert_eq!(none_if_empty(Some("Ada")), Some("Ada"));
        assert_eq!(none_if_empty(Some("  Ada  ")), Some("Ada"));
        assert_eq!(none_if_empty(Some("")), None);
        assert_eq!(none_if_empty(Some("   ")), None);
        assert_eq!(none_if_empty(None), None);
    }

    #[test]
    fn test_user_view_placeholders() {
        let user = UserRecord {
            local_id: "abc123".to_string(),
            email: Some("a@b.com".to_string()),
            display_name: None,
            created_at: Some("1700000000000".to_string()),
            last_login_at: None,
        };

        let view = UserView::from(&user);
        assert_eq!(view.uid, "abc123");
        assert_eq!(view.email, "a@b.com");
        assert_eq!(view.display_name, PLACEHOLDER);
        assert_eq!(view.created_at, "2023-11-14 22:13:20 UTC");
        assert_eq!(view.last_sign_in, PLACEHOLDER);
    }

    #[test]
    fn test_create_form_debug_redacts_password() {
        let form = CreateForm {
            email: "a@b.com".to_string(),
            password: "secret123".to_string(),
            display_name: None,
        };

        let debug_output = format!("{form:?}");
        assert!(debug_output.contains("a@b.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("secret123"));
    }

    #[test]
    fn test_error_template_renders_category_message() {
        let template = ErrorTemplate {
            heading: "Error fetching user",
            message: ProviderError::NotFound("abc123".to_string()).to_string(),
        };

        let html = template.render().unwrap();
        assert!(html.contains("Error fetching user"));
        assert!(html.contains("user not found: abc123"));
        assert!(html.contains(r#"<a href="/">"#));
    }

    #[test]
    fn test_list_template_empty_listing() {
        let template = UsersListTemplate { users: vec![] };
        let html = template.render().unwrap();
        assert!(html.contains("No users found"));
    }
}
