//! Console form page handler.

use askama::Template;
use axum::response::Html;
use tracing::instrument;

use super::users::render;

/// Form page template with one form per operation.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

/// Console form page handler.
#[instrument]
pub async fn index() -> Html<String> {
    render(&IndexTemplate)
}
