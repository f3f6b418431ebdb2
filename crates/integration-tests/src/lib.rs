//! Integration test harness for Identity Admin.
//!
//! Spawns the full application on an ephemeral port with its provider URL
//! pointed at a [`wiremock`] mock server, so tests exercise the real router,
//! templates, and provider client over HTTP without touching a live provider.
//!
//! ```rust,ignore
//! let app = TestApp::spawn().await;
//!
//! Mock::given(method("GET"))
//!     .and(path(TestApp::accounts_path(":batchGet")))
//!     .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
//!     .mount(&app.provider)
//!     .await;
//!
//! let body = app.get("/list").await;
//! assert!(body.contains("No users found"));
//! ```

use secrecy::SecretString;
use wiremock::MockServer;

use identity_admin::config::{AdminConfig, ProviderConfig};
use identity_admin::provider::IdentityClient;
use identity_admin::state::AppState;

/// Project id baked into every test credential.
pub const TEST_PROJECT: &str = "demo-project";

/// A running application instance plus its mock provider.
pub struct TestApp {
    /// Base URL of the spawned admin server.
    pub base_url: String,
    /// Mock identity provider; mount expectations on this.
    pub provider: MockServer,
    /// HTTP client for driving the admin server.
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application against a fresh mock provider.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let provider = MockServer::start().await;

        let config = AdminConfig {
            host: "127.0.0.1".parse().expect("valid loopback address"),
            port: 0,
            provider: ProviderConfig {
                api_url: provider.uri(),
                project_id: TEST_PROJECT.to_string(),
                api_token: SecretString::from("test-token"),
            },
        };

        let state = AppState::new(config.clone(), IdentityClient::new(&config.provider));

        let listener = tokio::net::TcpListener::bind(config.socket_addr())
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            axum::serve(listener, identity_admin::app(state))
                .await
                .expect("Test server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            provider,
            client: reqwest::Client::new(),
        }
    }

    /// Provider accounts endpoint path for the test project.
    ///
    /// `action` is the custom-method suffix (`":lookup"`, `":update"`, ...)
    /// or empty for the collection itself.
    #[must_use]
    pub fn accounts_path(action: &str) -> String {
        format!("/v1/projects/{TEST_PROJECT}/accounts{action}")
    }

    /// GET a path on the admin server and return the response body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or is not HTTP 200.
    pub async fn get(&self, path_and_query: &str) -> String {
        let response = self
            .client
            .get(format!("{}{path_and_query}", self.base_url))
            .send()
            .await
            .expect("Failed to send GET request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.text().await.expect("Failed to read response body")
    }

    /// POST a form to a path on the admin server and return the response body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or is not HTTP 200.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> String {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await
            .expect("Failed to send POST request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.text().await.expect("Failed to read response body")
    }
}
