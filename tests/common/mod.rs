use chatbridge::configuration::{get_configuration, Settings};
use chatbridge::repository::MemoryRepository;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Arc;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub address: String,
    pub repository: Arc<MemoryRepository>,
    pub gemini: MockServer,
    pub openrouter: MockServer,
    pub client: reqwest::Client,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Starts the server on a random port against in-memory storage and mock
/// upstreams. `customize` runs after the test defaults are applied.
pub async fn spawn_app_with<F>(customize: F) -> TestApp
where
    F: FnOnce(&mut Settings),
{
    let gemini = MockServer::start().await;
    let openrouter = MockServer::start().await;

    let mut configuration = get_configuration().expect("Failed to get configuration");
    configuration.auth.password_cost = 4;
    configuration.quota.anonymous_message_limit = 3;
    configuration.connectors.gemini.base_url = gemini.uri();
    configuration.connectors.gemini.api_key = Some("gemini-test-key".to_string());
    configuration.connectors.openrouter.base_url = openrouter.uri();
    configuration.connectors.openrouter.api_key = Some("openrouter-test-key".to_string());
    customize(&mut configuration);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let repository = Arc::new(MemoryRepository::new());
    let server = chatbridge::startup::run(listener, repository.clone(), configuration)
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        repository,
        gemini,
        openrouter,
        client: reqwest::Client::new(),
    }
}

pub async fn mount_gemini_reply(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1beta/models/[^/]+:generateContent$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": text }] } }
            ]
        })))
        .mount(server)
        .await;
}

pub async fn mount_openrouter_reply(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": text } }
            ]
        })))
        .mount(server)
        .await;
}

/// `name=value` of the session cookie set by the response.
pub fn session_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("chatbridge_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Registers a user and returns its session cookie.
    pub async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/api/register",
                &json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
        session_cookie(&response).expect("register sets the session cookie")
    }

    pub async fn anonymous_session(&self, session_id: &str) -> Value {
        self.client
            .get(self.url("/api/anonymous/session"))
            .query(&[("sessionId", session_id)])
            .send()
            .await
            .expect("Failed to execute request.")
            .json()
            .await
            .expect("session body is json")
    }

    pub async fn send_anonymous(&self, session_id: &str, content: &str, model_id: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/anonymous/messages"))
            .query(&[("sessionId", session_id)])
            .json(&json!({ "content": content, "modelId": model_id }))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
