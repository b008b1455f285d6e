#![allow(dead_code)]

use axum::{
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use darija_translator::config::{Config, ServiceConfig, TransportMode};

pub const USERNAME: &str = "user";
pub const PASSWORD: &str = "user123";
/// base64("user:user123")
pub const EXPECTED_AUTH: &str = "Basic dXNlcjp1c2VyMTIz";

pub const HELLO_RESPONSE: &str = r#"{
    "originalText": "Hello, how are you?",
    "translatedText": "Salam, kidayer?",
    "sourceLanguage": "en",
    "targetLanguage": "darija",
    "timestamp": 1700000000000,
    "status": "success"
}"#;

/// What the fake translation service saw
#[derive(Clone, Default)]
pub struct Recorder {
    pub translate_calls: Arc<AtomicUsize>,
    pub health_calls: Arc<AtomicUsize>,
    pub bodies: Arc<Mutex<Vec<Value>>>,
    pub auth_headers: Arc<Mutex<Vec<Option<String>>>>,
}

impl Recorder {
    pub fn translate_calls(&self) -> usize {
        self.translate_calls.load(Ordering::SeqCst)
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.auth_headers.lock().unwrap().clone()
    }

    fn record_auth(&self, headers: &HeaderMap) {
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        self.auth_headers.lock().unwrap().push(auth);
    }
}

pub struct MockService {
    pub base_url: String,
    pub recorder: Recorder,
}

/// Start a fake translation service on an ephemeral port
pub async fn spawn_mock_service(
    translate_status: StatusCode,
    translate_body: &str,
    health_status: StatusCode,
) -> MockService {
    let recorder = Recorder::default();
    let translate_body = translate_body.to_string();

    let translate_recorder = recorder.clone();
    let health_recorder = recorder.clone();

    let app = Router::new()
        .route(
            "/translator/translate",
            post(move |headers: HeaderMap, payload: String| async move {
                translate_recorder.translate_calls.fetch_add(1, Ordering::SeqCst);
                translate_recorder.record_auth(&headers);
                let parsed = serde_json::from_str(&payload).unwrap_or(Value::Null);
                translate_recorder.bodies.lock().unwrap().push(parsed);
                (
                    translate_status,
                    [(header::CONTENT_TYPE, "application/json")],
                    translate_body,
                )
            }),
        )
        .route(
            "/translator/health",
            get(move |headers: HeaderMap| async move {
                health_recorder.health_calls.fetch_add(1, Ordering::SeqCst);
                health_recorder.record_auth(&headers);
                (
                    health_status,
                    [(header::CONTENT_TYPE, "application/json")],
                    r#"{"status":"Translation service is running","timestamp":1700000000000}"#,
                )
            }),
        );

    let base_url = spawn_app(app).await;
    MockService { base_url, recorder }
}

/// Serve `app` on 127.0.0.1 with an OS-assigned port and return its base URL
pub async fn spawn_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on
pub async fn refused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn direct_config(base_url: &str) -> ServiceConfig {
    ServiceConfig {
        transport: TransportMode::Direct,
        base_url: base_url.to_string(),
        username: USERNAME.to_string(),
        password: PASSWORD.to_string(),
        timeout_secs: 5,
        ..ServiceConfig::default()
    }
}

pub fn proxied_config(proxy_url: &str) -> ServiceConfig {
    ServiceConfig {
        transport: TransportMode::Proxied,
        proxy_url: proxy_url.to_string(),
        timeout_secs: 5,
        ..ServiceConfig::default()
    }
}

pub fn proxy_config(upstream_url: &str) -> Config {
    Config {
        service_config: direct_config(upstream_url),
        ..Config::default()
    }
}
