#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use deal4bank_api::cache::SiteCache;
use deal4bank_api::config::ServerConfig;
use deal4bank_api::router::build_app_router;
use deal4bank_api::state::AppState;
use deal4bank_api::ws::WsManager;
use deal4bank_assist::{PromptFlow, PromptFlowError};
use deal4bank_core::site::DEFAULT_CATALOG_HEADING;
use deal4bank_db::MemoryStore;
use deal4bank_events::{EmailConfig, EmailError, EmailSender, OutgoingEmail};

/// Mailbox recorded as the sender of outbound mail in tests.
pub const ADMIN_MAILBOX: &str = "admin@deal4bank.com";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:9002".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        site_cache_ttl_secs: 60,
        catalog_heading: DEFAULT_CATALOG_HEADING.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// How the fake provider answers a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailMode {
    Accept,
    NotConfigured,
    Reject,
}

/// Records every message instead of calling the provider.
pub struct FakeEmailSender {
    mode: EmailMode,
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl FakeEmailSender {
    pub fn new(mode: EmailMode) -> Self {
        Self {
            mode,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for FakeEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, EmailError> {
        match self.mode {
            EmailMode::NotConfigured => Err(EmailError::NotConfigured("RESEND_API_KEY")),
            EmailMode::Reject => Err(EmailError::Api {
                status: 422,
                message: "Invalid `to` field".into(),
            }),
            EmailMode::Accept => {
                let mut sent = self.sent.lock().unwrap();
                sent.push(email.clone());
                Ok(format!("re_{}", sent.len()))
            }
        }
    }
}

/// How the fake prompt flow answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowMode {
    Answer,
    NotConfigured,
    Fail,
}

/// Canned AI answers, recording the tone it was asked for.
pub struct FakePromptFlow {
    mode: FlowMode,
    pub tones: Mutex<Vec<String>>,
}

impl FakePromptFlow {
    pub fn new(mode: FlowMode) -> Self {
        Self {
            mode,
            tones: Mutex::new(Vec::new()),
        }
    }

    fn check(&self) -> Result<(), PromptFlowError> {
        match self.mode {
            FlowMode::Answer => Ok(()),
            FlowMode::NotConfigured => Err(PromptFlowError::NotConfigured),
            FlowMode::Fail => Err(PromptFlowError::ApiError {
                status: 500,
                body: "model overloaded".into(),
            }),
        }
    }
}

#[async_trait]
impl PromptFlow for FakePromptFlow {
    async fn summarize(&self, email_content: &str) -> Result<String, PromptFlowError> {
        self.check()?;
        Ok(format!("Summary of {} characters", email_content.chars().count()))
    }

    async fn refine_tone(
        &self,
        email_content: &str,
        desired_tone: &str,
    ) -> Result<String, PromptFlowError> {
        self.check()?;
        self.tones.lock().unwrap().push(desired_tone.to_string());
        Ok(format!("Refined: {email_content}"))
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The application router plus handles to its in-memory collaborators.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub email: Arc<FakeEmailSender>,
    pub ai: Arc<FakePromptFlow>,
}

impl TestApp {
    /// A fresh clone of the router for one request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application over an empty in-memory store, with a
/// provider that accepts mail and an AI flow that answers.
pub fn build_test_app() -> TestApp {
    build_test_app_with(EmailMode::Accept, FlowMode::Answer)
}

/// Build the full application with the given fake behaviours.
///
/// Uses the same router builder as `main.rs` so tests exercise the
/// production middleware stack.
pub fn build_test_app_with(email_mode: EmailMode, flow_mode: FlowMode) -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let email = Arc::new(FakeEmailSender::new(email_mode));
    let ai = Arc::new(FakePromptFlow::new(flow_mode));

    let state = AppState {
        store: store.clone(),
        config: Arc::new(config.clone()),
        ws_manager: Arc::new(WsManager::new()),
        email_sender: email.clone(),
        email_config: Arc::new(EmailConfig {
            admin_mailbox: ADMIN_MAILBOX.to_string(),
            ..EmailConfig::default()
        }),
        prompt_flow: ai.clone(),
        site_cache: Arc::new(SiteCache::new(Duration::from_secs(
            config.site_cache_ttl_secs,
        ))),
    };

    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
        store,
        email,
        ai,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<&Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(&json)).await
}

/// POST a raw JSON-typed body, for payloads that are not valid JSON.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(&json)).await
}

pub async fn patch_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(&json)).await
}

pub async fn patch_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
