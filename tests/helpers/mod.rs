//! Test helpers: a stand-in for the contact endpoint and the app wired to it.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use http_body_util::BodyExt;
use prestigia::{AppState, Config};
use serde_json::Value;
use tokio::sync::Notify;

#[derive(Clone, Default)]
pub struct Received(Arc<Mutex<Vec<Value>>>);

impl Received {
    pub fn forms(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }
}

/// Holds the endpoint's answers until released.
#[derive(Clone, Default)]
pub struct Gate {
    started: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    /// Waits until the endpoint received a request.
    pub async fn started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub received: Received,
}

/// Starts an endpoint answering every contact request with `status` and
/// `body`, and an app posting to it.
pub async fn create_test_app(status: StatusCode, body: &'static str) -> anyhow::Result<TestApp> {
    spawn_app(status, body, None).await
}

/// Like [`create_test_app`], but the endpoint answers only once `gate` is
/// released.
pub async fn create_gated_test_app(
    status: StatusCode,
    body: &'static str,
    gate: Gate,
) -> anyhow::Result<TestApp> {
    spawn_app(status, body, Some(gate)).await
}

async fn spawn_app(
    status: StatusCode,
    body: &'static str,
    gate: Option<Gate>,
) -> anyhow::Result<TestApp> {
    let received = Received::default();

    let endpoint = Router::new()
        .route(
            "/api/contact",
            post(
                move |State(received): State<Received>, Json(form): Json<Value>| {
                    let gate = gate.clone();

                    async move {
                        received.0.lock().unwrap().push(form);

                        if let Some(gate) = gate {
                            gate.started.notify_one();
                            gate.release.notified().await;
                        }

                        (status, [(header::CONTENT_TYPE, "application/json")], body)
                            .into_response()
                    }
                },
            ),
        )
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, endpoint).await;
    });

    let mut config = Config::default();
    config.contact.endpoint = format!("http://{addr}/api/contact");

    let state = AppState::new(config)?;

    Ok(TestApp {
        router: prestigia::routes::router(state.clone()),
        state,
        received,
    })
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// `name=value` of the visitor cookie set by a response.
pub fn visitor_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("prestigia_visitor="))
        .and_then(|v| v.split(';').next())
        .map(String::from)
        .expect("visitor cookie")
}
