//! In-process `/tasks/send` server for end-to-end tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Maps the prompt text of a request to `(status, raw body)`.
pub type Responder = Arc<dyn Fn(&str) -> (u16, String) + Send + Sync>;

async fn tasks_send(State(responder): State<Responder>, body: String) -> impl IntoResponse {
    let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let text = request["message"]["content"]["text"]
        .as_str()
        .unwrap_or_default();

    let (status, reply) = responder(text);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], reply)
}

async fn listen(app: axum::Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Serve `responder` on a random local port; returns the host URL.
pub async fn serve(responder: Responder) -> String {
    let app = axum::Router::new()
        .route("/tasks/send", post(tasks_send))
        .with_state(responder);
    listen(app).await
}

/// Answer every request with the same status and body.
pub async fn serve_fixed(status: u16, body: &'static str) -> String {
    serve(Arc::new(move |_: &str| (status, body.to_string()))).await
}

/// Accept requests and never answer.
pub async fn serve_stalled() -> String {
    let app = axum::Router::new().route(
        "/tasks/send",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            StatusCode::OK
        }),
    );
    listen(app).await
}

/// A JSON reply with `status`.
pub fn json_reply(status: u16, body: Value) -> (u16, String) {
    (status, body.to_string())
}

/// A completion reply in the wrapped artifact shape.
pub fn completion(text: &str) -> (u16, String) {
    json_reply(
        200,
        json!({"result": {"artifacts": [{"parts": [{"type": "text", "text": text}]}]}}),
    )
}

/// The user query embedded in a routing prompt, if `prompt` is one.
pub fn routed_query(prompt: &str) -> Option<&str> {
    let start = prompt.find("\nQuery: ")? + "\nQuery: ".len();
    prompt[start..].lines().next()
}
