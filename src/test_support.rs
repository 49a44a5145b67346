//! Helpers for tests that need a live backend.

use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

use crate::commands::Session;
use crate::types::{Role, User};

/// Serve `app` on an ephemeral loopback port and return its base URL.
pub async fn serve(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    Url::parse(&format!("http://{addr}/")).expect("test base url")
}

/// A task as the backend serializes it.
pub fn task_json(id: i64, status: &str, assignee: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Task {id}"),
        "description": "Something to do",
        "status": status,
        "taskType": "FEATURE",
        "assignedTo": 2,
        "assignedToName": assignee,
        "createdBy": 1,
        "deadline": "2026-10-22",
        "completedAt": null
    })
}

/// A signed-in session against `base`.
pub fn session(base: Url, role: Role) -> Session {
    Session::from_user(
        base,
        User {
            email: "sam@example.com".to_string(),
            full_name: "Sam Rivera".to_string(),
            role,
            token: "test-token".to_string(),
        },
    )
}
