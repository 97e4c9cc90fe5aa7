//! Integration tests for the synchronous dispatch endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, test_state, test_state_with};
use serde_json::json;

use dispatchd_core::operations::builtin_registry;

// ---------------------------------------------------------------------------
// Test: string results come back wrapped as { "message": ... }
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sync_dispatch_wraps_string_results() {
    let app = build_test_app(test_state());
    let response = post_json(app, "/api/v1/generic", json!({ "name": "ping" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "result": { "message": "pong" } }));
}

// ---------------------------------------------------------------------------
// Test: structured results pass through verbatim
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sync_dispatch_returns_structured_results_verbatim() {
    let app = build_test_app(test_state());
    let payload = json!({ "files": ["a.cls", "b.cls"], "count": 2 });
    let response = post_json(
        app,
        "/api/v1/generic",
        json!({ "name": "echo", "body": payload }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"], payload);
}

// ---------------------------------------------------------------------------
// Test: unknown operation produces the uniform error envelope, not a 5xx
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_operation_yields_error_envelope() {
    let app = build_test_app(test_state());
    let response = post_json(app, "/api/v1/generic", json!({ "name": "unknown-op" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "error": { "message": "Command not supported: unknown-op" } })
    );
}

// ---------------------------------------------------------------------------
// Test: unsupported editor fails through the same envelope shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unsupported_editor_yields_error_envelope() {
    let app = build_test_app(test_state());
    let response = post_json(
        app,
        "/api/v1/generic",
        json!({ "name": "ping", "editor": "emacs" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Unsupported editor: emacs");
}

// ---------------------------------------------------------------------------
// Test: a unit that raises is folded into the envelope too
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_operation_yields_error_envelope() {
    let mut registry = builtin_registry();
    registry
        .register_fn("explode", |_| Err(anyhow::anyhow!("boom")))
        .unwrap();

    let app = build_test_app(test_state_with(registry));
    let response = post_json(app, "/api/v1/generic", json!({ "name": "explode" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": { "message": "boom" } }));
}

// ---------------------------------------------------------------------------
// Test: empty operation name is rejected before dispatch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_operation_name_is_a_bad_request() {
    let app = build_test_app(test_state());
    let response = post_json(app, "/api/v1/generic", json!({ "name": "" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: GET variant mirrors the POST behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_dispatch_accepts_query_parameters() {
    let app = build_test_app(test_state());
    let response = get(app, "/api/v1/generic?name=ping").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "result": { "message": "pong" } }));
}

#[tokio::test]
async fn get_dispatch_rejects_malformed_body_parameter() {
    let app = build_test_app(test_state());
    let response = get(app, "/api/v1/generic?name=echo&body=not-json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: the server never substitutes the re-authentication operation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_dispatch_ignores_stale_credentials() {
    let app = build_test_app(test_state());
    let payload = json!({ "ok": true });
    let response = post_json(
        app,
        "/api/v1/generic",
        json!({
            "name": "echo",
            "body": payload,
            "project": { "name": "demo", "credentials": "requires_reauth" },
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // `echo` ran, not the credential-refresh operation.
    assert_eq!(body["result"], payload);
}
