//! `GET /expand` and the surrounding HTTP surface, driven through the router

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use expand_engine::SubjectSet;
use expand_server::{create_app, ExpandServer, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{server_with, two_level_tree, RecordingEngine, Reply};

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn expand_returns_engine_tree() {
    let engine = RecordingEngine::returning(two_level_tree());
    let app = create_app(server_with(engine.clone()));

    let (status, body) = get(
        app,
        "/expand?namespace=docs&object=file1&relation=viewer&max-depth=5",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "type": "union",
            "subject": "docs:file1#viewer",
            "children": [
                {"type": "leaf", "subject": "alice"},
                {
                    "type": "union",
                    "subject": "groups:eng#member",
                    "children": [{"type": "leaf", "subject": "bob"}]
                }
            ]
        })
    );
    assert_eq!(
        engine.calls(),
        vec![(SubjectSet::new("docs", "file1", "viewer"), 5)]
    );
}

#[tokio::test]
async fn unparsable_depth_is_rejected_before_the_engine() {
    let engine = RecordingEngine::returning(two_level_tree());
    let app = create_app(server_with(engine.clone()));

    let (status, body) = get(
        app,
        "/expand?namespace=docs&object=file1&relation=viewer&max-depth=abc",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
    assert_eq!(body["error"]["message"], r#"parsing "abc": invalid syntax"#);
    assert_eq!(body["error"]["error_code"], "VALIDATION_1003");
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn depth_is_checked_before_fields() {
    let engine = RecordingEngine::returning(two_level_tree());

    let (status, body) = get(create_app(server_with(engine.clone())), "/expand").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], r#"parsing "": invalid syntax"#);
    assert!(body["error"].get("reason").is_none());

    let (status, body) = get(
        create_app(server_with(engine.clone())),
        "/expand?max-depth=99999999999999999999",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        r#"parsing "99999999999999999999": value out of range"#
    );
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn missing_fields_are_reported_in_order() {
    let engine = RecordingEngine::returning(two_level_tree());
    let cases = [
        ("/expand?max-depth=3", "namespace has to be specified"),
        ("/expand?max-depth=3&object=file1&relation=viewer", "namespace has to be specified"),
        ("/expand?max-depth=3&namespace=docs", "object has to be specified"),
        ("/expand?max-depth=3&namespace=docs&relation=viewer", "object has to be specified"),
        ("/expand?max-depth=3&namespace=docs&object=file1", "relation has to be specified"),
    ];

    for (uri, reason) in cases {
        let (status, body) = get(create_app(server_with(engine.clone())), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"]["reason"], reason, "{uri}");
        assert_eq!(body["error"]["status"], "Bad Request");
        assert_eq!(body["error"]["error_code"], "VALIDATION_1002");
    }
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn depth_literals_are_passed_through() {
    let cases = [("0x10", 16), ("010", 8), ("0b101", 5), ("1_000", 1000), ("-3", -3), ("0", 0)];

    for (literal, depth) in cases {
        let engine = RecordingEngine::returning(two_level_tree());
        let uri = format!("/expand?namespace=docs&object=file1&relation=viewer&max-depth={literal}");

        let (status, _) = get(create_app(server_with(engine.clone())), &uri).await;

        assert_eq!(status, StatusCode::OK, "{literal}");
        assert_eq!(engine.calls().first().map(|c| c.1), Some(depth), "{literal}");
    }
}

#[tokio::test]
async fn repeated_query_keys_use_the_first_value() {
    let engine = RecordingEngine::returning(two_level_tree());

    let (status, _) = get(
        create_app(server_with(engine.clone())),
        "/expand?max-depth=5&max-depth=7&namespace=docs&namespace=other&object=file1&relation=viewer",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        engine.calls(),
        vec![(SubjectSet::new("docs", "file1", "viewer"), 5)]
    );
}

#[tokio::test]
async fn repeated_depth_reports_the_first_value() {
    let engine = RecordingEngine::returning(two_level_tree());

    let (status, body) = get(
        create_app(server_with(engine.clone())),
        "/expand?max-depth=abc&max-depth=5&namespace=docs&object=file1&relation=viewer",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], r#"parsing "abc": invalid syntax"#);
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn nested_subject_reaches_the_engine() {
    let engine = RecordingEngine::returning(two_level_tree());

    let (status, _) = get(
        create_app(server_with(engine.clone())),
        "/expand?namespace=docs&object=file1&relation=viewer&max-depth=2&subject_id=alice",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let (set, _) = engine.calls().remove(0);
    assert_eq!(set.subject.map(|s| s.to_string()), Some("alice".to_string()));
}

#[tokio::test]
async fn engine_errors_keep_their_status() {
    let engine = RecordingEngine::new(Reply::NotFound("videos".to_string()));
    let (status, body) = get(
        create_app(server_with(engine)),
        "/expand?namespace=videos&object=cat&relation=viewer&max-depth=1",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Namespace not found: videos");

    let engine = RecordingEngine::new(Reply::Internal("connection reset".to_string()));
    let (status, body) = get(
        create_app(server_with(engine.clone())),
        "/expand?namespace=docs&object=file1&relation=viewer&max-depth=1",
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Repository error: connection reset");
    assert_eq!(engine.calls().len(), 1);
}

#[tokio::test]
async fn health_endpoints() {
    let engine = RecordingEngine::returning(two_level_tree());

    for uri in ["/health/alive", "/health/ready"] {
        let (status, body) = get(create_app(server_with(engine.clone())), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }
}

#[tokio::test]
async fn openapi_document_lists_expand() {
    let engine = RecordingEngine::returning(two_level_tree());

    let (status, body) = get(
        create_app(server_with(engine)),
        "/api-docs/openapi.json",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/expand"]["get"].is_object());
    assert!(body["paths"]["/health/alive"]["get"].is_object());
}

#[tokio::test]
async fn expands_configured_tuples() {
    let config = ServerConfig {
        namespaces: vec!["docs".to_string(), "groups".to_string()],
        relation_tuples: vec![
            "docs:file1#viewer@alice".to_string(),
            "docs:file1#viewer@groups:eng#member".to_string(),
            "groups:eng#member@bob".to_string(),
        ],
        ..ServerConfig::default()
    };
    let server = ExpandServer::new(config).await.unwrap();

    let (status, body) = get(
        create_app(server),
        "/expand?namespace=docs&object=file1&relation=viewer&max-depth=3",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::to_value(two_level_tree()).unwrap());
}
