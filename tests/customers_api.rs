mod common;

use axum::http::StatusCode;
use common::{TestDb, body_bytes, body_json, get, put_json, send, with_method};
use diesel_async::RunQueryDsl;
use serde_json::json;

#[tokio::test]
async fn customer_lifecycle() {
    let db = TestDb::new().await;
    let app = db.router();

    let response = send(&app, with_method("POST", "/api/customers?name=Alice")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "id": 1, "name": "Alice" }));

    let response = send(&app, get("/api/customers?id=1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "id": 1, "name": "Alice" }));

    let response = send(&app, get("/api/customers?id=999")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "id": 0, "name": null }));

    let response = send(&app, put_json("/api/customers", r#"{"id":1,"name":"Alicia"}"#)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "id": 1, "name": "Alicia" }));

    let response = send(&app, get("/api/customers?name=ALICIA")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], 1);

    let response = send(&app, with_method("DELETE", "/api/customers?id=1")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get("/api/customers?id=1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "id": 0, "name": null }));
}

#[tokio::test]
async fn post_returns_existing_customer_for_same_name() {
    let db = TestDb::new().await;
    let app = db.router();

    send(&app, with_method("POST", "/api/customers?name=Bob")).await;
    let response = send(&app, with_method("POST", "/api/customers?name=bob")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "id": 1, "name": "Bob" }));

    let response = send(&app, get("/api/customers")).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_without_keys_lists_every_customer() {
    let db = TestDb::new().await;
    let app = db.router();

    let response = send(&app, get("/api/customers")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));

    for name in ["Ann", "Ben"] {
        send(&app, with_method("POST", &format!("/api/customers?name={}", name))).await;
    }

    let response = send(&app, get("/api/customers")).await;
    assert_eq!(
        body_json(response).await,
        json!([{ "id": 1, "name": "Ann" }, { "id": 2, "name": "Ben" }])
    );
}

#[tokio::test]
async fn id_takes_priority_over_name() {
    let db = TestDb::new().await;
    let app = db.router();
    send(&app, with_method("POST", "/api/customers?name=Ann")).await;
    send(&app, with_method("POST", "/api/customers?name=Ben")).await;

    let response = send(&app, get("/api/customers?id=2&name=Ann")).await;
    assert_eq!(body_json(response).await["name"], "Ben");
}

#[tokio::test]
async fn invalid_keys_are_rejected() {
    let db = TestDb::new().await;
    let app = db.router();

    for uri in ["/api/customers?id=0", "/api/customers?id=-4", "/api/customers?name=%20%20"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "GET {}", uri);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let response = send(&app, get("/api/customers?id=abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = send(&app, with_method("POST", "/api/customers")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, with_method("DELETE", "/api/customers")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_rejects_invalid_payloads() {
    let db = TestDb::new().await;
    let app = db.router();

    let response = send(&app, put_json("/api/customers", r#"{"id":0,"name":" "}"#)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["errors"].as_array().unwrap().len(), 2);

    let response = send(&app, put_json("/api/customers", "{not json")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn writes_against_missing_customers_are_bad_requests() {
    let db = TestDb::new().await;
    let app = db.router();

    let response = send(&app, put_json("/api/customers", r#"{"id":7,"name":"Ghost"}"#)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "id": 0, "name": null }));

    let response = send(&app, with_method("DELETE", "/api/customers?id=7")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"]["field"], "id");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_posts_are_served_independently() {
    let db = TestDb::with_max_connections(5).await;
    let app = db.router();

    let handles: Vec<_> = (0..24)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let uri = format!("/api/customers?name=Guest{}", i % 6);
                send(&app, with_method("POST", &uri)).await.status()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let response = send(&app, get("/api/customers")).await;
    let customers = body_json(response).await;
    assert!(customers.as_array().unwrap().len() >= 6);
}

#[tokio::test]
async fn storage_failures_are_bare_500s() {
    let db = TestDb::new().await;
    let app = db.router();

    let mut conn = db.pool.get().await.unwrap();
    diesel::sql_query("DROP TABLE customers")
        .execute(&mut conn)
        .await
        .unwrap();
    drop(conn);

    let response = send(&app, get("/api/customers")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let db = TestDb::new().await;
    let app = db.router();

    let request = axum::http::Request::builder()
        .uri("/api/customers")
        .header("x-request-id", "trace-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.headers()["x-request-id"], "trace-123");

    let response = send(&app, get("/api/customers")).await;
    assert!(!response.headers()["x-request-id"].is_empty());
}

#[tokio::test]
async fn framework_errors_are_wrapped_as_json() {
    let db = TestDb::new().await;
    let app = db.router();

    let response = send(&app, get("/api/unknown")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["request_id"].is_string());

    let response = send(&app, with_method("PATCH", "/api/customers")).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn health_endpoints_report_database_status() {
    let db = TestDb::new().await;
    let app = db.router();

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "healthy");

    assert_eq!(send(&app, get("/health/ready")).await.status(), StatusCode::OK);
    assert_eq!(send(&app, get("/health/live")).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_lists_customer_routes() {
    let db = TestDb::new().await;
    let app = db.router();

    let response = send(&app, get("/api-docs/openapi.json")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let operations = &body["paths"]["/api/customers"];
    for method in ["get", "post", "put", "delete"] {
        assert!(operations[method].is_object(), "missing {} operation", method);
    }
}
