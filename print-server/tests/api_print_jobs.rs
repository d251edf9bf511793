//! HTTP API tests: routing, auth middleware and error status mapping
//! Run: cargo test -p print-server --test api_print_jobs

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tower::ServiceExt;

use print_server::auth::{JwtConfig, JwtService, MANAGE_PRINTERS};
use print_server::db::define_schema;
use print_server::{Config, ServerState, api};

struct TestApp {
    app: Router,
    state: ServerState,
    _tmp: tempfile::TempDir,
}

async fn test_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path().join("db"))
        .await
        .unwrap();
    db.use_ns("spool").use_db("spool").await.unwrap();
    define_schema(&db).await.unwrap();

    let jwt = JwtConfig {
        secret: "api-test-secret-key-0123456789abcdef".to_string(),
        expiration_minutes: 60,
        issuer: "print-server".to_string(),
        audience: "print-clients".to_string(),
    };
    let config = Config {
        work_dir: tmp.path().to_string_lossy().to_string(),
        http_port: 0,
        jwt: jwt.clone(),
        environment: "test".to_string(),
    };
    let state = ServerState::new(config, db, Arc::new(JwtService::with_config(jwt)));
    let app = api::build_app(&state).with_state(state.clone());

    TestApp {
        app,
        state,
        _tmp: tmp,
    }
}

fn manage_token(state: &ServerState) -> String {
    state
        .jwt_service
        .generate_token("u1", "ops", "operator", &[MANAGE_PRINTERS.to_string()])
        .unwrap()
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_document() -> Value {
    json!([{
        "$type": "alignment",
        "alignment": "center",
        "children": [
            { "$type": "text", "value": "Hello" },
            { "$type": "cut" },
        ],
    }])
}

async fn create_printer(harness: &TestApp, token: &str, printer_type_id: &str) -> String {
    let response = harness
        .app
        .clone()
        .oneshot(request(
            "POST",
            "/api/printers",
            Some(token),
            Some(json!({ "printerTypeId": printer_type_id, "name": "Front desk" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let harness = test_app().await;
    let response = harness
        .app
        .clone()
        .oneshot(request("GET", "/api/printers", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_permission_is_forbidden() {
    let harness = test_app().await;
    let token = harness
        .state
        .jwt_service
        .generate_token("u2", "viewer", "viewer", &["reports:read".to_string()])
        .unwrap();

    let response = harness
        .app
        .clone()
        .oneshot(request("GET", "/api/printers", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn health_is_public() {
    let harness = test_app().await;
    let response = harness
        .app
        .clone()
        .oneshot(request("GET", "/api/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn submit_job_and_round_trip_document() {
    let harness = test_app().await;
    let token = manage_token(&harness.state);
    let printer_id = create_printer(&harness, &token, "receipt").await;

    let response = harness
        .app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/printers/{printer_id}/jobs"),
            Some(&token),
            Some(json!({ "data": sample_document() })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["printerId"], printer_id.as_str());
    assert_eq!(created["printJobTypeId"], "receipt");
    assert_eq!(created["printTime"], Value::Null);
    assert_eq!(created["collectionTime"], Value::Null);
    assert_eq!(created["data"], sample_document());

    // 列表返回同一份文档
    let response = harness
        .app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/printers/{printer_id}/jobs"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
    assert_eq!(listed[0]["data"], sample_document());
}

#[tokio::test]
async fn job_error_categories_are_distinct() {
    let harness = test_app().await;
    let token = manage_token(&harness.state);

    // 打印机不存在 → 404，即便文档同样非法
    let response = harness
        .app
        .clone()
        .oneshot(request(
            "POST",
            "/api/printers/00000000-0000-0000-0000-000000000000/jobs",
            Some(&token),
            Some(json!({ "data": { "$type": "bogus" } })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // 非小票打印机 → 501
    harness
        .state
        .db
        .query("UPSERT printer_type:laser SET name = 'Laser'")
        .await
        .unwrap();
    let laser_id = create_printer(&harness, &token, "laser").await;
    let response = harness
        .app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/printers/{laser_id}/jobs"),
            Some(&token),
            Some(json!({ "data": sample_document() })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

    // 非法文档 → 400，报文指明违例节点
    let receipt_id = create_printer(&harness, &token, "receipt").await;
    let response = harness
        .app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/printers/{receipt_id}/jobs"),
            Some(&token),
            Some(json!({ "data": { "$type": "bogus" } })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("bogus"));
}

#[tokio::test]
async fn list_filter_accepts_only_null_literal() {
    let harness = test_app().await;
    let token = manage_token(&harness.state);
    let printer_id = create_printer(&harness, &token, "receipt").await;

    let response = harness
        .app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/printers/{printer_id}/jobs?printTime=2023-01-01"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = harness
        .app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/printers/{printer_id}/jobs?printTime=null"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn patch_job_timestamps_via_api() {
    let harness = test_app().await;
    let token = manage_token(&harness.state);
    let printer_id = create_printer(&harness, &token, "receipt").await;

    let response = harness
        .app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/printers/{printer_id}/jobs"),
            Some(&token),
            Some(json!({ "data": sample_document() })),
        ))
        .await
        .unwrap();
    let job = body_json(response).await;
    let job_id = job["id"].as_str().unwrap();

    let response = harness
        .app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/printers/{printer_id}/jobs/{job_id}"),
            Some(&token),
            Some(json!({ "printTime": "2024-05-01T10:00:00Z" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["printTime"], "2024-05-01T10:00:00Z");
    assert_eq!(updated["collectionTime"], Value::Null);
    assert_eq!(updated["data"], sample_document());

    // 已打印任务从未打印过滤中消失
    let response = harness
        .app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/printers/{printer_id}/jobs?printTime=null"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn credential_issuance_and_scoping() {
    let harness = test_app().await;
    let token = manage_token(&harness.state);
    let printer_id = create_printer(&harness, &token, "receipt").await;

    let response = harness
        .app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/printers/{printer_id}/credentials"),
            Some(&token),
            Some(json!({ "name": "Collector" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let credential = body_json(response).await;
    let credential_id = credential["id"].as_str().unwrap();
    // token 为服务端生成的 base64url
    assert_eq!(credential["token"].as_str().unwrap().len(), 43);

    // 其它打印机路径下不可见
    let other_id = create_printer(&harness, &token, "receipt").await;
    let response = harness
        .app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/printers/{other_id}/credentials/{credential_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
