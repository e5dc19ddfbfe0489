use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;
use userdesk::prelude::*;

fn app_with(config: ServerConfig) -> Router {
    build_router(build_container(config).unwrap()).unwrap()
}

fn app() -> Router {
    app_with(ServerConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(id: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/users/{id}"))
        .body(Body::empty())
        .unwrap()
}

async fn list_ids(app: &Router) -> Vec<i64> {
    let body = json_body(send(app, get("/api/users")).await).await;
    body.as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn list_returns_seed_in_order() {
    let response = send(&app(), get("/api/users")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([
            {"id": 1, "name": "John Doe", "email": "john@example.com"},
            {"id": 2, "name": "Jane Smith", "email": "jane@example.com"}
        ])
    );
}

#[tokio::test]
async fn create_list_delete_scenario() {
    let app = app();

    let response = send(&app, post_json(r#"{"name":"A","email":"a@x.com"}"#)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        json_body(response).await,
        json!({"id": 3, "name": "A", "email": "a@x.com"})
    );
    assert_eq!(list_ids(&app).await, vec![1, 2, 3]);

    let response = send(&app, delete("1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"message": "User deleted"}));
    assert_eq!(list_ids(&app).await, vec![2, 3]);
}

#[tokio::test]
async fn create_ids_follow_previous_count() {
    let app = app();
    for expected in 3..=6 {
        let name = format!("user{expected}");
        let body = json!({"name": name, "email": format!("{name}@x.com")}).to_string();
        let created = json_body(send(&app, post_json(&body)).await).await;
        assert_eq!(created["id"], expected);
        assert_eq!(created["name"], name);
        assert_eq!(list_ids(&app).await.len() as i64, expected);
    }
}

#[tokio::test]
async fn create_with_empty_object_yields_nulls() {
    let response = send(&app(), post_json("{}")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        json_body(response).await,
        json!({"id": 3, "name": null, "email": null})
    );
}

#[tokio::test]
async fn malformed_body_is_client_error() {
    let app = app();

    for body in ["{not json", "42", r#"{"name": 5}"#] {
        let response = send(&app, post_json(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let error = json_body(response).await;
        assert_eq!(error["statusCode"], 400);
        assert!(error["message"].as_str().unwrap().starts_with("Invalid request payload"));
    }

    let missing_content_type = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .body(Body::from("{}"))
        .unwrap();
    assert_eq!(
        send(&app, missing_content_type).await.status(),
        StatusCode::BAD_REQUEST
    );

    assert_eq!(list_ids(&app).await, vec![1, 2]);
}

#[tokio::test]
async fn delete_missing_id_still_succeeds() {
    let app = app();
    let response = send(&app, delete("99")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"message": "User deleted"}));
    assert_eq!(list_ids(&app).await, vec![1, 2]);
}

#[tokio::test]
async fn repeated_delete_is_noop() {
    let app = app();
    assert_eq!(send(&app, delete("2")).await.status(), StatusCode::OK);
    assert_eq!(send(&app, delete("2")).await.status(), StatusCode::OK);
    assert_eq!(list_ids(&app).await, vec![1]);
}

#[tokio::test]
async fn non_integer_id_is_not_found() {
    let response = send(&app(), delete("abc")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["statusCode"], 404);
}

#[tokio::test]
async fn signed_or_oversized_id_is_not_found() {
    let app = app();
    for id in ["-1", "+1", "%2B1", "99999999999999999999"] {
        let response = send(&app, delete(id)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "id: {id}");
    }
    assert_eq!(list_ids(&app).await, vec![1, 2]);
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let response = send(&app(), get("/api/nothing")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await["message"],
        "Not found: No route for /api/nothing"
    );
}

#[tokio::test]
async fn sequence_ids_survive_deleting_the_newest() {
    let app = app();
    send(&app, post_json("{}")).await;
    send(&app, delete("3")).await;
    let created = json_body(send(&app, post_json("{}")).await).await;
    assert_eq!(created["id"], 4);
}

#[tokio::test]
async fn length_strategy_reuses_freed_count() {
    let config = ServerConfig {
        id_strategy: IdStrategy::Length,
        ..ServerConfig::default()
    };
    let app = app_with(config);
    send(&app, delete("1")).await;
    let created = json_body(send(&app, post_json("{}")).await).await;
    assert_eq!(created["id"], 2);
}

#[tokio::test]
async fn apps_do_not_share_state() {
    let first = app();
    let second = app();
    send(&first, delete("1")).await;
    assert_eq!(list_ids(&first).await, vec![2]);
    assert_eq!(list_ids(&second).await, vec![1, 2]);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .uri("/api/users")
        .header(header::ORIGIN, "http://elsewhere.example")
        .body(Body::empty())
        .unwrap();
    let response = send(&app(), request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/users/1")
        .header(header::ORIGIN, "http://elsewhere.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .body(Body::empty())
        .unwrap();
    let response = send(&app(), preflight).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn landing_page_renders_current_users() {
    let app = app();
    send(&app, post_json(r#"{"name":"<Ann>","email":"ann@x.com"}"#)).await;

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("John Doe"));
    assert!(html.contains("&lt;Ann&gt;"));
    assert!(html.contains("<span id=\"count\">3</span>"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_ids() {
    let app = app();
    let handles: Vec<_> = (0..32)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { json_body(send(&app, post_json("{}")).await).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap()["id"].as_i64().unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (3..35).collect::<Vec<_>>());
}
