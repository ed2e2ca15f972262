//! Request pipeline semantics against scripted backends.
//!
//! # Design
//! Each test serves a tiny axum router on a random port that scripts one
//! backend behavior (echo, status failure, in-band error, garbage body) and
//! asserts which `ApiError` variant the pipeline reports. The full lifecycle
//! against the real mock backend lives in `integration.rs`.

use std::net::SocketAddr;

use axum::{http::StatusCode, routing::post, Json, Router};
use platemate_client::{ApiClient, ApiError, CreateUserRequest};
use serde_json::{json, Value};

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn client_for(router: Router) -> ApiClient {
    let addr = serve(router).await;
    ApiClient::new(&format!("http://{addr}"))
}

#[tokio::test]
async fn success_body_round_trips_unchanged() {
    let router = Router::new().route(
        "/api/Echo/echo",
        post(|Json(body): Json<Value>| async move { Json(body) }),
    );
    let client = client_for(router).await;

    let payload = json!({"user": "alice", "nested": {"weights": [100.0, 102.5]}, "flag": true});
    let result: Value = client.execute("/Echo/echo", &payload).await.unwrap();
    assert_eq!(result, payload);
}

#[tokio::test]
async fn non_success_status_carries_the_exact_code() {
    let router = Router::new().route(
        "/api/Any/op",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = client_for(router).await;

    let err = client.execute::<Value, _>("/Any/op", &json!({})).await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 500 }));
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn status_check_precedes_error_field_in_body() {
    // A 4xx response with an error-shaped body is still an HTTP failure.
    let router = Router::new().route(
        "/api/Any/op",
        post(|| async { (StatusCode::BAD_REQUEST, Json(json!({"error": "X"}))) }),
    );
    let client = client_for(router).await;

    let err = client.execute::<Value, _>("/Any/op", &json!({})).await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 400 }));
}

#[tokio::test]
async fn error_field_overrides_http_success() {
    let router = Router::new().route(
        "/api/Any/op",
        post(|| async { Json(json!({"error": "X", "userId": "u1"})) }),
    );
    let client = client_for(router).await;

    let err = client.execute::<Value, _>("/Any/op", &json!({})).await.unwrap_err();
    match &err {
        ApiError::Application(message) => assert_eq!(message, "X"),
        other => panic!("expected application error, got {other:?}"),
    }
    assert_eq!(err.status(), None);
    assert_eq!(err.to_string(), "X");
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    // Bind then drop the listener so the port is known to refuse connections.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{addr}"));
    let err = client.execute::<Value, _>("/Any/op", &json!({})).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.status(), None);
    assert!(err.to_string().starts_with("network error:"));
}

#[tokio::test]
async fn non_json_success_body_is_a_network_error() {
    let router = Router::new().route("/api/Any/op", post(|| async { "not json" }));
    let client = client_for(router).await;

    let err = client.execute::<Value, _>("/Any/op", &json!({})).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn body_not_matching_declared_shape_is_a_network_error() {
    let router = Router::new().route(
        "/api/Any/op",
        post(|| async { Json(json!({"unexpected": true})) }),
    );
    let client = client_for(router).await;

    #[derive(Debug, serde::Deserialize)]
    struct Expected {
        #[allow(dead_code)]
        user_id: String,
    }

    let err = client.execute::<Expected, _>("/Any/op", &json!({})).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(err.to_string().contains("invalid response body"));
}

#[tokio::test]
async fn no_argument_operation_sends_empty_object() {
    // The handler only answers the success shape when the body is exactly {},
    // so a passing call proves what went over the wire. The underscore-class
    // endpoint also shows administrative operations use the same pipeline.
    let router = Router::new().route(
        "/api/ExerciseCatalog/_getAllExercises",
        post(|Json(body): Json<Value>| async move {
            if body == json!({}) {
                Json(json!({"exercises": []}))
            } else {
                Json(json!({"error": "expected empty body"}))
            }
        }),
    );
    let client = client_for(router).await;

    let list = client.exercise_catalog().all_exercises().await.unwrap();
    assert!(list.exercises.is_empty());
}

#[tokio::test]
async fn create_user_success_and_in_band_failure() {
    let router = Router::new()
        .route(
            "/api/UserManagement/createUser",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "a@x.com" {
                    Json(json!({"userId": "u1"}))
                } else {
                    Json(json!({"error": "email taken"}))
                }
            }),
        );
    let client = client_for(router).await;
    let users = client.user_management();

    let created = users
        .create_user(&CreateUserRequest {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.user_id, "u1");

    let err = users
        .create_user(&CreateUserRequest {
            username: "bob".to_string(),
            email: "b@x.com".to_string(),
        })
        .await
        .unwrap_err();
    match err {
        ApiError::Application(message) => assert_eq!(message, "email taken"),
        other => panic!("expected application error, got {other:?}"),
    }
}
