use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn api_request(endpoint: &str, body: Value) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(format!("/api{endpoint}"))
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- envelope contract ---

#[tokio::test]
async fn unknown_operation_is_404() {
    let resp = app()
        .oneshot(api_request("/ExerciseCatalog/noSuchOp", json!({})))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(&body_bytes(resp).await[..], b"unknown endpoint");
}

#[tokio::test]
async fn domain_rejection_is_error_envelope_under_200() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(api_request(
            "/UserManagement/getUser",
            json!({"userId": "missing"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "user not found: missing");
}

#[tokio::test]
async fn malformed_payload_is_error_envelope_under_200() {
    let resp = app()
        .oneshot(api_request("/UserManagement/createUser", json!({})))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("invalid request"));
}

// --- user lifecycle ---

#[tokio::test]
async fn create_user_then_duplicate_email() {
    let app = app();
    let body = json!({"username": "alice", "email": "a@x.com"});

    let resp = app
        .clone()
        .oneshot(api_request("/UserManagement/createUser", body.clone()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    assert!(created["userId"].is_string());

    let resp = app
        .oneshot(api_request("/UserManagement/createUser", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let rejected = body_json(resp).await;
    assert_eq!(rejected["error"], "email taken");
}

// --- catalog ---

#[tokio::test]
async fn add_and_search_exercises() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(api_request(
            "/ExerciseCatalog/addExercise",
            json!({
                "name": "Bench Press",
                "muscleGroups": ["chest", "triceps"],
                "movementPattern": "push",
                "equipment": "barbell",
                "instructions": null
            }),
        ))
        .await
        .unwrap();
    let created = body_json(resp).await;
    let exercise_id = created["exerciseId"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(api_request(
            "/ExerciseCatalog/searchExercises",
            json!({"query": "bench", "muscleGroup": null}),
        ))
        .await
        .unwrap();
    let found = body_json(resp).await;
    assert_eq!(found["exercises"][0]["exerciseId"], exercise_id.as_str());

    let resp = app
        .oneshot(api_request(
            "/ExerciseCatalog/searchExercises",
            json!({"query": null, "muscleGroup": "legs"}),
        ))
        .await
        .unwrap();
    let found = body_json(resp).await;
    assert_eq!(found["exercises"].as_array().unwrap().len(), 0);
}

// --- tracking ---

#[tokio::test]
async fn session_records_survive_until_delete() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(api_request(
            "/WorkoutTracking/startSession",
            json!({"user": "alice", "date": "2024-03-01"}),
        ))
        .await
        .unwrap();
    let started = body_json(resp).await;
    let session_id = started["sessionId"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(api_request(
            "/WorkoutTracking/recordExercise",
            json!({
                "sessionId": session_id.as_str(),
                "exercise": "squat",
                "weight": 100.0,
                "sets": 3,
                "reps": 5,
                "notes": null
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(api_request(
            "/WorkoutTracking/_getSessionRecords",
            json!({"sessionId": session_id.as_str()}),
        ))
        .await
        .unwrap();
    let records = body_json(resp).await;
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["exercise"], "squat");

    let resp = app
        .clone()
        .oneshot(api_request(
            "/WorkoutTracking/deleteSession",
            json!({"sessionId": session_id.as_str()}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(api_request(
            "/WorkoutTracking/_getSessionRecords",
            json!({"sessionId": session_id.as_str()}),
        ))
        .await
        .unwrap();
    let records = body_json(resp).await;
    assert_eq!(records.as_array().unwrap().len(), 0);
}
