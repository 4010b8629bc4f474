use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use meteo::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = meteo::api::create_app_state(config)
        .await
        .expect("Failed to create app state");
    meteo::api::router(state)
}

async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            serde_json::json!({"username": "admin", "password": "admin"}),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    body_json(response).await["token"].as_str().unwrap().to_string()
}

fn json_request(
    method: &str,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref());

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_list_is_public_and_starts_empty() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/weather", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));

    // Repeatable without a token
    let response = app
        .oneshot(empty_request("GET", "/weather", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_weather_crud_scenario() {
    let app = spawn_app().await;
    let token = login(&app).await;

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/weather",
            serde_json::json!({
                "city_name": "Paris",
                "date": "2024-03-01",
                "temperature": 12.5
            }),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(created["city_name"], "Paris");
    assert_eq!(created["date"], "2024-03-01");
    assert_eq!(created["temperature"], 12.5);

    // Listed after create, without a token
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/weather", None))
        .await
        .unwrap();
    let records = body_json(response).await;
    assert!(
        records
            .as_array()
            .unwrap()
            .iter()
            .any(|r| r["id"].as_i64() == Some(id))
    );

    // Update overwrites every field
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/weather",
            serde_json::json!({
                "id": id,
                "city_name": "Lyon",
                "date": "2024-03-02",
                "temperature": 14.0
            }),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["id"].as_i64(), Some(id));
    assert_eq!(updated["city_name"], "Lyon");
    assert_eq!(updated["date"], "2024-03-02");
    assert_eq!(updated["temperature"], 14.0);

    // Delete
    let response = app
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/weather/{id}"),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone from the listing
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/weather", None))
        .await
        .unwrap();
    let records = body_json(response).await;
    assert!(
        !records
            .as_array()
            .unwrap()
            .iter()
            .any(|r| r["id"].as_i64() == Some(id))
    );

    // Deleting again reports not found
    let response = app
        .oneshot(empty_request(
            "DELETE",
            &format!("/weather/{id}"),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_city_and_date_allowed() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let record = serde_json::json!({
        "city_name": "Tokyo",
        "date": "2024-01-14",
        "temperature": 12.0
    });

    let first = app
        .clone()
        .oneshot(json_request("POST", "/weather", record.clone(), Some(&token)))
        .await
        .unwrap();
    let second = app
        .clone()
        .oneshot(json_request("POST", "/weather", record, Some(&token)))
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::CREATED);

    let first_id = body_json(first).await["id"].as_i64().unwrap();
    let second_id = body_json(second).await["id"].as_i64().unwrap();
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_update_unknown_id_returns_404() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/weather",
            serde_json::json!({
                "id": 9999,
                "city_name": "Paris",
                "date": "2024-03-01",
                "temperature": 12.5
            }),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_delete_unknown_id_returns_404() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let response = app
        .oneshot(empty_request("DELETE", "/weather/9999", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let app = spawn_app().await;
    let token = login(&app).await;

    // Missing temperature
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/weather",
            serde_json::json!({"city_name": "Paris", "date": "2024-03-01"}),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Non-numeric temperature
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/weather",
            serde_json::json!({
                "city_name": "Paris",
                "date": "2024-03-01",
                "temperature": "warm"
            }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Malformed date
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/weather",
            serde_json::json!({
                "city_name": "Paris",
                "date": "not-a-date",
                "temperature": 12.5
            }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Blank city name
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/weather",
            serde_json::json!({
                "city_name": "   ",
                "date": "2024-03-01",
                "temperature": 12.5
            }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was persisted
    let response = app
        .oneshot(empty_request("GET", "/weather", None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, serde_json::json!([]));
}
