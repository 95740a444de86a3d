use std::time::Duration;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::controller::system::SystemController;
use crate::app_state::AppState;

/// Build the main application router
pub fn app_router(request_timeout: Duration) -> Router<AppState> {
    let api_v1 = Router::new().merge(crate::api::routes::subscription_routes::subscription_routes());

    Router::new()
        .route("/", get(SystemController::root))
        .route("/health", get(SystemController::health))
        .nest("/api/v1", api_v1)
        .fallback(handler_404)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, Response};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::app_state::SubscriptionService;
    use crate::core::persistence::subscription::subscription_api_repository_trait::DynSubscriptionRepository;
    use crate::core::persistence::subscription::subscription_memory_repository::SubscriptionMemoryRepository;

    const USER: &str = "60601fee-2bf1-4721-ae6f-7636e79a0cba";

    fn app_with(repo: Arc<SubscriptionMemoryRepository>) -> Router {
        let repo: DynSubscriptionRepository = repo;
        let state = AppState {
            subscription_service: Arc::new(SubscriptionService::new(repo, 10)),
        };
        app_router(Duration::from_secs(5)).with_state(state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, body: Value) -> Uuid {
        let response = send(app, Method::POST, "/api/v1/subscriptions", Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = json_body(response).await["id"].as_str().unwrap().to_string();
        id.parse().unwrap()
    }

    fn netflix() -> Value {
        json!({
            "service_name": "Netflix",
            "price": 500,
            "user_id": USER,
            "start_date": "01-2023",
            "end_date": "03-2023"
        })
    }

    #[tokio::test]
    async fn create_get_and_total_cost() {
        let app = app_with(Arc::new(SubscriptionMemoryRepository::new()));
        let id = create(&app, netflix()).await;

        let response = send(&app, Method::GET, &format!("/api/v1/subscriptions/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let record = json_body(response).await;
        assert_eq!(record["service_name"], "Netflix");
        assert_eq!(record["start_date"], "01-2023");
        assert_eq!(record["end_date"], "03-2023");

        let uri = format!(
            "/api/v1/subscriptions/total_cost?user_id={USER}&service_name=Netflix&start_date=01-2023&end_date=03-2023"
        );
        let response = send(&app, Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "total_cost": 1500 }));
    }

    #[tokio::test]
    async fn list_returns_array() {
        let app = app_with(Arc::new(SubscriptionMemoryRepository::new()));
        create(&app, netflix()).await;
        create(&app, netflix()).await;

        let response = send(&app, Method::GET, "/api/v1/subscriptions?limit=1&offset=0", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn partial_update_changes_only_price() {
        let app = app_with(Arc::new(SubscriptionMemoryRepository::new()));
        let id = create(&app, netflix()).await;
        let uri = format!("/api/v1/subscriptions/{id}");

        let response = send(&app, Method::PUT, &uri, Some(json!({ "price": 700 }))).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let record = json_body(send(&app, Method::GET, &uri, None).await).await;
        assert_eq!(record["price"], 700);
        assert_eq!(record["service_name"], "Netflix");
        assert_eq!(record["end_date"], "03-2023");
    }

    #[tokio::test]
    async fn malformed_ids_and_bodies_are_bad_requests() {
        let app = app_with(Arc::new(SubscriptionMemoryRepository::new()));

        let response = send(&app, Method::GET, "/api/v1/subscriptions/not-a-uuid", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());

        let response = send(
            &app,
            Method::POST,
            "/api/v1/subscriptions",
            Some(json!({ "service_name": "Netflix" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let mut negative = netflix();
        negative["price"] = json!(-1);
        let response = send(&app, Method::POST, "/api/v1/subscriptions", Some(negative)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, Method::GET, "/api/v1/subscriptions/total_cost", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Validation error: invalid user_id");
    }

    #[tokio::test]
    async fn malformed_pagination_is_json_bad_request() {
        let app = app_with(Arc::new(SubscriptionMemoryRepository::new()));

        for uri in ["/api/v1/subscriptions?limit=abc", "/api/v1/subscriptions?offset=-x"] {
            let response = send(&app, Method::GET, uri, None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                response.headers()["content-type"],
                "application/json",
                "{uri} should answer with a JSON error"
            );
            let error = json_body(response).await["error"].as_str().unwrap().to_string();
            assert!(error.starts_with("Validation error:"), "{error}");
        }
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let app = app_with(Arc::new(SubscriptionMemoryRepository::new()));
        let uri = format!("/api/v1/subscriptions/{}", Uuid::new_v4());

        let response = send(&app, Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::PUT, &uri, Some(json!({ "price": 1 }))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_existing_is_no_content() {
        let repo = Arc::new(SubscriptionMemoryRepository::new());
        let app = app_with(repo.clone());
        let id = create(&app, netflix()).await;

        let response = send(&app, Method::DELETE, &format!("/api/v1/subscriptions/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn store_failure_is_summarised_500() {
        let app = app_with(Arc::new(SubscriptionMemoryRepository::unavailable()));

        let uri = format!("/api/v1/subscriptions/total_cost?user_id={USER}");
        let response = send(&app, Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await["error"],
            "Internal server error: failed to get total cost"
        );

        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn root_health_and_fallback() {
        let app = app_with(Arc::new(SubscriptionMemoryRepository::new()));

        assert_eq!(send(&app, Method::GET, "/", None).await.status(), StatusCode::OK);
        assert_eq!(send(&app, Method::GET, "/health", None).await.status(), StatusCode::OK);
        assert_eq!(
            send(&app, Method::GET, "/api/v2/nothing", None).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
