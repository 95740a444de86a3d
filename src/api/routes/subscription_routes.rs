//! Subscription routes (e.g., /api/v1/subscriptions/*)

use axum::{routing::get, Router};

use crate::api::controller::subscription::SubscriptionController;
use crate::app_state::AppState;

pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/subscriptions",
            get(SubscriptionController::list_subscriptions)
                .post(SubscriptionController::create_subscription),
        )
        .route(
            "/subscriptions/total_cost",
            get(SubscriptionController::get_total_cost),
        )
        .route(
            "/subscriptions/{id}",
            get(SubscriptionController::get_subscription)
                .put(SubscriptionController::update_subscription)
                .delete(SubscriptionController::delete_subscription),
        )
}
