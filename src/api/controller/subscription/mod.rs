use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::subscription_dto::{
    CreatedResponse, PaginationQuery, TotalCostQuery, TotalCostResponse,
};
use crate::api::util::json::{body, parse_id, query, to_json, to_status};
use crate::app_state::AppState;
use crate::core::persistence::subscription::subscription_entity::SubscriptionEntity;
use crate::domain::subscription::dto::subscription_create_request::SubscriptionCreateRequest;
use crate::domain::subscription::dto::subscription_patch_request::SubscriptionPatchRequest;
use crate::errors::AppError;

pub struct SubscriptionController;

impl SubscriptionController {
    pub async fn create_subscription(
        State(state): State<AppState>,
        payload: Result<Json<SubscriptionCreateRequest>, JsonRejection>,
    ) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
        let req = body(payload)?;
        let id = state
            .subscription_service
            .create(req)
            .await
            .map_err(|err| AppError::from_domain(err, "failed to create subscription"))?;
        Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
    }

    pub async fn list_subscriptions(
        State(state): State<AppState>,
        params: Result<Query<PaginationQuery>, QueryRejection>,
    ) -> Result<Json<Vec<SubscriptionEntity>>, AppError> {
        let page = query(params)?;
        to_json(
            state.subscription_service.list(page.limit, page.offset).await,
            "failed to list subscriptions",
        )
    }

    pub async fn get_subscription(
        State(state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<Json<SubscriptionEntity>, AppError> {
        let id = parse_id(&id, "id format")?;
        to_json(
            state.subscription_service.get(id).await,
            "failed to get subscription",
        )
    }

    pub async fn update_subscription(
        State(state): State<AppState>,
        Path(id): Path<String>,
        payload: Result<Json<SubscriptionPatchRequest>, JsonRejection>,
    ) -> Result<StatusCode, AppError> {
        let id = parse_id(&id, "id")?;
        let req = body(payload)?;
        to_status(
            state.subscription_service.update(id, req).await,
            StatusCode::NO_CONTENT,
            "failed to update subscription",
        )
    }

    pub async fn delete_subscription(
        State(state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<StatusCode, AppError> {
        let id = parse_id(&id, "id")?;
        to_status(
            state.subscription_service.delete(id).await,
            StatusCode::NO_CONTENT,
            "failed to delete subscription",
        )
    }

    /// Total cost for `user_id`, optionally narrowed by `service_name`, `start_date`, `end_date`.
    pub async fn get_total_cost(
        State(state): State<AppState>,
        params: Result<Query<TotalCostQuery>, QueryRejection>,
    ) -> Result<Json<TotalCostResponse>, AppError> {
        let filter = query(params)?.into_filter()?;
        let summary = state
            .subscription_service
            .get_total_cost(filter)
            .await
            .map_err(|err| AppError::from_domain(err, "failed to get total cost"))?;
        Ok(Json(TotalCostResponse {
            total_cost: summary.total_cost,
        }))
    }
}
