use anyhow::Result;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::core::persistence::subscription::subscription_api_repository_trait::SubscriptionApiRepository;
use crate::core::persistence::subscription::subscription_entity::{SubscriptionEntity, SubscriptionInput};
use crate::core::util::month_util::YearMonth;
use crate::domain::subscription::dto::subscription_create_request::SubscriptionCreateRequest;
use crate::domain::subscription::dto::subscription_patch_request::SubscriptionPatchRequest;
use crate::domain::subscription::errors::SubscriptionError;

pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const MAX_PAGE_LIMIT: i64 = 100;

pub async fn create_subscription(
    repo: &dyn SubscriptionApiRepository,
    req: SubscriptionCreateRequest,
) -> Result<Uuid> {
    req.validate()?;
    let input = build_input(
        req.service_name.trim().to_string(),
        req.price,
        req.user_id,
        &req.start_date,
        req.end_date.as_deref(),
    )?;

    info!(user_id = %input.user_id, service_name = %input.service_name, "Creating subscription");
    let id = repo.create(&input).await?;
    info!(%id, "Subscription created");
    Ok(id)
}

pub async fn get_subscription(repo: &dyn SubscriptionApiRepository, id: Uuid) -> Result<SubscriptionEntity> {
    match repo.get_by_id(id).await? {
        Some(entity) => Ok(entity),
        None => {
            warn!(%id, "Subscription not found");
            Err(SubscriptionError::NotFound(id).into())
        }
    }
}

pub async fn list_subscriptions(
    repo: &dyn SubscriptionApiRepository,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<SubscriptionEntity>> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
    let offset = offset.unwrap_or(0).max(0);

    let subscriptions = repo.list(limit, offset).await?;
    info!(count = subscriptions.len(), limit, offset, "Listed subscriptions");
    Ok(subscriptions)
}

pub async fn update_subscription(
    repo: &dyn SubscriptionApiRepository,
    id: Uuid,
    req: SubscriptionPatchRequest,
) -> Result<()> {
    req.validate()?;

    let mut entity = get_subscription(repo, id).await?;
    entity.apply_update(req);

    let input = build_input(
        entity.service_name,
        entity.price,
        entity.user_id,
        &entity.start_date,
        entity.end_date.as_deref(),
    )?;

    if !repo.update(id, &input).await? {
        // Deleted between the read and the write.
        return Err(SubscriptionError::NotFound(id).into());
    }

    info!(%id, "Subscription updated");
    Ok(())
}

/// Deleting an unknown id is reported as `NotFound`.
pub async fn delete_subscription(repo: &dyn SubscriptionApiRepository, id: Uuid) -> Result<()> {
    if !repo.delete(id).await? {
        warn!(%id, "Subscription not found for delete");
        return Err(SubscriptionError::NotFound(id).into());
    }

    info!(%id, "Subscription deleted");
    Ok(())
}

fn build_input(
    service_name: String,
    price: i32,
    user_id: Uuid,
    start_date: &str,
    end_date: Option<&str>,
) -> Result<SubscriptionInput, SubscriptionError> {
    let start_month = parse_month("start_date", start_date)?;
    let end_month = end_date.map(|raw| parse_month("end_date", raw)).transpose()?;

    if let Some(end) = end_month {
        if end < start_month {
            return Err(SubscriptionError::InvalidInput(format!(
                "end_date {end} is before start_date {start_month}"
            )));
        }
    }

    Ok(SubscriptionInput {
        service_name,
        price,
        user_id,
        start_month,
        end_month,
    })
}

fn parse_month(field: &str, raw: &str) -> Result<YearMonth, SubscriptionError> {
    raw.parse::<YearMonth>()
        .map_err(|err| SubscriptionError::InvalidInput(format!("{field}: {err}")))
}
