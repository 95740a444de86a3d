//! Subscription API DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::util::json::parse_id;
use crate::core::persistence::subscription::subscription_filter::SubscriptionFilter;
use crate::core::util::month_util::YearMonth;
use crate::errors::AppError;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct PaginationQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query string of `GET /subscriptions/total_cost`. Empty values count as absent.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct TotalCostQuery {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TotalCostResponse {
    pub total_cost: i64,
}

impl TotalCostQuery {
    pub fn into_filter(self) -> Result<SubscriptionFilter, AppError> {
        let user_id = parse_id(self.user_id.as_deref().unwrap_or_default(), "user_id")?;

        let mut filter = SubscriptionFilter::for_user(user_id);
        filter.service_name = non_empty(self.service_name);
        filter.start_from = parse_month_filter("start_date", self.start_date)?;
        filter.end_until = parse_month_filter("end_date", self.end_date)?;
        Ok(filter)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_month_filter(field: &str, value: Option<String>) -> Result<Option<YearMonth>, AppError> {
    non_empty(value)
        .map(|raw| {
            raw.parse::<YearMonth>()
                .map_err(|err| AppError::ValidationError(format!("{field}: {err}")))
        })
        .transpose()
}
