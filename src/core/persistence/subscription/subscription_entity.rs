use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::util::month_util::YearMonth;
use crate::domain::subscription::dto::subscription_patch_request::SubscriptionPatchRequest;

/// A stored subscription as returned by the record store.
///
/// Dates come back rendered as `MM-YYYY`; they are only parsed when the
/// subscription is re-written or billed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub service_name: String,
    /// Monthly price in minor currency units.
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Typed column values written on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionInput {
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_month: YearMonth,
    pub end_month: Option<YearMonth>,
}

impl SubscriptionEntity {
    /// Overwrites only the fields present in the patch.
    pub fn apply_update(&mut self, req: SubscriptionPatchRequest) {
        if let Some(v) = req.service_name {
            self.service_name = v.trim().to_string();
        }

        if let Some(v) = req.price {
            self.price = v;
        }

        if let Some(v) = req.start_date {
            self.start_date = v.trim().to_string();
        }

        // Outer None: field absent. Inner None: explicit null clears the end month.
        if let Some(v) = req.end_date {
            self.end_date = v.map(|s| s.trim().to_string());
        }
    }
}

impl SubscriptionInput {
    pub fn to_entity(&self, id: Uuid) -> SubscriptionEntity {
        SubscriptionEntity {
            id,
            service_name: self.service_name.clone(),
            price: self.price,
            user_id: self.user_id,
            start_date: self.start_month.to_string(),
            end_date: self.end_month.map(|m| m.to_string()),
        }
    }
}
