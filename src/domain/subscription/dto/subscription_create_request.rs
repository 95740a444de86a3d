use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{validate_month, validate_not_blank};

/// Create payload. Months are `MM-YYYY`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubscriptionCreateRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub service_name: String,
    #[validate(range(min = 0))]
    pub price: i32,
    pub user_id: Uuid,
    #[validate(custom(function = "validate_month"))]
    pub start_date: String,
    #[validate(custom(function = "validate_month"))]
    pub end_date: Option<String>,
}
