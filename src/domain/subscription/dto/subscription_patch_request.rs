use serde::Deserialize;
use validator::Validate;

use super::{validate_month, validate_not_blank};

/// Partial update payload. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SubscriptionPatchRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub service_name: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i32>,
    #[validate(custom(function = "validate_month"))]
    pub start_date: Option<String>,
    /// `null` clears the end month, making the subscription open-ended.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub end_date: Option<Option<String>>,
}
