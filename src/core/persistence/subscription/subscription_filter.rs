use uuid::Uuid;

use crate::core::util::month_util::YearMonth;

/// Conjunctive filter for the total-cost fetch.
///
/// `start_from` bounds the subscription's own start from below.
/// `end_until` matches open-ended subscriptions or those ending on or before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub user_id: Uuid,
    pub service_name: Option<String>,
    pub start_from: Option<YearMonth>,
    pub end_until: Option<YearMonth>,
}

impl SubscriptionFilter {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id,
            service_name: None,
            start_from: None,
            end_until: None,
        }
    }
}
