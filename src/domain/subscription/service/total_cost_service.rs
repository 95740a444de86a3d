//! Total cost of a user's subscriptions over their active months.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::core::persistence::subscription::subscription_api_repository_trait::SubscriptionApiRepository;
use crate::core::persistence::subscription::subscription_entity::SubscriptionEntity;
use crate::core::persistence::subscription::subscription_filter::SubscriptionFilter;
use crate::core::util::month_util::{MonthParseError, MonthRange, YearMonth};

/// How far past the current month an open-ended subscription is billed.
/// Totals for open-ended subscriptions are therefore bounded, not infinite.
pub const DEFAULT_OPEN_ENDED_HORIZON_YEARS: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalCost {
    pub total_cost: i64,
    pub counted_records: usize,
    /// Records left out because a stored date did not parse.
    pub skipped_records: usize,
}

pub async fn get_total_cost(
    repo: &dyn SubscriptionApiRepository,
    filter: SubscriptionFilter,
    horizon_years: u32,
) -> Result<TotalCost> {
    info!(user_id = %filter.user_id, "Getting total cost");

    let subscriptions = repo
        .fetch_filtered(&filter)
        .await
        .context("Failed to get subscriptions for total cost")?;

    let ceiling = open_ended_ceiling(Utc::now().date_naive(), horizon_years);
    let summary = aggregate_total_cost(&subscriptions, ceiling);

    if summary.skipped_records > 0 {
        warn!(
            user_id = %filter.user_id,
            skipped = summary.skipped_records,
            "Total cost excludes subscriptions with unparsable dates"
        );
    }

    info!(
        user_id = %filter.user_id,
        total_cost = summary.total_cost,
        records = summary.counted_records,
        "Got total cost"
    );
    Ok(summary)
}

/// Last month billed for subscriptions without an end month.
pub fn open_ended_ceiling(today: NaiveDate, horizon_years: u32) -> YearMonth {
    let current = YearMonth::from_date(today);
    current.add_years(horizon_years).unwrap_or(current)
}

/// Sum of `price` over every active month of every subscription.
///
/// Overlapping subscriptions each contribute in full. A record whose dates
/// fail to parse is skipped and counted in `skipped_records`.
pub fn aggregate_total_cost(subscriptions: &[SubscriptionEntity], ceiling: YearMonth) -> TotalCost {
    let mut summary = TotalCost::default();

    for sub in subscriptions {
        let months = match billed_months(sub, ceiling) {
            Ok(months) => months,
            Err(err) => {
                warn!(subscription_id = %sub.id, error = %err, "Skipping subscription with unparsable date");
                summary.skipped_records += 1;
                continue;
            }
        };

        let price = i64::from(sub.price);
        for _ in months {
            summary.total_cost = summary.total_cost.saturating_add(price);
        }
        summary.counted_records += 1;
    }

    summary
}

fn billed_months(sub: &SubscriptionEntity, ceiling: YearMonth) -> Result<MonthRange, MonthParseError> {
    let start: YearMonth = sub.start_date.parse()?;
    let last = match sub.end_date.as_deref() {
        Some(end) => end.parse()?,
        None => ceiling,
    };
    Ok(start.through(last))
}
