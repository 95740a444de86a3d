use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::subscription_api_repository_trait::SubscriptionApiRepository;
use super::subscription_entity::{SubscriptionEntity, SubscriptionInput};
use super::subscription_filter::SubscriptionFilter;
use crate::core::util::month_util::YearMonth;

/// PostgreSQL-backed subscription store.
#[derive(Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionApiRepository for SubscriptionRepository {
    async fn create(&self, input: &SubscriptionInput) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO subscriptions (service_name, price, user_id, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&input.service_name)
        .bind(input.price)
        .bind(input.user_id)
        .bind(input.start_month.first_day())
        .bind(input.end_month.map(YearMonth::first_day))
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert subscription")?;

        debug!(%id, "Inserted subscription row");
        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<SubscriptionEntity>> {
        sqlx::query_as::<_, SubscriptionEntity>(
            r#"
            SELECT id, service_name, price, user_id,
                   to_char(start_date, 'MM-YYYY') AS start_date,
                   to_char(end_date, 'MM-YYYY') AS end_date
            FROM subscriptions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get subscription by id")
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<SubscriptionEntity>> {
        sqlx::query_as::<_, SubscriptionEntity>(
            r#"
            SELECT id, service_name, price, user_id,
                   to_char(start_date, 'MM-YYYY') AS start_date,
                   to_char(end_date, 'MM-YYYY') AS end_date
            FROM subscriptions
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list subscriptions")
    }

    async fn update(&self, id: Uuid, input: &SubscriptionInput) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions
            SET service_name = $2, price = $3, user_id = $4, start_date = $5, end_date = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&input.service_name)
        .bind(input.price)
        .bind(input.user_id)
        .bind(input.start_month.first_day())
        .bind(input.end_month.map(YearMonth::first_day))
        .execute(&self.pool)
        .await
        .context("Failed to update subscription")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete subscription")?;

        Ok(result.rows_affected() > 0)
    }

    async fn fetch_filtered(&self, filter: &SubscriptionFilter) -> Result<Vec<SubscriptionEntity>> {
        sqlx::query_as::<_, SubscriptionEntity>(
            r#"
            SELECT id, service_name, price, user_id,
                   to_char(start_date, 'MM-YYYY') AS start_date,
                   to_char(end_date, 'MM-YYYY') AS end_date
            FROM subscriptions
            WHERE user_id = $1
              AND ($2::text IS NULL OR service_name = $2)
              AND ($3::date IS NULL OR start_date >= $3)
              AND ($4::date IS NULL OR end_date IS NULL OR end_date <= $4)
            "#,
        )
        .bind(filter.user_id)
        .bind(filter.service_name.as_deref())
        .bind(filter.start_from.map(YearMonth::first_day))
        .bind(filter.end_until.map(YearMonth::first_day))
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch subscriptions for total cost")
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }
}
