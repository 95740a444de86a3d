use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::subscription_entity::{SubscriptionEntity, SubscriptionInput};
use super::subscription_filter::SubscriptionFilter;

pub type DynSubscriptionRepository = Arc<dyn SubscriptionApiRepository>;

/// API-facing repository abstraction for subscriptions.
#[async_trait]
pub trait SubscriptionApiRepository: Send + Sync {
    async fn create(&self, input: &SubscriptionInput) -> Result<Uuid>;

    /// `Ok(None)` when no row has this id.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<SubscriptionEntity>>;

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<SubscriptionEntity>>;

    /// Returns `false` when no row was updated.
    async fn update(&self, id: Uuid, input: &SubscriptionInput) -> Result<bool>;

    /// Returns `false` when no row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn fetch_filtered(&self, filter: &SubscriptionFilter) -> Result<Vec<SubscriptionEntity>>;

    async fn health_check(&self) -> Result<()>;
}
