//! In-memory store with the same filter semantics as the SQL repository.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use uuid::Uuid;

use super::subscription_api_repository_trait::SubscriptionApiRepository;
use super::subscription_entity::{SubscriptionEntity, SubscriptionInput};
use super::subscription_filter::SubscriptionFilter;
use crate::core::util::month_util::YearMonth;

#[derive(Default)]
pub struct SubscriptionMemoryRepository {
    rows: Mutex<Vec<SubscriptionEntity>>,
    unavailable: bool,
}

impl SubscriptionMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails, as if the database were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Inserts a row verbatim, bypassing date validation.
    pub fn seed(&self, entity: SubscriptionEntity) {
        self.rows.lock().unwrap().push(entity);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(anyhow!("connection refused"));
        }
        Ok(())
    }
}

fn month_of(raw: &str) -> Option<YearMonth> {
    raw.parse().ok()
}

fn matches(entity: &SubscriptionEntity, filter: &SubscriptionFilter) -> bool {
    if entity.user_id != filter.user_id {
        return false;
    }

    if let Some(ref name) = filter.service_name {
        if &entity.service_name != name {
            return false;
        }
    }

    if let Some(from) = filter.start_from {
        match month_of(&entity.start_date) {
            Some(start) if start >= from => {}
            _ => return false,
        }
    }

    if let Some(until) = filter.end_until {
        if let Some(ref end) = entity.end_date {
            match month_of(end) {
                Some(end) if end <= until => {}
                _ => return false,
            }
        }
    }

    true
}

#[async_trait]
impl SubscriptionApiRepository for SubscriptionMemoryRepository {
    async fn create(&self, input: &SubscriptionInput) -> Result<Uuid> {
        self.ensure_available()?;
        let id = Uuid::new_v4();
        self.rows.lock().unwrap().push(input.to_entity(id));
        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<SubscriptionEntity>> {
        self.ensure_available()?;
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<SubscriptionEntity>> {
        self.ensure_available()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by_key(|s| s.id);
        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn update(&self, id: Uuid, input: &SubscriptionInput) -> Result<bool> {
        self.ensure_available()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|s| s.id == id) {
            Some(row) => {
                *row = input.to_entity(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        self.ensure_available()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() < before)
    }

    async fn fetch_filtered(&self, filter: &SubscriptionFilter) -> Result<Vec<SubscriptionEntity>> {
        self.ensure_available()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| matches(s, filter))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<()> {
        self.ensure_available()
    }
}
