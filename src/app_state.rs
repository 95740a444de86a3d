use std::sync::Arc;

use uuid::Uuid;

use crate::config::AppConfig;
use crate::core::persistence::subscription::subscription_api_repository_trait::DynSubscriptionRepository;
use crate::core::persistence::subscription::subscription_entity::SubscriptionEntity;
use crate::core::persistence::subscription::subscription_filter::SubscriptionFilter;
use crate::domain::subscription::dto::subscription_create_request::SubscriptionCreateRequest;
use crate::domain::subscription::dto::subscription_patch_request::SubscriptionPatchRequest;
use crate::domain::subscription::service::subscription_service;
use crate::domain::subscription::service::total_cost_service::{self, TotalCost};

macro_rules! delegate_repo_service {
    ($(fn $name:ident($($arg:ident : $typ:ty),*) -> $ret:ty => $path:path;)+) => {
        $(
            pub async fn $name(&self, $($arg: $typ),*) -> anyhow::Result<$ret> {
                $path(self.repo.as_ref(), $($arg),*).await
            }
        )+
    };
}

#[derive(Clone)]
pub struct AppState {
    pub subscription_service: Arc<SubscriptionService>,
}

pub fn build_app_state(repo: DynSubscriptionRepository, config: &AppConfig) -> AppState {
    AppState {
        subscription_service: Arc::new(SubscriptionService::new(
            repo,
            config.open_ended_horizon_years,
        )),
    }
}

pub struct SubscriptionService {
    repo: DynSubscriptionRepository,
    open_ended_horizon_years: u32,
}

impl SubscriptionService {
    pub fn new(repo: DynSubscriptionRepository, open_ended_horizon_years: u32) -> Self {
        Self {
            repo,
            open_ended_horizon_years,
        }
    }

    delegate_repo_service! {
        fn create(req: SubscriptionCreateRequest) -> Uuid => subscription_service::create_subscription;
        fn get(id: Uuid) -> SubscriptionEntity => subscription_service::get_subscription;
        fn list(limit: Option<i64>, offset: Option<i64>) -> Vec<SubscriptionEntity> => subscription_service::list_subscriptions;
        fn update(id: Uuid, req: SubscriptionPatchRequest) -> () => subscription_service::update_subscription;
        fn delete(id: Uuid) -> () => subscription_service::delete_subscription;
    }

    pub async fn get_total_cost(&self, filter: SubscriptionFilter) -> anyhow::Result<TotalCost> {
        total_cost_service::get_total_cost(self.repo.as_ref(), filter, self.open_ended_horizon_years)
            .await
    }

    pub async fn health(&self) -> anyhow::Result<()> {
        self.repo.health_check().await
    }
}
