pub mod subscription_service;
pub mod total_cost_service;
