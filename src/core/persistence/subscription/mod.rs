pub mod subscription_api_repository_trait;
pub mod subscription_entity;
pub mod subscription_filter;
pub mod subscription_repository;

#[cfg(test)]
pub mod subscription_memory_repository;
