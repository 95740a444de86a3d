pub mod subscription_dto;
