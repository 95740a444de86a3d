//! Subscription use cases: CRUD orchestration and cost aggregation.

pub mod dto;
pub mod errors;
pub mod service;
