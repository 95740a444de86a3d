use anyhow::Result;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::errors::AppError;

/// Map a domain Result<T> into Json<T>, answering failures with `summary`.
pub fn to_json<T: serde::Serialize>(result: Result<T>, summary: &str) -> Result<Json<T>, AppError> {
    result.map(Json).map_err(|err| AppError::from_domain(err, summary))
}

pub fn to_status(
    result: Result<()>,
    status: StatusCode,
    summary: &str,
) -> Result<StatusCode, AppError> {
    result
        .map(|_| status)
        .map_err(|err| AppError::from_domain(err, summary))
}

/// Unwrap a JSON body, turning extractor rejections into a 400.
pub fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BodyParsingError(rejection.body_text()))
}

/// Unwrap a query string, turning extractor rejections into a 400.
pub fn query<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    params
        .map(|Query(value)| value)
        .map_err(|rejection| AppError::ValidationError(rejection.body_text()))
}

pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::ValidationError(format!("invalid {what}")))
}
