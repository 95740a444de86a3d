//! System controller: liveness and database health

use axum::extract::State;

use crate::app_state::AppState;
use crate::errors::AppError;

pub struct SystemController;

impl SystemController {
    pub async fn root() -> &'static str {
        "Server is running!"
    }

    pub async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
        state
            .subscription_service
            .health()
            .await
            .map_err(|err| AppError::from_domain(err, "database unavailable"))?;
        Ok("OK")
    }
}
