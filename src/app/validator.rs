use crate::adapters::{build_store, LibPhoneNumberClassifier};
use crate::app::error::{ApiError, ApiResult};
use crate::config::AppConfig;
use crate::core::validation::BatchValidator;
use crate::core::{BatchResult, ConfigProvider};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct ValidatorState {
    pub validator: Arc<BatchValidator>,
}

impl ValidatorState {
    pub fn new(validator: BatchValidator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let store = build_store(&config.store);
        Self::new(BatchValidator::new(
            Arc::new(LibPhoneNumberClassifier::new()),
            store,
            config.store.validation_collection(),
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub numbers: Vec<String>,
}

pub fn validator_router(state: ValidatorState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/validate", post(validate))
        .route("/api/validate", post(validate))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "service": "validator"}))
}

async fn validate(
    State(state): State<ValidatorState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> ApiResult<Json<BatchResult>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected validation request: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;

    tracing::debug!("Validating batch of {} numbers", request.numbers.len());

    let batch = state
        .validator
        .validate_batch(&request.numbers)
        .await
        .map_err(|e| {
            tracing::error!("❌ Validation batch failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(batch))
}
