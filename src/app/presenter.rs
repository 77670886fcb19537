use crate::adapters::{build_store, HttpValidatorClient};
use crate::app::render;
use crate::config::AppConfig;
use crate::core::engine::{GenerationRequest, PipelineEngine};
use crate::core::ConfigProvider;
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct PresenterState {
    pub engine: Arc<PipelineEngine>,
}

impl PresenterState {
    pub fn new(engine: PipelineEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let store = build_store(&config.store);
        let validator = Arc::new(HttpValidatorClient::new(
            config.presenter.validator_url.clone(),
        ));
        Self::new(PipelineEngine::new(
            store,
            validator,
            config.store.generated_collection(),
        ))
    }
}

/// Fields are strings so bad input can be reported in plain text.
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    pub quantity: String,
    pub country_code: String,
}

pub fn presenter_router(state: PresenterState) -> Router {
    Router::new()
        .route("/", get(index).post(generate))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "service": "presenter"}))
}

async fn index() -> Html<String> {
    Html(render::render_page(None))
}

fn plain_error(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, message.into()).into_response()
}

async fn generate(
    State(state): State<PresenterState>,
    form: Result<Form<GenerateForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return plain_error(rejection.body_text()),
    };

    let quantity: u32 = match form.quantity.trim().parse() {
        Ok(quantity) => quantity,
        Err(_) => return plain_error(format!("Invalid quantity: {}", form.quantity)),
    };

    let request = GenerationRequest {
        quantity,
        country_code: form.country_code,
    };

    match state.engine.run(&request).await {
        Ok(report) => Html(render::render_page(Some(&report))).into_response(),
        Err(e) => {
            tracing::warn!("Rejected generation request: {}", e);
            plain_error(e.user_friendly_message())
        }
    }
}
