use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::error::{EncryptionError, cause_chain};
use crate::models::{ErrorResponse, ResourceResponse, StatsResponse};
use crate::provider::Provider;
use crate::resource::{CiphertextInputs, CiphertextResource, Plan, Transition};
use crate::state::AppState;

/// Failures surfaced by the HTTP host.
#[derive(Debug)]
pub enum ApiError {
    Encryption(EncryptionError),
    NotFound(String),
}

impl From<EncryptionError> for ApiError {
    fn from(err: EncryptionError) -> Self {
        ApiError::Encryption(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Encryption(err) => {
                let status = match err {
                    EncryptionError::InvalidPublicKey(_)
                    | EncryptionError::InvalidPaddingOrHash { .. } => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    EncryptionError::PlaintextTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                    EncryptionError::EncryptionFailure { .. } => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                let summary = match err {
                    EncryptionError::InvalidPublicKey(_) => "Invalid public key".to_string(),
                    _ => err.to_string(),
                };
                let detail = cause_chain(&err);
                warn!(status = status.as_u16(), error = %detail, "request failed");

                (
                    status,
                    ErrorResponse {
                        error: format!("Encryption failed: {}", detail),
                        summary,
                        detail,
                        attribute: err.attribute(),
                    },
                )
            }
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: format!("Resource {} not found", id),
                    summary: "Resource not found".to_string(),
                    detail: format!("No rsa_ciphertext resource with id {:?} is in state", id),
                    attribute: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub async fn root() -> &'static str {
    "RSA Ciphertext Provider\n\nEndpoints:\n- GET /schema: Provider schema\n- POST /resources/rsa_ciphertext: Create a ciphertext\n- GET /resources/rsa_ciphertext/{id}: Read a ciphertext\n- PUT /resources/rsa_ciphertext/{id}: Apply a new configuration\n- DELETE /resources/rsa_ciphertext/{id}: Forget a ciphertext\n- GET /stats: Get service statistics"
}

// Handler to describe the provider and its resource types
pub async fn get_schema(State(state): State<Arc<AppState>>) -> Json<Provider> {
    Json(state.provider.clone())
}

// Handler to create a ciphertext resource
pub async fn create_ciphertext(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<CiphertextInputs>,
) -> Result<(StatusCode, Json<ResourceResponse>), ApiError> {
    let start = Instant::now();

    let created = CiphertextResource::create(&inputs)?;
    let response = ResourceResponse::from_state(&created).with_plan(Plan::Create);
    state.store.write().await.insert(created.id.clone(), created);

    info!(
        duration_ms = start.elapsed().as_millis() as u64,
        "create operation finished"
    );

    Ok((StatusCode::CREATED, Json(response)))
}

// Handler to read a ciphertext resource; reads never recompute anything
pub async fn read_ciphertext(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let store = state.store.read().await;
    let current = store.get(&id).cloned().ok_or(ApiError::NotFound(id))?;

    Ok(Json(ResourceResponse::from_state(&CiphertextResource::read(
        current,
    ))))
}

// Handler to apply a configuration to an existing resource
pub async fn apply_ciphertext(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(inputs): Json<CiphertextInputs>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let start = Instant::now();

    let mut store = state.store.write().await;
    let prior = store.get(&id).cloned().ok_or(ApiError::NotFound(id))?;

    let plan = CiphertextResource::plan(Some(&prior), &inputs);
    let transition = CiphertextResource::apply(Some(prior), &inputs)?;

    let mut response = ResourceResponse::from_state(transition.state()).with_plan(plan);
    if let Transition::Replaced { previous_id, state: replacement } = transition {
        store.remove(&previous_id);
        store.insert(replacement.id.clone(), replacement);
        response.replaced_id = Some(previous_id);
    }

    info!(
        plan = ?plan,
        duration_ms = start.elapsed().as_millis() as u64,
        "apply operation finished"
    );

    Ok(Json(response))
}

// Handler to delete a resource; the host only forgets it
pub async fn delete_ciphertext(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state.store.write().await.remove(&id);

    match removed {
        Some(current) => {
            CiphertextResource::delete(current);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::NotFound(id)),
    }
}

// Service health check and statistics
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: state.provider.version.clone(),
        resources: state.store.read().await.len(),
    })
}
