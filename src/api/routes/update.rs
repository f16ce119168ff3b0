//! Update Route
//!
//! Stateless input-change round-trip for clients without a WebSocket.
//!
//! - POST /api/v1/update - Full control state in, recomputed outputs out

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{UpdateRequest, UpdateResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// POST /api/v1/update
///
/// Rebuilds the selection from `inputs` and recomputes the outputs
/// subscribed to `changed`, or every output when `changed` is absent.
pub async fn update_outputs(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UpdateRequest>, JsonRejection>,
) -> ApiResult<Json<UpdateResponse>> {
    let Json(req) = body.map_err(|e| ApiError::Validation(e.body_text()))?;

    let runtime = &state.runtime;
    let selection = runtime.selection_from(req.inputs)?;
    let outputs = runtime.recompute(&selection, req.changed);

    tracing::debug!(
        changed = ?req.changed,
        outputs = outputs.len(),
        "Update round-trip"
    );

    Ok(Json(UpdateResponse { outputs }))
}
