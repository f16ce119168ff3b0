//! Layout Routes
//!
//! Describe the page to clients that render it themselves.
//!
//! - GET /api/v1/layout - Layout tree
//! - GET /api/v1/dependencies - Callback bindings and control options

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{ControlDto, DependenciesResponse};
use crate::api::state::AppState;
use crate::layout::{build_layout, Node};
use crate::reactive::ControlId;

/// GET /api/v1/layout
pub async fn get_layout(State(state): State<Arc<AppState>>) -> Json<Node> {
    let runtime = &state.runtime;
    let selection = runtime.initial_selection();
    Json(build_layout(runtime.dataset(), &selection))
}

/// GET /api/v1/dependencies
pub async fn get_dependencies(State(state): State<Arc<AppState>>) -> Json<DependenciesResponse> {
    let runtime = &state.runtime;
    let dataset = runtime.dataset();
    let selection = runtime.initial_selection();

    let controls = ControlId::ALL
        .into_iter()
        .map(|id| ControlDto {
            id,
            options: match id {
                ControlId::YearSelector => Vec::new(),
                ControlId::GenreDropdown => dataset.genres().to_vec(),
                ControlId::RatingDropdown => dataset.ratings().to_vec(),
            },
            initial: id.value_in(&selection),
        })
        .collect();

    Json(DependenciesResponse {
        bindings: runtime.registry().bindings(),
        controls,
        year_bounds: runtime.bounds(),
    })
}
