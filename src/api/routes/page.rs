//! Page Route
//!
//! - GET / - The dashboard, with every output rendered for the initial
//!   selection

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::layout::{build_layout, render_page};

/// GET /
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let runtime = &state.runtime;
    let selection = runtime.initial_selection();

    let layout = build_layout(runtime.dataset(), &selection);
    let initial = runtime.render_all(&selection);

    Html(render_page(&layout, &initial))
}
