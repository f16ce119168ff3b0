//! Dataset Routes
//!
//! - GET /api/v1/dataset - Cleaned dataset summary and load statistics

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::DatasetSummary;
use crate::api::state::AppState;
use crate::dataset::CleanedDataset;

/// GET /api/v1/dataset
pub async fn get_dataset(State(state): State<Arc<AppState>>) -> Json<DatasetSummary> {
    Json(summarize(state.runtime.dataset()))
}

pub fn summarize(dataset: &CleanedDataset) -> DatasetSummary {
    DatasetSummary {
        records: dataset.len(),
        raw_years: dataset.raw_years(),
        genres: dataset.genres().to_vec(),
        ratings: dataset.ratings().to_vec(),
        platforms: dataset.platforms().to_vec(),
        stats: dataset.stats(),
    }
}
