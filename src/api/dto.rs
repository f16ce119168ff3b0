//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::dataset::{LoadStats, YearRange};
use crate::reactive::{Binding, ControlId, ControlValue, OutputUpdate};
use crate::recompute::YearBounds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================
// UPDATE DTOs
// ============================================

/// Input-change round-trip request
///
/// `inputs` carries the page's full control state; controls left out keep
/// their initial value.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// Control that triggered the update; none recomputes every output
    #[serde(default)]
    pub changed: Option<ControlId>,
    /// Current value of each control
    #[serde(default)]
    pub inputs: BTreeMap<ControlId, ControlValue>,
}

/// Input-change round-trip response
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Recomputed outputs, in registration order
    pub outputs: Vec<OutputUpdate>,
}

// ============================================
// DEPENDENCY DTOs
// ============================================

/// Callback wiring and control state a client needs to drive the page
#[derive(Debug, Serialize)]
pub struct DependenciesResponse {
    /// Output ← inputs bindings
    pub bindings: Vec<Binding>,
    /// Every control with its options and initial value
    pub controls: Vec<ControlDto>,
    /// Year endpoint policy in force; absent for a custom callback set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_bounds: Option<YearBounds>,
}

/// One control's option list and initial value
#[derive(Debug, Serialize)]
pub struct ControlDto {
    pub id: ControlId,
    /// Selectable options; empty for the range control
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub initial: ControlValue,
}

// ============================================
// DATASET DTOs
// ============================================

/// Summary of the cleaned dataset
#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    /// Records kept after cleaning
    pub records: usize,
    /// Year span of the raw table, before cleaning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_years: Option<YearRange>,
    pub genres: Vec<String>,
    pub ratings: Vec<String>,
    pub platforms: Vec<String>,
    /// Row accounting of the cleaning pass
    pub stats: LoadStats,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy", or "degraded" when the dataset is empty
    pub status: String,
    /// Dataset status: "ok" or "empty"
    pub dataset: String,
    /// Records available to filter
    pub records: usize,
    /// Open WebSocket sessions
    pub ws_connections: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Service version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_full_state() {
        let json = r#"{
            "changed": "genre_dropdown",
            "inputs": {
                "year_selector": [2000, 2016],
                "genre_dropdown": ["RPG", "Action"],
                "rating_dropdown": ["E"]
            }
        }"#;
        let req: UpdateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.changed, Some(ControlId::GenreDropdown));
        assert_eq!(req.inputs.len(), 3);
        assert_eq!(
            req.inputs[&ControlId::YearSelector],
            ControlValue::Range([2000, 2016])
        );
    }

    #[test]
    fn test_update_request_defaults() {
        let req: UpdateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.changed.is_none());
        assert!(req.inputs.is_empty());
    }

    #[test]
    fn test_update_request_unknown_control() {
        let json = r#"{"inputs": {"platform_dropdown": ["PS2"]}}"#;
        assert!(serde_json::from_str::<UpdateRequest>(json).is_err());
    }
}
