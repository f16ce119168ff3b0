//! Selection Count

use super::selection::{FilterSelection, YearBounds};
use crate::dataset::CleanedDataset;

/// Number of games passing the filter
pub fn selection_count(
    selection: &FilterSelection,
    dataset: &CleanedDataset,
    bounds: YearBounds,
) -> usize {
    selection.filter(dataset, bounds).count()
}
