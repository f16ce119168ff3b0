//! Recompute Callbacks
//!
//! Binds each recompute operation to the output it fills and the controls
//! it listens to.

use super::controls::{ControlId, OutputId, OutputValue};
use crate::dataset::CleanedDataset;
use crate::recompute::{
    release_timeline, score_scatter, selection_count, FilterSelection, YearBounds,
};

/// A pure function from the full filter state to one output
pub trait Recompute: Send + Sync {
    /// Output slot this callback fills
    fn output(&self) -> OutputId;

    /// Controls whose changes trigger this callback
    fn inputs(&self) -> &[ControlId] {
        &ControlId::ALL
    }

    /// Derive the output from the full selection and the base dataset
    fn compute(&self, selection: &FilterSelection, dataset: &CleanedDataset) -> OutputValue;
}

/// Stacked area of releases per year and platform
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseTimeline {
    pub bounds: YearBounds,
}

impl Recompute for ReleaseTimeline {
    fn output(&self) -> OutputId {
        OutputId::StackedArea
    }

    fn compute(&self, selection: &FilterSelection, dataset: &CleanedDataset) -> OutputValue {
        OutputValue::Figure(release_timeline(selection, dataset, self.bounds))
    }
}

/// User vs. critic score scatter
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreScatter {
    pub bounds: YearBounds,
}

impl Recompute for ScoreScatter {
    fn output(&self) -> OutputId {
        OutputId::CriticUserScatter
    }

    fn compute(&self, selection: &FilterSelection, dataset: &CleanedDataset) -> OutputValue {
        OutputValue::Figure(score_scatter(selection, dataset, self.bounds))
    }
}

/// Number of selected games
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionCount {
    pub bounds: YearBounds,
}

impl Recompute for SelectionCount {
    fn output(&self) -> OutputId {
        OutputId::SelectedGames
    }

    fn compute(&self, selection: &FilterSelection, dataset: &CleanedDataset) -> OutputValue {
        OutputValue::Count(selection_count(selection, dataset, self.bounds))
    }
}
