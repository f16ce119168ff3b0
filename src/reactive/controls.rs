//! Control and Output Identifiers
//!
//! Names the three input controls and three output slots of the page, and
//! the values that flow through them.

use crate::recompute::{ChartSpec, FilterSelection};
use serde::{Deserialize, Serialize};

/// An input control on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlId {
    /// Year range slider
    YearSelector,
    /// Genre multi-select
    GenreDropdown,
    /// Rating multi-select
    RatingDropdown,
}

impl ControlId {
    pub const ALL: [ControlId; 3] = [
        ControlId::YearSelector,
        ControlId::GenreDropdown,
        ControlId::RatingDropdown,
    ];

    /// DOM / wire identifier
    pub fn as_str(self) -> &'static str {
        match self {
            ControlId::YearSelector => "year_selector",
            ControlId::GenreDropdown => "genre_dropdown",
            ControlId::RatingDropdown => "rating_dropdown",
        }
    }

    /// Value shape this control accepts
    pub fn kind(self) -> ValueKind {
        match self {
            ControlId::YearSelector => ValueKind::Range,
            ControlId::GenreDropdown | ControlId::RatingDropdown => ValueKind::Multi,
        }
    }

    /// Read this control's value out of a selection
    pub fn value_in(self, selection: &FilterSelection) -> ControlValue {
        match self {
            ControlId::YearSelector => {
                ControlValue::Range([selection.year_min, selection.year_max])
            }
            ControlId::GenreDropdown => {
                ControlValue::Multi(selection.genres.iter().cloned().collect())
            }
            ControlId::RatingDropdown => {
                ControlValue::Multi(selection.ratings.iter().cloned().collect())
            }
        }
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a control value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Range,
    Multi,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Range => write!(f, "range"),
            ValueKind::Multi => write!(f, "multi"),
        }
    }
}

/// Value reported by a control: `[min, max]` or a list of selected options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Range([i32; 2]),
    Multi(Vec<String>),
}

impl ControlValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ControlValue::Range(_) => ValueKind::Range,
            ControlValue::Multi(_) => ValueKind::Multi,
        }
    }
}

/// An output slot on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputId {
    /// Release timeline figure
    StackedArea,
    /// Score scatter figure
    CriticUserScatter,
    /// Selected games count
    SelectedGames,
}

impl OutputId {
    pub const ALL: [OutputId; 3] = [
        OutputId::StackedArea,
        OutputId::CriticUserScatter,
        OutputId::SelectedGames,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputId::StackedArea => "stacked_area",
            OutputId::CriticUserScatter => "critic_user_scatter",
            OutputId::SelectedGames => "selected_games",
        }
    }
}

impl std::fmt::Display for OutputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an output slot displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OutputValue {
    Figure(ChartSpec),
    Count(usize),
}

impl OutputValue {
    pub fn as_figure(&self) -> Option<&ChartSpec> {
        match self {
            OutputValue::Figure(spec) => Some(spec),
            OutputValue::Count(_) => None,
        }
    }

    pub fn as_count(&self) -> Option<usize> {
        match self {
            OutputValue::Count(n) => Some(*n),
            OutputValue::Figure(_) => None,
        }
    }
}

/// A freshly recomputed output, ready to replace the slot's content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputUpdate {
    pub output: OutputId,
    pub value: OutputValue,
}
