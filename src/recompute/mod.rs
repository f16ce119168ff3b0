//! Recompute Engine
//!
//! Pure operations mapping a filter selection and the cleaned dataset to one
//! UI-visible output each:
//!
//! - **timeline**: releases per (year, platform) as a stacked area chart
//! - **scatter**: user score vs. critic score, colored by genre
//! - **count**: number of selected games
//!
//! Each operation applies [`FilterSelection::matches`] on its own; nothing is
//! shared or cached between calls.
//!
//! ```text
//! FilterSelection + CleanedDataset → filter → aggregate → ChartSpec | usize
//! ```

pub mod chart;
pub mod count;
pub mod scatter;
pub mod selection;
pub mod timeline;

pub use chart::{Channel, ChartSpec, FieldType, MarkKind, VEGA_LITE_SCHEMA};
pub use count::selection_count;
pub use scatter::score_scatter;
pub use selection::{FilterSelection, YearBounds};
pub use timeline::{release_counts, release_timeline, ReleaseCount};
