//! # gamedash
//!
//! Game Industry History - an interactive dashboard over a table of video
//! game releases, served over HTTP.
//!
//! ## Features
//!
//! - **One-time cleaning**: the games table is loaded and filtered once at
//!   startup, then shared read-only
//! - **Three views**: releases by year and platform, critic versus user
//!   score by genre, and the number of selected games
//! - **Reactive updates**: a control change recomputes exactly the outputs
//!   bound to it, over a WebSocket session or a stateless HTTP round-trip
//!
//! ## Modules
//!
//! - [`dataset`]: Loading and cleaning the games table
//! - [`recompute`]: Filter selection and the chart / count operations
//! - [`reactive`]: Control ids, callback registry and runtime
//! - [`layout`]: Page layout tree and HTML rendering
//! - [`api`]: HTTP server with Axum
//! - [`websocket`]: Per-page dashboard sessions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gamedash::dataset::DatasetLoader;
//! use gamedash::reactive::{ControlId, ControlValue, Runtime};
//! use gamedash::recompute::YearBounds;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = DatasetLoader::new().load(Path::new("data/games.csv"))?;
//! let runtime = Runtime::new(Arc::new(dataset), YearBounds::default());
//!
//! let mut selection = runtime.initial_selection();
//! let updates = runtime.apply(
//!     &mut selection,
//!     ControlId::RatingDropdown,
//!     ControlValue::Multi(vec!["E".into(), "T".into()]),
//! )?;
//!
//! for update in updates {
//!     println!("{} updated", update.output);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod dataset;
pub mod layout;
pub mod reactive;
pub mod recompute;
pub mod websocket;

// Re-export top-level types for convenience
pub use dataset::{CleanedDataset, DatasetError, DatasetLoader, GameRecord, LoadStats};

pub use recompute::{
    score_scatter, selection_count, release_timeline, ChartSpec, FilterSelection, YearBounds,
};

pub use reactive::{
    CallbackRegistry, ControlId, ControlValue, OutputId, OutputUpdate, OutputValue, Recompute,
    ReactiveError, Runtime,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::Config;
