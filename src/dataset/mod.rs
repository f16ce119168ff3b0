//! Games Dataset Store
//!
//! Loads the games table once at startup and holds it immutably:
//!
//! - **types**: `GameRecord`, `CleanedDataset`, `LoadStats`
//! - **loader**: CSV reading and the one-time cleaning pass
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use gamedash::dataset::DatasetLoader;
//! use std::path::Path;
//!
//! let dataset = DatasetLoader::new()
//!     .with_min_year(2000)
//!     .load(Path::new("data/games.csv"))?;
//!
//! println!("{} games after cleaning", dataset.len());
//! # Ok::<(), gamedash::dataset::DatasetError>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use loader::{load, DatasetLoader, DEFAULT_MIN_YEAR, DEFAULT_UNKNOWN_SCORE_TOKEN};
pub use types::{CleanedDataset, GameRecord, LoadStats, YearRange};
