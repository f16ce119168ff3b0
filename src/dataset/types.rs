//! Core data types for the games dataset
//!
//! - `GameRecord`: one cleaned row of the source table
//! - `CleanedDataset`: the immutable, startup-derived set of valid records
//! - `LoadStats`: what the cleaning pass kept and dropped

use serde::{Deserialize, Serialize};

/// A single video game release
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameRecord {
    pub name: String,
    pub platform: String,
    /// Year of release
    pub year: i32,
    pub genre: String,
    pub publisher: String,
    /// Critic score, 0-100
    pub critic_score: f64,
    /// User score, 0.0-10.0
    pub user_score: f64,
    /// Age-rating code (E, T, M, ...)
    pub rating: String,
}

impl GameRecord {
    /// Create a record with the fields the filters and charts read.
    ///
    /// Publisher defaults to empty; set it with [`GameRecord::publisher`].
    pub fn new(
        name: impl Into<String>,
        platform: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        rating: impl Into<String>,
        user_score: f64,
        critic_score: f64,
    ) -> Self {
        Self {
            name: name.into(),
            platform: platform.into(),
            year,
            genre: genre.into(),
            publisher: String::new(),
            critic_score,
            user_score,
            rating: rating.into(),
        }
    }

    /// Builder method: set publisher
    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = publisher.into();
        self
    }
}

/// Inclusive span of observed release years
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Widen the range to cover `year`
    pub fn extend(range: Option<Self>, year: i32) -> Self {
        match range {
            Some(r) => Self {
                min: r.min.min(year),
                max: r.max.max(year),
            },
            None => Self {
                min: year,
                max: year,
            },
        }
    }
}

/// Row accounting for one run of the cleaning pass
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows in the source table
    pub rows_read: usize,
    /// Rows whose user score was the sentinel token
    pub dropped_unknown_score: usize,
    /// Rows released before the year floor, or with no year at all
    pub dropped_before_min_year: usize,
    /// Rows with any other missing field
    pub dropped_missing: usize,
}

impl LoadStats {
    /// Rows that survived cleaning
    pub fn rows_kept(&self) -> usize {
        self.rows_read
            - self.dropped_unknown_score
            - self.dropped_before_min_year
            - self.dropped_missing
    }
}

impl std::fmt::Display for LoadStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "read={} kept={} unknown_score={} before_min_year={} missing={}",
            self.rows_read,
            self.rows_kept(),
            self.dropped_unknown_score,
            self.dropped_before_min_year,
            self.dropped_missing
        )
    }
}

/// The immutable set of valid game records
///
/// Built once by the loader and shared behind an `Arc` for the process
/// lifetime. Option lists keep first-appearance order.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    records: Vec<GameRecord>,
    raw_years: Option<YearRange>,
    genres: Vec<String>,
    ratings: Vec<String>,
    platforms: Vec<String>,
    stats: LoadStats,
}

impl CleanedDataset {
    /// Assemble a dataset from already-clean records.
    ///
    /// `raw_years` is the year span of the uncleaned table; when `None` the
    /// span of `records` is used.
    pub fn from_records(
        records: Vec<GameRecord>,
        raw_years: Option<YearRange>,
        stats: LoadStats,
    ) -> Self {
        let raw_years = raw_years.or_else(|| {
            records
                .iter()
                .fold(None, |acc, r| Some(YearRange::extend(acc, r.year)))
        });

        let genres = distinct(records.iter().map(|r| r.genre.as_str()));
        let ratings = distinct(records.iter().map(|r| r.rating.as_str()));
        let platforms = distinct(records.iter().map(|r| r.platform.as_str()));

        Self {
            records,
            raw_years,
            genres,
            ratings,
            platforms,
            stats,
        }
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Year span of the source table before cleaning
    pub fn raw_years(&self) -> Option<YearRange> {
        self.raw_years
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn ratings(&self) -> &[String] {
        &self.ratings
    }

    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<GameRecord> {
        vec![
            GameRecord::new("A", "PS2", 2003, "Sports", "E", 8.0, 80.0),
            GameRecord::new("B", "Wii", 2001, "Racing", "E", 7.0, 70.0),
            GameRecord::new("C", "PS2", 2008, "Sports", "T", 6.5, 60.0),
        ]
    }

    #[test]
    fn test_distinct_keeps_first_appearance_order() {
        let ds = CleanedDataset::from_records(sample(), None, LoadStats::default());
        assert_eq!(ds.genres(), ["Sports", "Racing"]);
        assert_eq!(ds.ratings(), ["E", "T"]);
        assert_eq!(ds.platforms(), ["PS2", "Wii"]);
    }

    #[test]
    fn test_raw_years_falls_back_to_records() {
        let ds = CleanedDataset::from_records(sample(), None, LoadStats::default());
        assert_eq!(ds.raw_years(), Some(YearRange { min: 2001, max: 2008 }));

        let raw = YearRange { min: 1980, max: 2016 };
        let ds = CleanedDataset::from_records(sample(), Some(raw), LoadStats::default());
        assert_eq!(ds.raw_years(), Some(raw));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = CleanedDataset::from_records(Vec::new(), None, LoadStats::default());
        assert!(ds.is_empty());
        assert_eq!(ds.raw_years(), None);
        assert!(ds.genres().is_empty());
    }

    #[test]
    fn test_stats_rows_kept() {
        let stats = LoadStats {
            rows_read: 10,
            dropped_unknown_score: 2,
            dropped_before_min_year: 3,
            dropped_missing: 1,
        };
        assert_eq!(stats.rows_kept(), 4);
        assert!(stats.to_string().contains("kept=4"));
    }
}
