//! Dataset Loader
//!
//! Reads the games CSV and runs the one-time cleaning pass:
//!
//! ```text
//! rows → drop sentinel user score → drop year < floor → drop any missing field → parse
//! ```
//!
//! Any framing or parse failure is fatal; there is no partial load.

use super::error::{DatasetError, DatasetResult};
use super::types::{CleanedDataset, GameRecord, LoadStats, YearRange};
use std::io::Read;
use std::path::Path;

/// Token the source table uses for a user score that is not yet known
pub const DEFAULT_UNKNOWN_SCORE_TOKEN: &str = "tbd";

/// Earliest release year kept by the cleaning pass
pub const DEFAULT_MIN_YEAR: i32 = 2000;

/// Cell values treated as missing, in addition to the empty string
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const COL_NAME: &str = "Name";
const COL_PLATFORM: &str = "Platform";
const COL_YEAR: &str = "Year_of_Release";
const COL_GENRE: &str = "Genre";
const COL_PUBLISHER: &str = "Publisher";
const COL_CRITIC_SCORE: &str = "Critic_Score";
const COL_USER_SCORE: &str = "User_Score";
const COL_RATING: &str = "Rating";

/// Positions of the required columns in the header row
struct ColumnMap {
    name: usize,
    platform: usize,
    year: usize,
    genre: usize,
    publisher: usize,
    critic_score: usize,
    user_score: usize,
    rating: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> DatasetResult<Self> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or(DatasetError::MissingColumn(column))
        };

        Ok(Self {
            name: find(COL_NAME)?,
            platform: find(COL_PLATFORM)?,
            year: find(COL_YEAR)?,
            genre: find(COL_GENRE)?,
            publisher: find(COL_PUBLISHER)?,
            critic_score: find(COL_CRITIC_SCORE)?,
            user_score: find(COL_USER_SCORE)?,
            rating: find(COL_RATING)?,
        })
    }
}

/// Loader for the games table with configurable cleaning rules
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    unknown_score_token: String,
    min_year: i32,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    /// Create a loader with the default cleaning rules
    pub fn new() -> Self {
        Self {
            unknown_score_token: DEFAULT_UNKNOWN_SCORE_TOKEN.to_string(),
            min_year: DEFAULT_MIN_YEAR,
        }
    }

    /// Set the sentinel user-score token
    pub fn with_unknown_score_token(mut self, token: &str) -> Self {
        self.unknown_score_token = token.to_string();
        self
    }

    /// Set the earliest release year to keep
    pub fn with_min_year(mut self, year: i32) -> Self {
        self.min_year = year;
        self
    }

    /// Load and clean the table at `path`
    pub fn load(&self, path: &Path) -> DatasetResult<CleanedDataset> {
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }

        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;

        let dataset = self.clean(reader)?;
        tracing::info!(path = ?path, stats = %dataset.stats(), "Dataset loaded");
        Ok(dataset)
    }

    /// Load and clean a table held in memory
    pub fn load_str(&self, csv_data: &str) -> DatasetResult<CleanedDataset> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_data.as_bytes());

        self.clean(reader)
    }

    fn clean<R: Read>(&self, mut reader: csv::Reader<R>) -> DatasetResult<CleanedDataset> {
        let headers = reader.headers()?.clone();
        let cols = ColumnMap::from_headers(&headers)?;

        let mut records = Vec::new();
        let mut raw_years: Option<YearRange> = None;
        let mut stats = LoadStats::default();

        for result in reader.records() {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

            stats.rows_read += 1;

            // The slider spans every dated row, including ones cleaning drops.
            let year = match cell(cols.year) {
                v if is_missing(v) => None,
                v => Some(parse_year(v, line)?),
            };
            if let Some(y) = year {
                raw_years = Some(YearRange::extend(raw_years, y));
            }

            if cell(cols.user_score) == self.unknown_score_token {
                stats.dropped_unknown_score += 1;
                continue;
            }

            let year = match year {
                Some(y) if y >= self.min_year => y,
                _ => {
                    stats.dropped_before_min_year += 1;
                    continue;
                }
            };

            if row.iter().any(|v| is_missing(v.trim())) {
                stats.dropped_missing += 1;
                continue;
            }

            records.push(GameRecord {
                name: cell(cols.name).to_string(),
                platform: cell(cols.platform).to_string(),
                year,
                genre: cell(cols.genre).to_string(),
                publisher: cell(cols.publisher).to_string(),
                critic_score: parse_score(cell(cols.critic_score), COL_CRITIC_SCORE, line)?,
                user_score: parse_score(cell(cols.user_score), COL_USER_SCORE, line)?,
                rating: cell(cols.rating).to_string(),
            });
        }

        if records.is_empty() {
            tracing::warn!(stats = %stats, "Cleaning left no rows; dashboard will be empty");
        }

        Ok(CleanedDataset::from_records(records, raw_years, stats))
    }
}

/// Load a table with the default cleaning rules
pub fn load(path: &Path) -> DatasetResult<CleanedDataset> {
    DatasetLoader::new().load(path)
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || NA_TOKENS.contains(&value)
}

/// Years may be written as floats ("2006.0") but must be integral
fn parse_year(value: &str, line: u64) -> DatasetResult<i32> {
    let malformed = || DatasetError::Malformed {
        line,
        column: COL_YEAR,
        value: value.to_string(),
    };

    if let Ok(year) = value.parse::<i32>() {
        return Ok(year);
    }

    let year = value.parse::<f64>().map_err(|_| malformed())?;
    if !year.is_finite() || year.fract() != 0.0 || year.abs() > f64::from(i32::MAX) {
        return Err(malformed());
    }
    Ok(year as i32)
}

fn parse_score(value: &str, column: &'static str, line: u64) -> DatasetResult<f64> {
    match value.parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err(DatasetError::Malformed {
            line,
            column,
            value: value.to_string(),
        }),
    }
}
