//! Filter Selection
//!
//! The user-chosen constraint tuple and the predicate every recompute
//! operation applies to the base dataset.

use crate::dataset::{CleanedDataset, GameRecord, DEFAULT_MIN_YEAR};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How the year range treats its own endpoints
///
/// `Exclusive` keeps the dashboard's historical behaviour: a game released
/// exactly in `year_min` or `year_max` is filtered out.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum YearBounds {
    #[default]
    Exclusive,
    Inclusive,
}

impl YearBounds {
    /// Check whether `year` lies within `[min, max]` under this policy
    pub fn contains(self, min: i32, max: i32, year: i32) -> bool {
        match self {
            YearBounds::Exclusive => year > min && year < max,
            YearBounds::Inclusive => year >= min && year <= max,
        }
    }
}

impl std::fmt::Display for YearBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearBounds::Exclusive => write!(f, "exclusive"),
            YearBounds::Inclusive => write!(f, "inclusive"),
        }
    }
}

impl std::str::FromStr for YearBounds {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exclusive" => Ok(YearBounds::Exclusive),
            "inclusive" => Ok(YearBounds::Inclusive),
            _ => Err(format!(
                "Invalid year bounds: {}. Use exclusive or inclusive",
                s
            )),
        }
    }
}

/// Current state of the three filter controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub year_min: i32,
    pub year_max: i32,
    pub genres: BTreeSet<String>,
    pub ratings: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new<G, R>(year_min: i32, year_max: i32, genres: G, ratings: R) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            year_min,
            year_max,
            genres: genres.into_iter().map(Into::into).collect(),
            ratings: ratings.into_iter().map(Into::into).collect(),
        }
    }

    /// Everything selected: the raw table's year span and every observed
    /// genre and rating
    pub fn full(dataset: &CleanedDataset) -> Self {
        let (year_min, year_max) = dataset
            .raw_years()
            .map(|r| (r.min, r.max))
            .unwrap_or((DEFAULT_MIN_YEAR, DEFAULT_MIN_YEAR));

        Self::new(
            year_min,
            year_max,
            dataset.genres().iter().cloned(),
            dataset.ratings().iter().cloned(),
        )
    }

    /// The four-part predicate: year within bounds, genre selected,
    /// rating selected
    pub fn matches(&self, record: &GameRecord, bounds: YearBounds) -> bool {
        bounds.contains(self.year_min, self.year_max, record.year)
            && self.genres.contains(&record.genre)
            && self.ratings.contains(&record.rating)
    }

    /// Rows of `dataset` passing [`FilterSelection::matches`], in dataset order
    pub fn filter<'a>(
        &'a self,
        dataset: &'a CleanedDataset,
        bounds: YearBounds,
    ) -> impl Iterator<Item = &'a GameRecord> + 'a {
        dataset
            .records()
            .iter()
            .filter(move |r| self.matches(r, bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{LoadStats, YearRange};

    fn record(year: i32, genre: &str, rating: &str) -> GameRecord {
        GameRecord::new("G", "PS2", year, genre, rating, 7.0, 70.0)
    }

    #[test]
    fn test_exclusive_bounds() {
        let b = YearBounds::Exclusive;
        assert!(!b.contains(2000, 2010, 2000));
        assert!(b.contains(2000, 2010, 2001));
        assert!(b.contains(2000, 2010, 2009));
        assert!(!b.contains(2000, 2010, 2010));
        // A one-year range can never match
        assert!(!b.contains(2005, 2005, 2005));
    }

    #[test]
    fn test_inclusive_bounds() {
        let b = YearBounds::Inclusive;
        assert!(b.contains(2000, 2010, 2000));
        assert!(b.contains(2000, 2010, 2010));
        assert!(!b.contains(2000, 2010, 2011));
        assert!(b.contains(2005, 2005, 2005));
    }

    #[test]
    fn test_year_bounds_parse() {
        assert_eq!("inclusive".parse::<YearBounds>(), Ok(YearBounds::Inclusive));
        assert_eq!("EXCLUSIVE".parse::<YearBounds>(), Ok(YearBounds::Exclusive));
        assert!("open".parse::<YearBounds>().is_err());
        assert_eq!(YearBounds::default(), YearBounds::Exclusive);
    }

    #[test]
    fn test_matches_all_predicates() {
        let sel = FilterSelection::new(2000, 2010, ["RPG"], ["E"]);
        let bounds = YearBounds::Exclusive;

        assert!(sel.matches(&record(2005, "RPG", "E"), bounds));
        assert!(!sel.matches(&record(2005, "Action", "E"), bounds));
        assert!(!sel.matches(&record(2005, "RPG", "T"), bounds));
        assert!(!sel.matches(&record(2010, "RPG", "E"), bounds));
    }

    #[test]
    fn test_empty_sets_match_nothing() {
        let sel = FilterSelection::new(2000, 2010, Vec::<String>::new(), ["E"]);
        assert!(!sel.matches(&record(2005, "RPG", "E"), YearBounds::Inclusive));

        let sel = FilterSelection::new(2000, 2010, ["RPG"], Vec::<String>::new());
        assert!(!sel.matches(&record(2005, "RPG", "E"), YearBounds::Inclusive));
    }

    #[test]
    fn test_full_selection_uses_raw_years() {
        let records = vec![record(2003, "RPG", "E"), record(2007, "Action", "T")];
        let raw = YearRange { min: 1985, max: 2016 };
        let ds = CleanedDataset::from_records(records, Some(raw), LoadStats::default());

        let sel = FilterSelection::full(&ds);
        assert_eq!((sel.year_min, sel.year_max), (1985, 2016));
        assert_eq!(sel.genres.len(), 2);
        assert!(sel.ratings.contains("T"));
        assert_eq!(sel.filter(&ds, YearBounds::Exclusive).count(), 2);
    }
}
