//! Release Timeline
//!
//! Counts filtered releases per (year, platform) and lays them out as a
//! stacked area chart, one band per platform.

use super::chart::{Channel, ChartSpec, MarkKind};
use super::selection::{FilterSelection, YearBounds};
use crate::dataset::CleanedDataset;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

pub const YEAR_FIELD: &str = "Year_of_Release";
pub const PLATFORM_FIELD: &str = "Platform";
pub const COUNT_FIELD: &str = "Count";

pub const TIMELINE_TITLE: &str = "Video Game Releases by Year and Platform";

/// Number of filtered releases for one platform in one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseCount {
    pub year: i32,
    pub platform: String,
    pub count: usize,
}

/// Group filtered rows by (year, platform), ordered by year then platform
pub fn release_counts(
    selection: &FilterSelection,
    dataset: &CleanedDataset,
    bounds: YearBounds,
) -> Vec<ReleaseCount> {
    let mut groups: BTreeMap<(i32, &str), usize> = BTreeMap::new();
    for record in selection.filter(dataset, bounds) {
        *groups
            .entry((record.year, record.platform.as_str()))
            .or_insert(0) += 1;
    }

    groups
        .into_iter()
        .map(|((year, platform), count)| ReleaseCount {
            year,
            platform: platform.to_string(),
            count,
        })
        .collect()
}

/// Stacked-area chart of releases per year, colored by platform
pub fn release_timeline(
    selection: &FilterSelection,
    dataset: &CleanedDataset,
    bounds: YearBounds,
) -> ChartSpec {
    let values = release_counts(selection, dataset, bounds)
        .into_iter()
        .map(|c| {
            json!({
                YEAR_FIELD: c.year,
                PLATFORM_FIELD: c.platform,
                COUNT_FIELD: c.count,
            })
        })
        .collect();

    ChartSpec::new(
        MarkKind::Area,
        Channel::quantitative(YEAR_FIELD).title("Year of release").format("d"),
        Channel::quantitative(COUNT_FIELD).title("Releases").stacked(),
    )
    .title(TIMELINE_TITLE)
    .color(Channel::nominal(PLATFORM_FIELD))
    .stroke_dash(Channel::nominal(PLATFORM_FIELD))
    .tooltip(Channel::quantitative(YEAR_FIELD))
    .tooltip(Channel::nominal(PLATFORM_FIELD))
    .tooltip(Channel::quantitative(COUNT_FIELD))
    .with_line()
    .values(values)
}
