//! Score Correlation
//!
//! User score against critic score for every filtered game, one color per
//! genre.

use super::chart::{Channel, ChartSpec, MarkKind};
use super::selection::{FilterSelection, YearBounds};
use crate::dataset::CleanedDataset;
use serde_json::json;

pub const USER_SCORE_FIELD: &str = "User_Score";
pub const CRITIC_SCORE_FIELD: &str = "Critic_Score";
pub const GENRE_FIELD: &str = "Genre";
pub const NAME_FIELD: &str = "Name";
pub const PLATFORM_FIELD: &str = "Platform";

pub const SCATTER_TITLE: &str = "User and Critic Ratings by Genre";

/// Scatter chart of user score (x) vs. critic score (y), rows in dataset order
pub fn score_scatter(
    selection: &FilterSelection,
    dataset: &CleanedDataset,
    bounds: YearBounds,
) -> ChartSpec {
    let values = selection
        .filter(dataset, bounds)
        .map(|r| {
            json!({
                USER_SCORE_FIELD: r.user_score,
                CRITIC_SCORE_FIELD: r.critic_score,
                GENRE_FIELD: r.genre,
                NAME_FIELD: r.name,
                PLATFORM_FIELD: r.platform,
            })
        })
        .collect();

    ChartSpec::new(
        MarkKind::Point,
        Channel::quantitative(USER_SCORE_FIELD).title("User score"),
        Channel::quantitative(CRITIC_SCORE_FIELD).title("Critic score"),
    )
    .title(SCATTER_TITLE)
    .color(Channel::nominal(GENRE_FIELD))
    .tooltip(Channel::nominal(NAME_FIELD))
    .tooltip(Channel::nominal(PLATFORM_FIELD))
    .tooltip(Channel::quantitative(USER_SCORE_FIELD))
    .tooltip(Channel::quantitative(CRITIC_SCORE_FIELD))
    .values(values)
}
