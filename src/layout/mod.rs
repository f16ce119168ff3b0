//! Presentation Layer
//!
//! Static layout tree of the dashboard page. The tree never changes shape at
//! runtime; outputs are filled in place by id.
//!
//! - **mod**: the `Node` tree and the dashboard's composition
//! - **html**: renders a tree to a complete HTML document

pub mod html;

pub use html::render_page;

use crate::dataset::CleanedDataset;
use crate::reactive::{ControlId, OutputId};
use crate::recompute::FilterSelection;
use serde::Serialize;
use std::collections::BTreeMap;

pub const PAGE_TITLE: &str = "Game Industry History";

pub const DESCRIPTION: &str = "This dashboard provides insights into the history of the gaming \
industry. It is based on the \"games.csv\" data table, which contains information about video \
games such as their names, platforms, year of release, genre, critic score, user score, and \
rating. The dashboard allows users to filter the data based on genre and rating using multiple \
selection filters. The filtered data is then used to plot two interactive graphs: 1. A stacked \
area plot that shows the number of game releases by year and platform. 2. A scatter plot that \
displays the relationship between critic scores and user scores, grouped by genre. The plot uses \
different colors to distinguish between genres. A third filter allows users to set a range of \
years to further refine the data displayed in the graphs. Additionally, an interactive text box \
displays the number of games selected based on the filters applied.";

/// Years labelled on the range slider
pub const YEAR_MARKS: [i32; 3] = [2000, 2007, 2016];

/// One element of the page
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Page {
        title: String,
        children: Vec<Node>,
    },
    Row {
        children: Vec<Node>,
    },
    Col {
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<u8>,
        children: Vec<Node>,
    },
    Heading {
        text: String,
    },
    Paragraph {
        text: String,
    },
    Label {
        text: String,
    },
    Dropdown {
        id: ControlId,
        options: Vec<String>,
        value: Vec<String>,
        multi: bool,
    },
    RangeSlider {
        id: ControlId,
        min: i32,
        max: i32,
        step: i32,
        value: [i32; 2],
        marks: BTreeMap<i32, String>,
    },
    Graph {
        id: OutputId,
    },
    Text {
        id: OutputId,
    },
}

impl Node {
    fn row(children: Vec<Node>) -> Self {
        Node::Row { children }
    }

    fn col(width: Option<u8>, children: Vec<Node>) -> Self {
        Node::Col { width, children }
    }

    fn label(text: &str) -> Self {
        Node::Label {
            text: text.to_string(),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Page { children, .. } | Node::Row { children } | Node::Col { children, .. } => {
                children
            }
            _ => &[],
        }
    }

    /// Control ids in document order
    pub fn controls(&self) -> Vec<ControlId> {
        let mut ids = Vec::new();
        self.visit(&mut |node| match node {
            Node::Dropdown { id, .. } | Node::RangeSlider { id, .. } => ids.push(*id),
            _ => {}
        });
        ids
    }

    /// Output placeholder ids in document order
    pub fn outputs(&self) -> Vec<OutputId> {
        let mut ids = Vec::new();
        self.visit(&mut |node| match node {
            Node::Graph { id } | Node::Text { id } => ids.push(*id),
            _ => {}
        });
        ids
    }

    fn visit(&self, f: &mut impl FnMut(&Node)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }
}

/// Compose the dashboard page for `dataset`, with controls preset to
/// `selection`
pub fn build_layout(dataset: &CleanedDataset, selection: &FilterSelection) -> Node {
    let genre_selector = Node::Dropdown {
        id: ControlId::GenreDropdown,
        options: dataset.genres().to_vec(),
        value: selection.genres.iter().cloned().collect(),
        multi: true,
    };

    let rating_selector = Node::Dropdown {
        id: ControlId::RatingDropdown,
        options: dataset.ratings().to_vec(),
        value: selection.ratings.iter().cloned().collect(),
        multi: true,
    };

    let (min, max) = dataset
        .raw_years()
        .map(|r| (r.min, r.max))
        .unwrap_or((selection.year_min, selection.year_max));

    let year_selector = Node::RangeSlider {
        id: ControlId::YearSelector,
        min,
        max,
        step: 1,
        value: [selection.year_min, selection.year_max],
        marks: YEAR_MARKS.iter().map(|y| (*y, y.to_string())).collect(),
    };

    Node::Page {
        title: PAGE_TITLE.to_string(),
        children: vec![
            Node::row(vec![Node::Heading {
                text: PAGE_TITLE.to_string(),
            }]),
            Node::row(vec![Node::Paragraph {
                text: DESCRIPTION.to_string(),
            }]),
            Node::row(vec![
                Node::col(None, vec![Node::label("Genre selector"), genre_selector]),
                Node::col(None, vec![Node::label("Rating selector"), rating_selector]),
            ]),
            Node::row(vec![
                Node::col(
                    None,
                    vec![
                        Node::label("Selected games:"),
                        Node::Text {
                            id: OutputId::SelectedGames,
                        },
                    ],
                ),
                Node::col(None, Vec::new()),
            ]),
            Node::row(vec![
                Node::col(
                    Some(5),
                    vec![
                        Node::label(
                            "Stacked Area Plot of Video Game Releases by Year and Platform",
                        ),
                        Node::Graph {
                            id: OutputId::StackedArea,
                        },
                    ],
                ),
                Node::col(
                    Some(5),
                    vec![
                        Node::label("Genre-Based Scatter Plot of User and Critic Ratings"),
                        Node::Graph {
                            id: OutputId::CriticUserScatter,
                        },
                    ],
                ),
            ]),
            Node::row(vec![
                Node::col(Some(3), vec![Node::label("Year Range Selector"), year_selector]),
                Node::col(None, Vec::new()),
            ]),
        ],
    }
}
