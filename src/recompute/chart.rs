//! Chart Specifications
//!
//! Vega-Lite v5 specs built from a table of rows and a set of
//! column → visual-channel mappings. The browser renders them with
//! Vega-Embed; nothing here draws.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Vega-Lite schema every spec declares
pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// A renderable chart: inline data plus mark and encoding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub width: String,
    pub data: InlineData,
    pub mark: Mark,
    pub encoding: Encoding,
}

/// Rows embedded in the spec
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InlineData {
    pub values: Vec<Value>,
}

/// Mark definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkKind,
    pub tooltip: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Area,
    Point,
}

/// Measurement type of an encoded field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Nominal,
    Ordinal,
}

/// Channel mappings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Encoding {
    pub x: Channel,
    pub y: Channel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Channel>,
    /// Outline dash pattern, per category
    #[serde(rename = "strokeDash", default, skip_serializing_if = "Option::is_none")]
    pub stroke_dash: Option<Channel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tooltip: Vec<Channel>,
}

/// One column → channel mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Channel {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Axis {
    pub format: String,
}

impl Channel {
    pub fn new(field: impl Into<String>, kind: FieldType) -> Self {
        Self {
            field: field.into(),
            kind,
            title: None,
            stack: None,
            axis: None,
        }
    }

    pub fn quantitative(field: impl Into<String>) -> Self {
        Self::new(field, FieldType::Quantitative)
    }

    pub fn nominal(field: impl Into<String>) -> Self {
        Self::new(field, FieldType::Nominal)
    }

    /// Builder method: set axis / legend title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method: stack values from zero
    pub fn stacked(mut self) -> Self {
        self.stack = Some("zero".to_string());
        self
    }

    /// Builder method: axis label format (d3-format)
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.axis = Some(Axis {
            format: format.into(),
        });
        self
    }
}

impl ChartSpec {
    /// Create a spec with the given mark and x/y mappings, no rows yet
    pub fn new(kind: MarkKind, x: Channel, y: Channel) -> Self {
        Self {
            schema: VEGA_LITE_SCHEMA.to_string(),
            title: None,
            width: "container".to_string(),
            data: InlineData::default(),
            mark: Mark {
                kind,
                tooltip: true,
                line: None,
            },
            encoding: Encoding {
                x,
                y,
                color: None,
                stroke_dash: None,
                tooltip: Vec::new(),
            },
        }
    }

    /// Builder method: set chart title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method: map a column to color
    pub fn color(mut self, channel: Channel) -> Self {
        self.encoding.color = Some(channel);
        self
    }

    /// Builder method: map a column to the outline dash pattern
    pub fn stroke_dash(mut self, channel: Channel) -> Self {
        self.encoding.stroke_dash = Some(channel);
        self
    }

    /// Builder method: add a tooltip field
    pub fn tooltip(mut self, channel: Channel) -> Self {
        self.encoding.tooltip.push(channel);
        self
    }

    /// Builder method: outline filled marks
    pub fn with_line(mut self) -> Self {
        self.mark.line = Some(true);
        self
    }

    /// Builder method: set the data rows
    pub fn values(mut self, values: Vec<Value>) -> Self {
        self.data.values = values;
        self
    }

    /// Rows embedded in the spec
    pub fn rows(&self) -> &[Value] {
        &self.data.values
    }

    /// Whether the chart has nothing to draw
    pub fn is_empty(&self) -> bool {
        self.data.values.is_empty()
    }
}
