//! Cell content, alignment, and sort keys.

use std::cmp::Ordering;

use serde::Serialize;

/// Horizontal alignment of a column's header and cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left aligned; the default.
    #[default]
    Left,
    /// Right aligned, used for numeric columns.
    Right,
    /// Centred.
    Center,
}

/// Displayable content of a single table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Cell {
    /// Plain text.
    Text {
        /// Text shown in the cell.
        text: String,
    },
    /// Emphasised text, such as a row's primary label.
    Strong {
        /// Text shown in the cell.
        text: String,
    },
    /// A short label rendered as a badge with a named tone.
    Badge {
        /// Badge label.
        text: String,
        /// Presentation tone, for example `teal` or `orange`.
        tone: String,
    },
}

impl Cell {
    /// Plain text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Emphasised text cell.
    pub fn strong(text: impl Into<String>) -> Self {
        Self::Strong { text: text.into() }
    }

    /// Badge cell with a presentation tone.
    pub fn badge(text: impl Into<String>, tone: impl Into<String>) -> Self {
        Self::Badge {
            text: text.into(),
            tone: tone.into(),
        }
    }

    /// Text carried by the cell regardless of its presentation.
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } | Self::Strong { text } | Self::Badge { text, .. } => text,
        }
    }
}

/// Value a sortable column compares rows by.
///
/// Numbers compare numerically and text compares lexicographically. When a
/// column mixes both, numbers order before text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortValue {
    /// Numeric key.
    Number(i64),
    /// Text key.
    Text(String),
}

impl SortValue {
    /// Text sort key.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for SortValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => left.cmp(right),
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}
