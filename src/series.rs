//! Series identity and registration types
//!
//! A series is a logical trace on the plot: two column indices (x, y)
//! plus a rendering kind. Styling beyond the kind is the surface's
//! business, keyed by [`SeriesId`].

use std::sync::atomic::{AtomicU64, Ordering};

static SERIES_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a registered series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(u64);

impl SeriesId {
    pub(crate) fn next() -> Self {
        Self(SERIES_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotKind {
    /// Connected line segments
    #[default]
    Line,
    /// Individual markers
    Scatter,
    /// Stair-step line
    Step,
    /// Filled area under the line
    Area,
}

impl PlotKind {
    /// All available kinds
    pub fn all() -> &'static [PlotKind] {
        &[
            PlotKind::Line,
            PlotKind::Scatter,
            PlotKind::Step,
            PlotKind::Area,
        ]
    }
}

impl std::fmt::Display for PlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotKind::Line => write!(f, "Line"),
            PlotKind::Scatter => write!(f, "Scatter"),
            PlotKind::Step => write!(f, "Step"),
            PlotKind::Area => write!(f, "Area"),
        }
    }
}

/// A registered series: a plot kind over an (x, y) column pair
///
/// Column indices refer to the table at draw time; indices that fall
/// outside the table simply yield no points.
#[derive(Debug, Clone)]
pub struct SeriesSpec {
    /// Stable handle for this series
    pub id: SeriesId,
    /// How the series is drawn
    pub kind: PlotKind,
    /// Index of the column providing x values
    pub x_column: usize,
    /// Index of the column providing y values
    pub y_column: usize,
}

impl SeriesSpec {
    /// Create a spec with a fresh id
    pub fn new(kind: PlotKind, x_column: usize, y_column: usize) -> Self {
        Self {
            id: SeriesId::next(),
            kind,
            x_column,
            y_column,
        }
    }
}
