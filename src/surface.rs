//! Render surface trait for pluggable graphics backends
//!
//! This module provides the seam between the render loop and whatever
//! actually puts pixels on screen. The core never draws; it hands the
//! surface a read-only [`FrameView`] of the buffer once per frame.
//!
//! Surfaces are constructed on the render thread itself (the factory
//! closure passed to [`RealtimePlotter::spawn`](crate::RealtimePlotter::spawn)
//! runs there), so toolkit objects that must live on their creating
//! thread need no `Send` bound.

use crate::error::Result;
use crate::series::SeriesSpec;
use crate::table::Table;

/// A read-only view of the buffer for one frame
///
/// Borrowed from under the table lock for the duration of a draw call.
/// Draw work should stay proportional to reading lengths and values;
/// holding expensive computation here delays the producer.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    table: &'a Table,
    series: &'a [SeriesSpec],
}

impl<'a> FrameView<'a> {
    /// Create a frame view over a table and the registered series
    pub fn new(table: &'a Table, series: &'a [SeriesSpec]) -> Self {
        Self { table, series }
    }

    /// The underlying table
    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// The series registered before streaming started
    pub fn series(&self) -> &'a [SeriesSpec] {
        self.series
    }

    /// Number of complete rows visible in this frame
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// The table generation visible in this frame
    pub fn generation(&self) -> u64 {
        self.table.generation()
    }

    /// The (x, y) points of one series, oldest first
    ///
    /// Column indices outside the table yield an empty iterator.
    pub fn series_points(&self, spec: &SeriesSpec) -> impl Iterator<Item = (f64, f64)> + 'a {
        let empty: &[f64] = &[];
        let xs = self
            .table
            .column(spec.x_column)
            .map(|c| c.values())
            .unwrap_or(empty);
        let ys = self
            .table
            .column(spec.y_column)
            .map(|c| c.values())
            .unwrap_or(empty);
        xs.iter().zip(ys.iter()).map(|(&x, &y)| (x, y))
    }
}

/// Interface between the render loop and a graphics backend
///
/// All three methods run on the render thread. `initialize` is called
/// exactly once after streaming starts, `draw` once per frame, and
/// `finish` once when the loop exits.
///
/// # Example
///
/// ```ignore
/// struct ConsoleSurface;
///
/// impl PlotSurface for ConsoleSurface {
///     fn initialize(&mut self, series: &[SeriesSpec]) -> Result<()> {
///         println!("plotting {} series", series.len());
///         Ok(())
///     }
///
///     fn draw(&mut self, frame: &FrameView<'_>) -> Result<()> {
///         println!("{} rows", frame.row_count());
///         Ok(())
///     }
/// }
/// ```
pub trait PlotSurface {
    /// Prepare the surface for the given series
    ///
    /// Called once on the render thread, after activation and before
    /// the first frame. An error here stops the render loop before it
    /// begins.
    fn initialize(&mut self, series: &[SeriesSpec]) -> Result<()>;

    /// Draw one frame from the current buffer contents
    ///
    /// The view is valid only for the duration of the call. Errors are
    /// logged and reported, and the loop carries on with the next frame.
    fn draw(&mut self, frame: &FrameView<'_>) -> Result<()>;

    /// Tear down the surface when the render loop exits
    fn finish(&mut self) {}
}

/// A surface that draws nothing
///
/// Useful for headless operation and tests that only care about the
/// buffering and lifecycle behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl PlotSurface for NullSurface {
    fn initialize(&mut self, _series: &[SeriesSpec]) -> Result<()> {
        Ok(())
    }

    fn draw(&mut self, _frame: &FrameView<'_>) -> Result<()> {
        Ok(())
    }
}
