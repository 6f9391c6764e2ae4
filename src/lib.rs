//! # streamplot: real-time streaming plot core
//!
//! A concurrency core for live plotting: a producer thread appends rows of
//! samples to a shared append-only table while a dedicated render thread
//! periodically redraws the accumulated data through a pluggable surface.
//! The producer is never blocked by rendering, and a frame never observes
//! a partially inserted row.
//!
//! ## Architecture
//!
//! - **Table**: Append-only columnar buffer behind a reader-writer lock
//! - **Render thread**: Spawned at construction, gated until `start()`,
//!   redraws on a repeating timer, joined on drop
//! - **Surface**: Graphics backend trait, constructed on the render thread
//! - **Communication**: Crossbeam channels for control and feedback events
//!
//! ## Lifecycle
//!
//! The lifecycle is one-way: configure, `start()`, stream, `stop()`. Both
//! transitions are idempotent, and stopping before starting releases the
//! waiting render thread so teardown never deadlocks.
//!
//! ## Example
//!
//! ```ignore
//! use streamplot::{NullSurface, PlotKind, PlotterConfig, RealtimePlotter};
//! use std::time::Duration;
//!
//! fn main() -> streamplot::Result<()> {
//!     let config = PlotterConfig::default().with_update_interval(Duration::from_millis(1));
//!     let mut plotter = RealtimePlotter::spawn(config, || NullSurface)?;
//!
//!     plotter.add_columns(["X", "Sine", "Cosine"])?;
//!     plotter.add_series(PlotKind::Line, 0, 1)?;
//!     plotter.add_series(PlotKind::Line, 0, 2)?;
//!     plotter.start();
//!
//!     for i in 0..10_000 {
//!         let x = i as f64 / 100.0;
//!         plotter.insert_values(&[x, x.sin(), x.cos()])?;
//!         std::thread::sleep(Duration::from_millis(1));
//!     }
//!
//!     plotter.stop();
//!     plotter.shutdown()
//! }
//! ```

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod plotter;
pub mod render;
pub mod series;
pub mod surface;
pub mod table;

// Re-export commonly used types
pub use config::PlotterConfig;
pub use error::{PlotError, Result};
pub use lifecycle::StopHandle;
pub use plotter::RealtimePlotter;
pub use render::{RenderEvent, RenderHook, RenderStats};
pub use series::{PlotKind, SeriesId, SeriesSpec};
pub use surface::{FrameView, NullSurface, PlotSurface};
pub use table::{Column, Table};
