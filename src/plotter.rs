//! Streaming facade for real-time plotting
//!
//! This module ties the pieces together: it owns the shared table, spawns
//! the render thread at construction, and exposes the producer-side API
//! for configuring, streaming, and stopping a plot.
//!
//! # Architecture
//!
//! The plotter runs the render loop in a separate thread from the producer,
//! communicating via channels:
//!
//! - [`RealtimePlotter`] - Producer-side handle; owns the render thread
//! - [`PlotSurface`] - Graphics backend, constructed on the render thread
//! - [`RenderEvent`] - Feedback from the render thread (start, errors, stop)
//! - [`StopHandle`](crate::StopHandle) - Cancel-only handle for other threads
//!
//! The render thread is spawned immediately but blocks until [`start`]
//! releases it, so columns and series can be configured without racing
//! the first frame. Dropping the plotter stops the loop and joins the
//! thread.
//!
//! [`start`]: RealtimePlotter::start
//!
//! # Example
//!
//! ```ignore
//! use streamplot::{NullSurface, PlotKind, PlotterConfig, RealtimePlotter};
//! use std::time::Duration;
//!
//! let mut plotter = RealtimePlotter::spawn(PlotterConfig::default(), || NullSurface)?;
//!
//! plotter.add_columns(["X", "Sine", "Cosine"])?;
//! plotter.add_series(PlotKind::Line, 0, 1)?;
//! plotter.add_series(PlotKind::Line, 0, 2)?;
//! plotter.start();
//!
//! for i in 0..10_000 {
//!     let x = i as f64 / 100.0;
//!     plotter.insert_values(&[x, x.sin(), x.cos()])?;
//!     std::thread::sleep(Duration::from_millis(1));
//! }
//!
//! plotter.stop();
//! plotter.shutdown()?;
//! ```

use crate::config::PlotterConfig;
use crate::error::{PlotError, Result, ResultExt};
use crate::lifecycle::{Lifecycle, StopHandle};
use crate::render::{RenderDriver, RenderEvent, RenderHook, RenderStats, StatsCell};
use crate::series::{PlotKind, SeriesId, SeriesSpec};
use crate::surface::PlotSurface;
use crate::table::Table;
use crossbeam_channel::{bounded, unbounded, Receiver};
use std::sync::{Arc, RwLock};
use std::thread::JoinHandle;

/// Producer-side handle for a live plot
///
/// Owns the shared table and the render thread. All methods are called
/// from the producer thread except [`StopHandle::stop`], which works from
/// anywhere.
pub struct RealtimePlotter {
    /// Buffer shared with the render thread
    table: Arc<RwLock<Table>>,
    /// Series registered before start
    series: Vec<SeriesSpec>,
    /// Start/stop state and control channel
    lifecycle: Arc<Lifecycle>,
    /// Statistics written by the render thread
    stats: Arc<StatsCell>,
    /// Events reported by the render thread
    event_rx: Receiver<RenderEvent>,
    /// Join handle, taken on shutdown
    render_thread: Option<JoinHandle<()>>,
}

impl RealtimePlotter {
    /// Spawn a plotter with the given surface and no per-frame hook
    ///
    /// The factory runs on the render thread, so the surface type does
    /// not need to be `Send`. The thread starts immediately and blocks
    /// until [`start`](Self::start) or [`stop`](Self::stop).
    pub fn spawn<S, F>(config: PlotterConfig, make_surface: F) -> Result<Self>
    where
        S: PlotSurface + 'static,
        F: FnOnce() -> S + Send + 'static,
    {
        Self::spawn_with_hook(config, make_surface, || {})
    }

    /// Spawn a plotter with a per-frame hook
    ///
    /// The hook runs on the render thread before every draw; see
    /// [`RenderHook`].
    pub fn spawn_with_hook<S, F, H>(
        config: PlotterConfig,
        make_surface: F,
        hook: H,
    ) -> Result<Self>
    where
        S: PlotSurface + 'static,
        F: FnOnce() -> S + Send + 'static,
        H: RenderHook + 'static,
    {
        let table = Arc::new(RwLock::new(Table::new()));
        let stats = Arc::new(StatsCell::default());
        let (control_tx, control_rx) = unbounded();
        let (event_tx, event_rx) = bounded(config.event_capacity());
        let interval = config.update_interval();

        let thread_table = Arc::clone(&table);
        let thread_stats = Arc::clone(&stats);

        let render_thread = std::thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || {
                let driver = RenderDriver::new(
                    Box::new(make_surface()),
                    Box::new(hook),
                    thread_table,
                    thread_stats,
                    event_tx,
                    interval,
                );
                driver.run(control_rx);
            })
            .map_err(PlotError::from)
            .context("Failed to spawn render thread")?;

        tracing::info!("Spawned render thread '{}'", config.thread_name);

        Ok(Self {
            table,
            series: Vec::new(),
            lifecycle: Arc::new(Lifecycle::new(control_tx)),
            stats,
            event_rx,
            render_thread: Some(render_thread),
        })
    }

    /// Append a column, returning the new column count
    ///
    /// Named columns must be unique. Columns belong to the configuration
    /// phase; adding one while streaming is safe but leaves earlier rows
    /// of the new column filled with NaN.
    pub fn add_column(&self, name: Option<&str>) -> Result<usize> {
        self.table
            .write()
            .expect("table lock poisoned")
            .add_column(name)
    }

    /// Append several named columns at once
    pub fn add_columns<I, S>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = self.table.write().expect("table lock poisoned");
        for name in names {
            table.add_column(Some(name.as_ref()))?;
        }
        Ok(())
    }

    /// Register a series over an (x, y) column pair
    ///
    /// The series list freezes when streaming starts; registration after
    /// [`start`](Self::start) is rejected.
    pub fn add_series(
        &mut self,
        kind: PlotKind,
        x_column: usize,
        y_column: usize,
    ) -> Result<SeriesId> {
        if self.lifecycle.is_started() {
            return Err(PlotError::AlreadyStarted);
        }

        let spec = SeriesSpec::new(kind, x_column, y_column);
        let id = spec.id;
        self.series.push(spec);
        Ok(id)
    }

    /// Append one row of samples, one value per column in column order
    ///
    /// Safe to call while the render thread is drawing; the row becomes
    /// visible to the next frame as a whole or not at all.
    pub fn insert_values(&self, values: &[f64]) -> Result<()> {
        self.table
            .write()
            .expect("table lock poisoned")
            .insert_row(values)
    }

    /// Release the render thread and begin periodic redraws
    ///
    /// Idempotent; only the first call has an effect. The series list is
    /// frozen here.
    pub fn start(&self) {
        if self.lifecycle.activate(self.series.clone()) {
            tracing::info!("Plotter started");
        }
    }

    /// Request the render loop to stop
    ///
    /// Idempotent, and returns without waiting for the render thread;
    /// the thread is joined on drop or [`shutdown`](Self::shutdown).
    /// Stopping before [`start`](Self::start) releases a waiting render
    /// thread immediately.
    pub fn stop(&self) {
        if self.lifecycle.cancel() {
            tracing::info!("Plotter stop requested");
        }
    }

    /// A cloneable handle that can stop this plotter from any thread
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle::new(Arc::clone(&self.lifecycle))
    }

    /// Whether streaming has started
    pub fn is_started(&self) -> bool {
        self.lifecycle.is_started()
    }

    /// Whether a stop has been requested
    pub fn is_stopped(&self) -> bool {
        self.lifecycle.is_cancelled()
    }

    /// Run a closure against the table under the read lock
    ///
    /// Keep the closure brief; the producer and render thread both wait
    /// while it runs.
    pub fn with_table<R>(&self, f: impl FnOnce(&Table) -> R) -> R {
        let table = self.table.read().expect("table lock poisoned");
        f(&table)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.with_table(|t| t.column_count())
    }

    /// Number of complete rows
    pub fn row_count(&self) -> usize {
        self.with_table(|t| t.row_count())
    }

    /// The index of a named column
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.with_table(|t| t.column_index(name))
            .ok_or_else(|| PlotError::ColumnNotFound(name.to_string()))
    }

    /// A copy of a named column's samples
    pub fn column_values(&self, name: &str) -> Result<Vec<f64>> {
        self.with_table(|t| t.column_by_name(name).map(|c| c.values().to_vec()))
            .ok_or_else(|| PlotError::ColumnNotFound(name.to_string()))
    }

    /// Current render thread statistics
    pub fn render_stats(&self) -> RenderStats {
        self.stats.snapshot()
    }

    /// Try to receive one render event without blocking
    pub fn try_event(&self) -> Option<RenderEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Receive all pending render events
    pub fn drain_events(&self) -> Vec<RenderEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Stop the plotter and wait for the render thread to finish
    ///
    /// Unlike dropping, this surfaces a panicked render thread as an
    /// error.
    pub fn shutdown(mut self) -> Result<()> {
        self.lifecycle.cancel();

        if let Some(handle) = self.render_thread.take() {
            handle
                .join()
                .map_err(|_| PlotError::RenderThread("render thread panicked".to_string()))?;
        }
        Ok(())
    }
}

impl Drop for RealtimePlotter {
    /// Stops the render loop and joins the thread before the table is
    /// released
    fn drop(&mut self) {
        self.lifecycle.cancel();

        if let Some(handle) = self.render_thread.take() {
            if handle.join().is_err() {
                tracing::error!("Render thread panicked during shutdown");
            }
        }
    }
}
