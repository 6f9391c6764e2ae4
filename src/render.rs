//! Render thread implementation
//!
//! This module contains the loop that runs on the dedicated render thread
//! and periodically redraws the shared table through the configured
//! surface. It communicates with the producer thread through crossbeam
//! channels.
//!
//! # Responsibilities
//!
//! The render thread handles:
//!
//! - **Start gate**: Blocks until the producer starts or stops the plotter
//! - **Surface lifecycle**: Initializes the surface once, tears it down on exit
//! - **Frame pacing**: Redraws at the configured interval between control checks
//! - **Statistics tracking**: Counts frames, draw errors, and dropped events
//! - **Error handling**: Draw failures are logged and reported, never fatal
//!
//! # Frame pacing
//!
//! The loop waits on the control channel with a deadline instead of
//! sleeping, so cancellation interrupts the wait immediately while frames
//! still fire at the configured rate. When a frame overruns its slot the
//! ticker restarts from now rather than bursting to catch up.

use crate::lifecycle::ControlEvent;
use crate::surface::{FrameView, PlotSurface};
use crate::table::Table;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Per-frame extension hook
///
/// Runs on the render thread immediately before each draw, outside the
/// table lock. Implementations must be `Send` to move onto the render
/// thread, and should return quickly; a slow hook delays every frame.
///
/// Any `FnMut() + Send` closure works:
///
/// ```ignore
/// let plotter = RealtimePlotter::spawn_with_hook(config, || NullSurface, move || {
///     frame_counter.fetch_add(1, Ordering::Relaxed);
/// })?;
/// ```
pub trait RenderHook: Send {
    /// Called once per frame, before the surface draws
    fn pre_render(&mut self);
}

impl<F: FnMut() + Send> RenderHook for F {
    fn pre_render(&mut self) {
        self()
    }
}

/// Events reported by the render thread
#[derive(Debug, Clone)]
pub enum RenderEvent {
    /// The surface was initialized and the first frame drawn
    Started,
    /// A draw call failed; the loop continues
    DrawFailed { message: String },
    /// The render loop exited
    Stopped,
}

/// Snapshot of render thread statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames drawn successfully
    pub frames_rendered: u64,
    /// Draw calls that returned an error
    pub draw_errors: u64,
    /// Row count visible in the most recent frame
    pub rows_last_frame: u64,
    /// Table generation visible in the most recent frame
    pub last_generation: u64,
    /// Events dropped because the event channel was full
    pub dropped_events: u64,
}

/// Shared atomic counters behind [`RenderStats`]
///
/// Written by the render thread, snapshotted by the facade.
#[derive(Debug, Default)]
pub(crate) struct StatsCell {
    frames_rendered: AtomicU64,
    draw_errors: AtomicU64,
    rows_last_frame: AtomicU64,
    last_generation: AtomicU64,
    dropped_events: AtomicU64,
}

impl StatsCell {
    fn record_frame(&self, rows: usize, generation: u64) {
        self.frames_rendered.fetch_add(1, Ordering::Relaxed);
        self.rows_last_frame.store(rows as u64, Ordering::Relaxed);
        self.last_generation.store(generation, Ordering::Relaxed);
    }

    fn record_draw_error(&self) {
        self.draw_errors.fetch_add(1, Ordering::Relaxed);
    }

    fn record_dropped_event(&self) {
        self.dropped_events.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> RenderStats {
        RenderStats {
            frames_rendered: self.frames_rendered.load(Ordering::Relaxed),
            draw_errors: self.draw_errors.load(Ordering::Relaxed),
            rows_last_frame: self.rows_last_frame.load(Ordering::Relaxed),
            last_generation: self.last_generation.load(Ordering::Relaxed),
            dropped_events: self.dropped_events.load(Ordering::Relaxed),
        }
    }
}

/// Repeating frame timer owned by the render loop
///
/// Tracks the next frame deadline so the wait on the control channel can
/// double as the frame delay.
pub(crate) struct FrameTicker {
    interval: Duration,
    next_deadline: Instant,
}

impl FrameTicker {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_deadline: Instant::now() + interval,
        }
    }

    /// Time remaining until the next frame is due
    pub(crate) fn timeout(&self) -> Duration {
        self.next_deadline.saturating_duration_since(Instant::now())
    }

    /// Advance the deadline after a frame
    pub(crate) fn tick(&mut self) {
        self.next_deadline += self.interval;
        let now = Instant::now();
        if self.next_deadline < now {
            // A slow frame left the deadline in the past; restart from now.
            self.next_deadline = now + self.interval;
        }
    }
}

/// The driver that runs the render loop
///
/// Constructed on the render thread itself, so the surface never crosses
/// a thread boundary.
pub(crate) struct RenderDriver {
    /// Surface receiving the draw calls
    surface: Box<dyn PlotSurface>,
    /// Per-frame hook, run before each draw
    hook: Box<dyn RenderHook>,
    /// Buffer shared with the producer
    table: Arc<RwLock<Table>>,
    /// Series list frozen at start
    series: Vec<crate::series::SeriesSpec>,
    /// Shared statistics counters
    stats: Arc<StatsCell>,
    /// Event sender to the facade
    event_tx: Sender<RenderEvent>,
    /// Redraw interval
    interval: Duration,
}

impl RenderDriver {
    pub(crate) fn new(
        surface: Box<dyn PlotSurface>,
        hook: Box<dyn RenderHook>,
        table: Arc<RwLock<Table>>,
        stats: Arc<StatsCell>,
        event_tx: Sender<RenderEvent>,
        interval: Duration,
    ) -> Self {
        Self {
            surface,
            hook,
            table,
            series: Vec::new(),
            stats,
            event_tx,
            interval,
        }
    }

    /// Run the render loop until shutdown
    ///
    /// Blocks on the control channel until the plotter starts. A shutdown
    /// request (or a dropped sender) received before the start releases
    /// the thread without ever touching the surface.
    pub(crate) fn run(mut self, control_rx: Receiver<ControlEvent>) {
        tracing::debug!("Render thread waiting for start");

        match control_rx.recv() {
            Ok(ControlEvent::Start { series }) => self.series = series,
            Ok(ControlEvent::Shutdown) | Err(_) => {
                tracing::info!("Render thread released before start");
                self.try_send_event(RenderEvent::Stopped);
                return;
            }
        }

        if let Err(e) = self.surface.initialize(&self.series) {
            tracing::error!("Surface initialization failed: {}", e);
            self.try_send_event(RenderEvent::DrawFailed {
                message: e.to_string(),
            });
            self.try_send_event(RenderEvent::Stopped);
            return;
        }

        tracing::info!("Render loop started with {} series", self.series.len());
        self.try_send_event(RenderEvent::Started);

        // First frame immediately; the ticker paces the rest.
        self.redraw();

        let mut ticker = FrameTicker::new(self.interval);
        loop {
            match control_rx.recv_timeout(ticker.timeout()) {
                Ok(ControlEvent::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Ok(ControlEvent::Start { .. }) => {}
                Err(RecvTimeoutError::Timeout) => {
                    self.redraw();
                    ticker.tick();
                }
            }
        }

        self.surface.finish();
        self.try_send_event(RenderEvent::Stopped);
        tracing::info!("Render loop stopped");
    }

    /// Draw one frame from the current table contents
    fn redraw(&mut self) {
        self.hook.pre_render();

        let table = self.table.read().expect("table lock poisoned");
        let frame = FrameView::new(&table, &self.series);
        let rows = frame.row_count();
        let generation = frame.generation();

        if let Err(e) = self.surface.draw(&frame) {
            self.stats.record_draw_error();
            tracing::error!("Draw failed: {}", e);
            self.try_send_event(RenderEvent::DrawFailed {
                message: e.to_string(),
            });
            return;
        }

        self.stats.record_frame(rows, generation);
    }

    /// Try to send an event, tracking drops if the queue is full
    ///
    /// Uses try_send() so the render thread never blocks on a slow event
    /// consumer.
    fn try_send_event(&self, event: RenderEvent) {
        if self.event_tx.try_send(event).is_err() {
            self.stats.record_dropped_event();
        }
    }
}
