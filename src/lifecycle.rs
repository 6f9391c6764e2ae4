//! Start/stop lifecycle shared between the facade and the render thread
//!
//! The lifecycle is strictly one-way: not started, started, cancelled.
//! Both transitions are idempotent and communicated to the render thread
//! over the control channel; the atomics only record which transitions
//! have been requested so repeat calls can short-circuit.

use crate::series::SeriesSpec;
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Control messages consumed by the render thread
#[derive(Debug, Clone)]
pub(crate) enum ControlEvent {
    /// Begin rendering with the frozen series list
    Start { series: Vec<SeriesSpec> },
    /// Leave the render loop
    Shutdown,
}

/// One-way lifecycle state plus the control channel into the render thread
#[derive(Debug)]
pub(crate) struct Lifecycle {
    started: AtomicBool,
    cancelled: AtomicBool,
    control_tx: Sender<ControlEvent>,
}

impl Lifecycle {
    pub(crate) fn new(control_tx: Sender<ControlEvent>) -> Self {
        Self {
            started: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            control_tx,
        }
    }

    /// Request the transition to started
    ///
    /// The first call sends `Start` with the frozen series list and
    /// returns true. Later calls, and calls after cancellation, return
    /// false without touching the channel.
    pub(crate) fn activate(&self, series: Vec<SeriesSpec>) -> bool {
        if self.cancelled.load(Ordering::SeqCst) {
            tracing::warn!("start requested after stop; lifecycle is one-way, ignoring");
            return false;
        }
        if self.started.swap(true, Ordering::SeqCst) {
            return false;
        }

        if self.control_tx.send(ControlEvent::Start { series }).is_err() {
            tracing::warn!("render thread already exited; start request dropped");
        }
        true
    }

    /// Request cancellation
    ///
    /// The first call sends `Shutdown` and returns true; later calls
    /// return false. Returns as soon as the request is issued; waiting
    /// for the render thread happens at join time.
    pub(crate) fn cancel(&self) -> bool {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return false;
        }

        // A closed channel means the render thread is already gone.
        let _ = self.control_tx.send(ControlEvent::Shutdown);
        true
    }

    pub(crate) fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Cloneable handle that can stop the plotter from any thread
///
/// Obtained from [`RealtimePlotter::stop_handle`](crate::RealtimePlotter::stop_handle).
/// Stopping is idempotent and never blocks on the render thread.
#[derive(Debug, Clone)]
pub struct StopHandle {
    lifecycle: Arc<Lifecycle>,
}

impl StopHandle {
    pub(crate) fn new(lifecycle: Arc<Lifecycle>) -> Self {
        Self { lifecycle }
    }

    /// Request the render loop to stop
    pub fn stop(&self) {
        self.lifecycle.cancel();
    }

    /// Whether a stop has been requested
    pub fn is_stopped(&self) -> bool {
        self.lifecycle.is_cancelled()
    }
}
