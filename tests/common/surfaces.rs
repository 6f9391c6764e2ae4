//! Surface doubles shared by the integration tests
//!
//! These stand in for a real graphics backend: they count or record what
//! the render thread hands them, without drawing anything.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use streamplot::{FrameView, PlotError, PlotSurface, Result, SeriesSpec};

/// Surface that counts draw calls
pub struct CountingSurface {
    draws: Arc<AtomicUsize>,
}

impl CountingSurface {
    /// Create a surface plus a shared handle to its draw counter
    pub fn new() -> (CountingSurface, Arc<AtomicUsize>) {
        let draws = Arc::new(AtomicUsize::new(0));
        let surface = CountingSurface {
            draws: Arc::clone(&draws),
        };
        (surface, draws)
    }
}

impl PlotSurface for CountingSurface {
    fn initialize(&mut self, _series: &[SeriesSpec]) -> Result<()> {
        Ok(())
    }

    fn draw(&mut self, _frame: &FrameView<'_>) -> Result<()> {
        self.draws.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Surface that records the row count visible in every frame
pub struct RecordingSurface {
    frames: Arc<Mutex<Vec<usize>>>,
}

impl RecordingSurface {
    /// Create a surface plus a shared handle to its frame log
    pub fn new() -> (RecordingSurface, Arc<Mutex<Vec<usize>>>) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let surface = RecordingSurface {
            frames: Arc::clone(&frames),
        };
        (surface, frames)
    }
}

impl PlotSurface for RecordingSurface {
    fn initialize(&mut self, _series: &[SeriesSpec]) -> Result<()> {
        Ok(())
    }

    fn draw(&mut self, frame: &FrameView<'_>) -> Result<()> {
        self.frames.lock().unwrap().push(frame.row_count());
        Ok(())
    }
}

/// Surface whose draw calls always fail
pub struct FailingDrawSurface;

impl PlotSurface for FailingDrawSurface {
    fn initialize(&mut self, _series: &[SeriesSpec]) -> Result<()> {
        Ok(())
    }

    fn draw(&mut self, _frame: &FrameView<'_>) -> Result<()> {
        Err(PlotError::Surface("paint device lost".to_string()))
    }
}
