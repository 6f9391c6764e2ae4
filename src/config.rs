//! Configuration for the plotter runtime
//!
//! This module holds the knobs for the render loop and the feedback
//! channel, plus TOML load/save so configurations can live next to the
//! application that embeds the plotter.
//!
//! All fields have defaults, so `PlotterConfig::default()` is a working
//! configuration and partial TOML files deserialize cleanly.

use crate::error::{PlotError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default redraw interval in milliseconds
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 1;

/// Default capacity of the render event channel
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Default name for the render thread
pub const DEFAULT_THREAD_NAME: &str = "streamplot-render";

/// Runtime configuration for a [`RealtimePlotter`](crate::RealtimePlotter)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotterConfig {
    /// Redraw interval in milliseconds
    ///
    /// Zero is treated as one: the render loop never spins without a
    /// pause between frames.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    /// Capacity of the render event channel
    ///
    /// When the consumer does not drain events fast enough, further
    /// events are dropped and counted rather than blocking the render
    /// thread.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Name given to the render thread
    #[serde(default = "default_thread_name")]
    pub thread_name: String,
}

fn default_update_interval_ms() -> u64 {
    DEFAULT_UPDATE_INTERVAL_MS
}

fn default_event_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

fn default_thread_name() -> String {
    DEFAULT_THREAD_NAME.to_string()
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl PlotterConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the redraw interval
    ///
    /// Intervals beyond `u64::MAX` milliseconds saturate rather than
    /// wrapping to a short interval.
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the render thread name
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// The redraw interval as a [`Duration`], clamped to at least 1 ms
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms.max(1))
    }

    /// The event channel capacity, clamped to at least 1
    pub fn event_capacity(&self) -> usize {
        self.event_capacity.max(1)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlotError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        toml::from_str(&content).map_err(|e| {
            PlotError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Load a configuration, returning defaults if any error occurs
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load plotter config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlotError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| PlotError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            PlotError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }
}
