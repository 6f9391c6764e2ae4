//! Integration tests for end-to-end streaming
//!
//! These tests drive the producer API the way a real application would:
//! - A sine/cosine feed rendered while rows arrive
//! - Monotonic visibility of rows across frames
//! - Width-mismatch rejection mid-stream
//! - Spawning from a configuration file

mod common;

use common::surfaces::{CountingSurface, RecordingSurface};
use common::{assert_float_eq, test_timeout, wait_until};
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;
use streamplot::{PlotKind, PlotterConfig, RealtimePlotter, RenderEvent};

#[test]
fn test_sine_cosine_stream() {
    common::init_tracing();
    let (surface, draws) = CountingSurface::new();
    let mut plotter = RealtimePlotter::spawn(PlotterConfig::default(), move || surface).unwrap();

    plotter.add_columns(["X", "Sine", "Cosine"]).unwrap();
    plotter.add_series(PlotKind::Line, 0, 1).unwrap();
    plotter.add_series(PlotKind::Line, 0, 2).unwrap();
    plotter.start();

    for i in 0..200 {
        let x = i as f64 / 100.0;
        plotter.insert_values(&[x, x.sin(), x.cos()]).unwrap();
    }

    assert_eq!(plotter.row_count(), 200);
    assert_eq!(plotter.column_index("Sine").unwrap(), 1);

    let sine = plotter.column_values("Sine").unwrap();
    for i in (0..200).step_by(50) {
        let x = i as f64 / 100.0;
        assert_float_eq(sine[i], x.sin(), 1e-12);
    }

    // The render thread eventually observes the full table
    assert!(wait_until(test_timeout(), || {
        plotter.render_stats().rows_last_frame == 200
    }));
    assert!(plotter.render_stats().last_generation >= 200);
    assert!(draws.load(Ordering::SeqCst) > 0);

    plotter.stop();
    plotter.shutdown().unwrap();
}

#[test]
fn test_visible_rows_never_decrease() {
    common::init_tracing();
    let (surface, row_counts) = RecordingSurface::new();
    let plotter = RealtimePlotter::spawn(PlotterConfig::default(), move || surface).unwrap();

    plotter.add_columns(["X", "Y"]).unwrap();
    plotter.start();

    for i in 0..500 {
        plotter.insert_values(&[i as f64, (i as f64).sin()]).unwrap();
        if i % 100 == 0 {
            // Give the render thread a chance to interleave frames
            thread::sleep(Duration::from_millis(1));
        }
    }

    assert!(wait_until(test_timeout(), || {
        plotter.render_stats().rows_last_frame == 500
    }));

    plotter.stop();
    assert!(wait_until(test_timeout(), || {
        plotter
            .drain_events()
            .iter()
            .any(|e| matches!(e, RenderEvent::Stopped))
    }));

    let recorded = row_counts.lock().unwrap();
    assert!(!recorded.is_empty());
    for pair in recorded.windows(2) {
        assert!(
            pair[1] >= pair[0],
            "visible rows went backwards: {} -> {}",
            pair[0],
            pair[1]
        );
    }
    assert_eq!(*recorded.last().unwrap(), 500);
    drop(recorded);

    plotter.shutdown().unwrap();
}

#[test]
fn test_mismatch_mid_stream_leaves_table_consistent() {
    common::init_tracing();
    let (surface, _draws) = CountingSurface::new();
    let plotter = RealtimePlotter::spawn(PlotterConfig::default(), move || surface).unwrap();

    plotter.add_columns(["X", "Y", "Z"]).unwrap();
    plotter.start();

    plotter.insert_values(&[1.0, 2.0, 3.0]).unwrap();
    assert!(plotter.insert_values(&[4.0, 5.0]).is_err());
    plotter.insert_values(&[6.0, 7.0, 8.0]).unwrap();

    assert_eq!(plotter.row_count(), 2);
    plotter.with_table(|table| {
        for column in table.columns() {
            assert_eq!(column.len(), 2);
        }
    });

    plotter.stop();
    plotter.shutdown().unwrap();
}

#[test]
fn test_plotter_from_saved_config() -> anyhow::Result<()> {
    common::init_tracing();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("streamplot.toml");

    let config = PlotterConfig::new()
        .with_update_interval(Duration::from_millis(5))
        .with_thread_name("scenario-render");
    config.save(&path)?;

    let loaded = PlotterConfig::load(&path)?;
    assert_eq!(loaded.update_interval(), Duration::from_millis(5));

    let (surface, draws) = CountingSurface::new();
    let plotter = RealtimePlotter::spawn(loaded, move || surface)?;
    plotter.add_columns(["X", "Y"])?;
    plotter.insert_values(&[0.0, 1.0])?;
    plotter.start();

    assert!(wait_until(test_timeout(), || draws.load(Ordering::SeqCst) > 0));

    plotter.stop();
    plotter.shutdown()?;
    Ok(())
}
