//! Example demonstrating a self-refreshing observation map.
//!
//! The map stays current by re-fetching its records on a fixed schedule.
//! This example wires a `RefreshTask` to a shared `ObservationMap` and
//! shows that stopping the task (or dropping it) really cancels the
//! schedule.
//!
//! Run with: cargo run --example refresh_loop

use obsmap::{Config, GeoRecord, ObservationMap, RecordSource, RefreshTask, StaticSource};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// A feed that reports one more sighting on every fetch.
struct GrowingFeed {
    served: AtomicUsize,
}

impl RecordSource for GrowingFeed {
    fn fetch(&self) -> obsmap::Result<Vec<GeoRecord>> {
        let n = self.served.fetch_add(1, Ordering::SeqCst) + 1;
        let records = (0..n)
            .map(|i| GeoRecord::new(i as i64, -6.2 - 0.01 * i as f64, 106.8 + 0.01 * i as f64))
            .collect();
        Ok(records)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Obsmap - Scheduled Refresh Example ===\n");

    println!("1. Initial snapshot");
    let map = Arc::new(Mutex::new(ObservationMap::new()));

    let seed = StaticSource::new(vec![
        GeoRecord::new(1, -6.2, 106.8),
        GeoRecord::new(2, -7.0, 110.0),
    ]);
    let fetched = map.lock().refresh_from(&seed)?;
    println!("   Seeded the map with {} records", fetched);
    println!(
        "   Default production interval: {:?} (this demo uses 200ms)\n",
        Config::default().refresh_interval()
    );

    println!("2. Scheduled refresh");
    println!("   Spawning a refresh task against a growing feed...");

    let feed = Arc::new(GrowingFeed {
        served: AtomicUsize::new(0),
    });

    let worker_map = Arc::clone(&map);
    let worker_feed = Arc::clone(&feed);
    let mut task = RefreshTask::spawn(Duration::from_millis(200), move || {
        let mut map = worker_map.lock();
        match map.refresh_from(worker_feed.as_ref()) {
            Ok(fetched) => {
                let stats = map.stats();
                println!(
                    "   Tick: fetched {} records, {} extra-large cells",
                    fetched, stats.extra_large_cells
                );
            }
            Err(e) => println!("   Tick failed: {} (keeping previous snapshot)", e),
        }
    })?;

    thread::sleep(Duration::from_millis(1100));
    println!("   Task running: {}\n", task.is_running());

    println!("3. Stopping the task");
    task.stop();
    let count_at_stop = map.lock().records().len();
    println!("   Stopped with {} records in the snapshot", count_at_stop);

    // No more ticks arrive after stop.
    thread::sleep(Duration::from_millis(500));
    assert_eq!(map.lock().records().len(), count_at_stop);
    println!("   ✓ Snapshot unchanged after stop\n");

    println!("4. Dropping cancels too");
    {
        let worker_map = Arc::clone(&map);
        let worker_feed = Arc::clone(&feed);
        let _task = RefreshTask::spawn(Duration::from_millis(200), move || {
            let mut map = worker_map.lock();
            let _ = map.refresh_from(worker_feed.as_ref());
        })?;
        thread::sleep(Duration::from_millis(450));
        // The task goes out of scope here; drop joins the worker thread.
    }
    let count_at_drop = map.lock().records().len();
    thread::sleep(Duration::from_millis(500));
    assert_eq!(map.lock().records().len(), count_at_drop);
    println!("   ✓ Snapshot unchanged after drop");

    let stats = map.lock().stats();
    println!("\n=== Final Statistics ===");
    println!("Records: {}", stats.record_count);
    println!("Plottable: {}", stats.plottable_count);
    println!(
        "Cells (small / medium / large / extra-large): {} / {} / {} / {}",
        stats.small_cells, stats.medium_cells, stats.large_cells, stats.extra_large_cells
    );

    println!("\n✓ Scheduled refresh demo completed!");
    println!("\nKey Takeaways:");
    println!("  • RefreshTask owns its worker thread; stop() signals and joins it");
    println!("  • Dropping the task cancels the schedule the same way");
    println!("  • Ticks are serial: a slow fetch delays the next tick");
    println!("  • A failed fetch keeps the previous snapshot on screen");

    Ok(())
}
