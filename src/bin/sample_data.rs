//! Sample history generator for dashboard previews
//!
//! Writes a `data.json` exercising the schema transitions the projector has
//! to cope with:
//! - bare-number execution times before `mean` records
//! - a scalar binary size before per-binary sizes
//! - series appearing mid-history
//! - snapshots missing whole metric groups
//!
//! Usage:
//!   cargo run --bin sample-data [scenario] [output]
//!
//! Scenarios:
//!   legacy      - only the legacy schema
//!   current     - only the current schema
//!   new-series  - a benchmark appears mid-history
//!   mixed       - legacy history followed by current snapshots (default)

use anyhow::{Context, Result};
use bench_trends::{History, Snapshot};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

fn main() -> Result<()> {
    let scenario = std::env::args().nth(1).unwrap_or_else(|| "mixed".to_string());
    let output = std::env::args().nth(2).unwrap_or_else(|| "data.json".to_string());

    let history = match scenario.as_str() {
        "legacy" => generate_legacy(6),
        "current" => generate_current(6),
        "new-series" => generate_new_series(),
        _ => generate_mixed(),
    };

    let json = serde_json::to_string_pretty(&history)?;
    std::fs::write(&output, json).with_context(|| format!("Failed to write {}", output))?;

    println!("Generated {} with scenario: {}", output, scenario);
    println!("\nAvailable scenarios:");
    println!("  legacy      - only the legacy schema");
    println!("  current     - only the current schema");
    println!("  new-series  - a benchmark appears mid-history");
    println!("  mixed       - legacy followed by current (default)");
    println!("\nTo preview: bench-trends dashboard --data {} --skip-ci", output);

    Ok(())
}

fn make_hash(index: usize) -> String {
    format!("{:040x}", 0x5eed_0000_u64 + index as u64 * 7919)
}

fn make_snapshot(index: usize, days_ago: i64) -> Snapshot {
    let mut snapshot = Snapshot::new(make_hash(index));
    snapshot.created_at = Some((Utc::now() - Duration::days(days_ago)).to_rfc3339());
    snapshot
}

fn mean_record(mean: f64) -> Value {
    json!({
        "mean": mean,
        "stddev": mean * 0.02,
        "user": mean * 0.8,
        "system": mean * 0.1,
        "min": mean * 0.95,
        "max": mean * 1.07,
    })
}

fn legacy_snapshot(index: usize, days_ago: i64) -> Snapshot {
    let drift = index as f64 * 0.001;
    make_snapshot(index, days_ago)
        .with_group(
            "benchmark",
            json!({ "hello": 0.051 - drift, "relative_import": 0.062 - drift }),
        )
        .with_group("binary_size", json!(41_000_000 + index * 120_000))
        .with_group("thread_count", json!({ "set_timeout": 4, "fetch_deps": 9 }))
}

fn current_snapshot(index: usize, days_ago: i64) -> Snapshot {
    let drift = index as f64 * 0.001;
    make_snapshot(index, days_ago)
        .with_group(
            "benchmark",
            json!({
                "hello": mean_record(0.048 - drift),
                "relative_import": mean_record(0.059 - drift),
                "cold_relative_import": mean_record(0.21 - drift),
            }),
        )
        .with_group(
            "binary_size",
            json!({
                "deno": 42_000_000 + index * 150_000,
                "main.js": 2_100_000 + index * 4_000,
                "main.js.map": 3_300_000 + index * 6_000,
                "snapshot_deno.bin": 28_000_000 + index * 90_000,
            }),
        )
        .with_group(
            "throughput",
            json!({ "100M_tcp": 3.1 - drift, "100M_cat": 2.4 - drift, "10M_tcp": 0.4, "10M_cat": 0.3 }),
        )
        .with_group(
            "req_per_sec",
            json!({ "deno": 21_000 + index * 150, "node": 27_000, "deno_core_single": 51_000 }),
        )
        .with_group("thread_count", json!({ "set_timeout": 4, "fetch_deps": 9 }))
        .with_group("syscall_count", json!({ "hello": 560 - index, "fetch_deps": 4_300 }))
}

fn generate_legacy(count: usize) -> History {
    History {
        snapshots: (0..count)
            .map(|i| legacy_snapshot(i, (count - i) as i64))
            .collect(),
    }
}

fn generate_current(count: usize) -> History {
    History {
        snapshots: (0..count)
            .map(|i| current_snapshot(i, (count - i) as i64))
            .collect(),
    }
}

/// `cold_relative_import` only exists in the later half
fn generate_new_series() -> History {
    let mut history = generate_current(6);
    for snapshot in history.snapshots.iter_mut().take(3) {
        if let Some(Value::Object(benchmarks)) = snapshot.groups.get_mut("benchmark") {
            benchmarks.remove("cold_relative_import");
        }
    }
    history
}

fn generate_mixed() -> History {
    let legacy = 5;
    let current = 5;
    let total = legacy + current;

    let mut snapshots: Vec<Snapshot> = (0..legacy)
        .map(|i| legacy_snapshot(i, (total - i) as i64))
        .collect();

    // A snapshot from a broken benchmark run carries no groups at all
    snapshots.push(make_snapshot(legacy, (total - legacy) as i64));

    snapshots.extend((legacy + 1..total).map(|i| current_snapshot(i, (total - i) as i64)));

    History { snapshots }
}
