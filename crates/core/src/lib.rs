//! bench-trends-core - Snapshot model and column projection for bench-trends
//!
//! This crate contains WASM-compatible code shared between the CLI and any
//! in-browser presenter.
//!
//! # Features
//!
//! - Typed access to benchmark snapshots across legacy and current schemas
//! - Projection of metric groups into chart columns
//! - CI build records and the compile-time column
//! - Byte and minute formatters for chart axes

pub mod data;
pub mod error;
pub mod format;
pub mod identifiers;
pub mod metrics;
pub mod project;

pub use data::{BuildList, BuildRecord, Column, GroupValue, History, SeriesValue, Snapshot};
pub use error::{Error, Result};
pub use format::{format_bytes, format_seconds, ValueFormat};
pub use identifiers::{commit_hash_list, pull_request_number_list, short_hash, short_hash_list};
pub use metrics::{
    binary_size_columns, bundle_size_columns, compile_time_columns, exec_time_columns,
    max_latency_columns, max_memory_columns, req_per_sec_columns, syscall_count_columns,
    thread_count_columns, throughput_columns, MetricKind,
};
pub use project::{project, series_names};
