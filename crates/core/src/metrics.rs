//! Per-metric column adapters
//!
//! Most metrics are a direct [`project`] over their group. Binary size,
//! thread count and syscall count carry their own read rules because the
//! published history stores them differently.

use std::fmt;
use std::str::FromStr;

use crate::data::{BuildRecord, Column, GroupValue, Snapshot};
use crate::error::Result;
use crate::format::ValueFormat;
use crate::project::{project, project_with, EXEC_TIME_GROUP};

/// Series that received the whole value in legacy scalar binary-size records
pub const LEGACY_BINARY_SERIES: &str = "deno";

/// Label of the single CI compile-time column
pub const COMPILE_TIME_LABEL: &str = "duration_time";

/// Execution time of each benchmark, read from `mean`
pub fn exec_time_columns(data: &[Snapshot]) -> Result<Vec<Column>> {
    project(data, EXEC_TIME_GROUP)
}

pub fn throughput_columns(data: &[Snapshot]) -> Result<Vec<Column>> {
    project(data, MetricKind::Throughput.group())
}

pub fn req_per_sec_columns(data: &[Snapshot]) -> Result<Vec<Column>> {
    project(data, MetricKind::ReqPerSec.group())
}

pub fn max_memory_columns(data: &[Snapshot]) -> Result<Vec<Column>> {
    project(data, MetricKind::MaxMemory.group())
}

pub fn max_latency_columns(data: &[Snapshot]) -> Result<Vec<Column>> {
    project(data, MetricKind::MaxLatency.group())
}

pub fn bundle_size_columns(data: &[Snapshot]) -> Result<Vec<Column>> {
    project(data, MetricKind::BundleSize.group())
}

/// Binary sizes across both schemas.
///
/// A scalar group value predates per-binary tracking: the legacy series gets
/// the number and every other series gets 0. Keyed values map zero to `None`.
pub fn binary_size_columns(data: &[Snapshot]) -> Result<Vec<Column>> {
    project_with(data, MetricKind::BinarySize.group(), |group, name| match group {
        Some(GroupValue::Scalar(size)) => Some(if name == LEGACY_BINARY_SERIES { size } else { 0.0 }),
        Some(group) => truthy_series(group, name),
        None => None,
    })
}

pub fn thread_count_columns(data: &[Snapshot]) -> Result<Vec<Column>> {
    counted_columns(data, MetricKind::ThreadCount.group())
}

pub fn syscall_count_columns(data: &[Snapshot]) -> Result<Vec<Column>> {
    counted_columns(data, MetricKind::SyscallCount.group())
}

// NOTE: a genuine 0 reading becomes `None` here, unlike `project`.
fn counted_columns(data: &[Snapshot], group: &str) -> Result<Vec<Column>> {
    project_with(data, group, |value, name| truthy_series(value?, name))
}

fn truthy_series(group: GroupValue<'_>, name: &str) -> Option<f64> {
    group.series(name)?.truthy_number()
}

/// CI build durations as a single column, in build order
pub fn compile_time_columns(builds: &[BuildRecord]) -> Vec<Column> {
    vec![Column::new(
        COMPILE_TIME_LABEL,
        builds.iter().map(|b| b.duration).collect(),
    )]
}

/// Every chartable snapshot metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    ExecTime,
    Throughput,
    ReqPerSec,
    MaxLatency,
    MaxMemory,
    BinarySize,
    BundleSize,
    ThreadCount,
    SyscallCount,
}

impl MetricKind {
    /// All metrics in dashboard order
    pub const ALL: [MetricKind; 9] = [
        MetricKind::ExecTime,
        MetricKind::Throughput,
        MetricKind::ReqPerSec,
        MetricKind::MaxLatency,
        MetricKind::MaxMemory,
        MetricKind::BinarySize,
        MetricKind::BundleSize,
        MetricKind::ThreadCount,
        MetricKind::SyscallCount,
    ];

    /// Group name in the published snapshot
    pub fn group(&self) -> &'static str {
        match self {
            MetricKind::ExecTime => EXEC_TIME_GROUP,
            MetricKind::Throughput => "throughput",
            MetricKind::ReqPerSec => "req_per_sec",
            MetricKind::MaxLatency => "max_latency",
            MetricKind::MaxMemory => "max_memory",
            MetricKind::BinarySize => "binary_size",
            MetricKind::BundleSize => "bundle_size",
            MetricKind::ThreadCount => "thread_count",
            MetricKind::SyscallCount => "syscall_count",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MetricKind::ExecTime => "Execution time (seconds)",
            MetricKind::Throughput => "Throughput (seconds)",
            MetricKind::ReqPerSec => "Requests per second",
            MetricKind::MaxLatency => "Max latency (milliseconds)",
            MetricKind::MaxMemory => "Max memory usage",
            MetricKind::BinarySize => "Executable size",
            MetricKind::BundleSize => "Bundle size",
            MetricKind::ThreadCount => "Thread count",
            MetricKind::SyscallCount => "Syscall count",
        }
    }

    pub fn value_format(&self) -> ValueFormat {
        match self {
            MetricKind::MaxMemory | MetricKind::BinarySize | MetricKind::BundleSize => {
                ValueFormat::Bytes
            }
            _ => ValueFormat::Plain,
        }
    }

    /// Build the columns for this metric
    pub fn columns(&self, data: &[Snapshot]) -> Result<Vec<Column>> {
        match self {
            MetricKind::ExecTime => exec_time_columns(data),
            MetricKind::Throughput => throughput_columns(data),
            MetricKind::ReqPerSec => req_per_sec_columns(data),
            MetricKind::MaxLatency => max_latency_columns(data),
            MetricKind::MaxMemory => max_memory_columns(data),
            MetricKind::BinarySize => binary_size_columns(data),
            MetricKind::BundleSize => bundle_size_columns(data),
            MetricKind::ThreadCount => thread_count_columns(data),
            MetricKind::SyscallCount => syscall_count_columns(data),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    /// Accepts the group name or the short aliases `exec-time`, `rps`, etc.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "benchmark" | "exec_time" => Ok(MetricKind::ExecTime),
            "throughput" => Ok(MetricKind::Throughput),
            "req_per_sec" | "rps" => Ok(MetricKind::ReqPerSec),
            "max_latency" => Ok(MetricKind::MaxLatency),
            "max_memory" => Ok(MetricKind::MaxMemory),
            "binary_size" => Ok(MetricKind::BinarySize),
            "bundle_size" => Ok(MetricKind::BundleSize),
            "thread_count" => Ok(MetricKind::ThreadCount),
            "syscall_count" => Ok(MetricKind::SyscallCount),
            _ => Err(format!("Unknown metric: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn snapshot(hash: &str, group: &str, value: serde_json::Value) -> Snapshot {
        Snapshot::new(hash).with_group(group, value)
    }

    #[test]
    fn test_binary_size_legacy_scalar() {
        let data = vec![
            snapshot("aaaaaa1", "binary_size", json!(5000)),
            snapshot("aaaaaa2", "binary_size", json!({ "deno": 6000, "other": 100 })),
        ];

        let columns = binary_size_columns(&data).unwrap();
        assert_eq!(
            columns,
            vec![
                Column::new("deno", vec![Some(5000.0), Some(6000.0)]),
                Column::new("other", vec![Some(0.0), Some(100.0)]),
            ]
        );
    }

    #[test]
    fn test_binary_size_zero_and_missing_become_null() {
        let data = vec![
            Snapshot::new("aaaaaa1"),
            snapshot("aaaaaa2", "binary_size", json!({ "deno": 0, "other": 100 })),
            snapshot("aaaaaa3", "binary_size", json!({ "deno": 6000, "other": 100 })),
        ];

        let columns = binary_size_columns(&data).unwrap();
        assert_eq!(columns[0].values, vec![None, None, Some(6000.0)]);
        assert_eq!(columns[1].values, vec![None, Some(100.0), Some(100.0)]);
    }

    #[test]
    fn test_thread_count_zero_becomes_null() {
        let data = vec![
            snapshot("aaaaaa1", "thread_count", json!({ "set_timeout": 0 })),
            snapshot("aaaaaa2", "thread_count", json!(4)),
            snapshot("aaaaaa3", "thread_count", json!({ "set_timeout": 4 })),
        ];

        let columns = thread_count_columns(&data).unwrap();
        assert_eq!(
            columns,
            vec![Column::new("set_timeout", vec![None, None, Some(4.0)])]
        );
    }

    #[test]
    fn test_syscall_count_matches_thread_count_shape() {
        let data = vec![
            Snapshot::new("aaaaaa1"),
            snapshot("aaaaaa2", "syscall_count", json!({ "hello": 120, "fetch_deps": 900 })),
        ];

        let columns = syscall_count_columns(&data).unwrap();
        assert_eq!(
            columns,
            vec![
                Column::new("hello", vec![None, Some(120.0)]),
                Column::new("fetch_deps", vec![None, Some(900.0)]),
            ]
        );
    }

    #[test]
    fn test_exec_time_adapter_mixes_schemas() {
        let data = vec![
            snapshot("aaaaaa1", "benchmark", json!({ "hello": 0.05 })),
            snapshot("aaaaaa2", "benchmark", json!({ "hello": { "mean": 0.04 }, "relative_import": { "mean": 0.06 } })),
        ];

        let columns = exec_time_columns(&data).unwrap();
        assert_eq!(
            columns,
            vec![
                Column::new("hello", vec![Some(0.05), Some(0.04)]),
                Column::new("relative_import", vec![None, Some(0.06)]),
            ]
        );
    }

    #[test]
    fn test_compile_time_preserves_order() {
        let builds: Vec<BuildRecord> = [600.0, 720.0, 540.0]
            .iter()
            .map(|d| BuildRecord {
                duration: Some(*d),
                ..Default::default()
            })
            .collect();

        assert_eq!(
            compile_time_columns(&builds),
            vec![Column::new(
                COMPILE_TIME_LABEL,
                vec![Some(600.0), Some(720.0), Some(540.0)]
            )]
        );
    }

    #[test]
    fn test_metric_kind_from_str() {
        assert_eq!("exec-time".parse::<MetricKind>().unwrap(), MetricKind::ExecTime);
        assert_eq!("benchmark".parse::<MetricKind>().unwrap(), MetricKind::ExecTime);
        assert_eq!("RPS".parse::<MetricKind>().unwrap(), MetricKind::ReqPerSec);
        assert_eq!(
            "syscall_count".parse::<MetricKind>().unwrap(),
            MetricKind::SyscallCount
        );
        assert!("latency".parse::<MetricKind>().is_err());
    }

    #[test]
    fn test_metric_kind_group_round_trips_through_from_str() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.group().parse::<MetricKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_metric_kind_formats() {
        assert_eq!(MetricKind::BinarySize.value_format(), ValueFormat::Bytes);
        assert_eq!(MetricKind::Throughput.value_format(), ValueFormat::Plain);
    }
}
