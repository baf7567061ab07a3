//! Column projection over a snapshot history
//!
//! Series are discovered from the most recent snapshot only. Every snapshot
//! then contributes exactly one cell per series, so all columns of a group
//! share the same length and positional alignment.

use crate::data::{Column, GroupValue, Snapshot};
use crate::error::{Error, Result};

/// Group holding execution times, the only group read through `mean`
pub const EXEC_TIME_GROUP: &str = "benchmark";

/// Series names of `group` in the last snapshot, in key order
pub fn series_names(snapshots: &[Snapshot], group: &str) -> Result<Vec<String>> {
    let latest = snapshots.last().ok_or(Error::EmptyHistory)?;
    latest.series_names(group).ok_or_else(|| Error::MissingGroup {
        group: group.to_string(),
    })
}

/// Project a metric group into one column per series.
///
/// Values pass through unchanged (zero included), except for the
/// execution-time group where a record's `mean` is read and falsy values
/// become `None`.
pub fn project(snapshots: &[Snapshot], group: &str) -> Result<Vec<Column>> {
    let read_mean = group == EXEC_TIME_GROUP;
    project_with(snapshots, group, |value, name| {
        let series = value?.series(name)?;
        if read_mean {
            series.mean_or_number()
        } else {
            series.as_number()
        }
    })
}

/// Shared projection loop; `cell` maps a snapshot's group value (if any) and
/// a series name to the cell emitted at that position.
pub(crate) fn project_with<F>(snapshots: &[Snapshot], group: &str, cell: F) -> Result<Vec<Column>>
where
    F: Fn(Option<GroupValue<'_>>, &str) -> Option<f64>,
{
    let names = series_names(snapshots, group)?;

    Ok(names
        .into_iter()
        .map(|name| {
            let values = snapshots
                .iter()
                .map(|snapshot| cell(snapshot.group(group), &name))
                .collect();
            Column::new(name, values)
        })
        .collect())
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
    fn test_one_column_per_latest_series() {
        let data = vec![
            snapshot("aaaaaa1", "throughput", json!({ "100M_tcp": 1.0 })),
            snapshot("aaaaaa2", "throughput", json!({ "100M_tcp": 2.0, "10M_cat": 3.0 })),
            snapshot("aaaaaa3", "throughput", json!({ "100M_tcp": 4.0, "10M_cat": 5.0 })),
        ];

        let columns = project(&data, "throughput").unwrap();
        assert_eq!(columns.len(), 2);
        for column in &columns {
            assert_eq!(column.cell_count(), data.len() + 1);
        }
        assert_eq!(
            columns,
            vec![
                Column::new("100M_tcp", vec![Some(1.0), Some(2.0), Some(4.0)]),
                Column::new("10M_cat", vec![None, Some(3.0), Some(5.0)]),
            ]
        );
    }

    #[test]
    fn test_series_only_in_older_snapshot_is_dropped() {
        let data = vec![
            snapshot("aaaaaa1", "req_per_sec", json!({ "old_server": 10.0, "deno": 1.0 })),
            snapshot("aaaaaa2", "req_per_sec", json!({ "deno": 2.0 })),
        ];

        let columns = project(&data, "req_per_sec").unwrap();
        assert_eq!(columns, vec![Column::new("deno", vec![Some(1.0), Some(2.0)])]);
    }

    #[test]
    fn test_absent_group_yields_null_cells() {
        let data = vec![
            Snapshot::new("aaaaaa1"),
            snapshot("aaaaaa2", "throughput", json!(null)),
            snapshot("aaaaaa3", "throughput", json!({ "a": 1.0, "b": 2.0 })),
        ];

        let columns = project(&data, "throughput").unwrap();
        assert_eq!(columns[0].values, vec![None, None, Some(1.0)]);
        assert_eq!(columns[1].values, vec![None, None, Some(2.0)]);
    }

    #[test]
    fn test_generic_groups_keep_zero() {
        let data = vec![snapshot("aaaaaa1", "throughput", json!({ "a": 0 }))];
        let columns = project(&data, "throughput").unwrap();
        assert_eq!(columns[0].values, vec![Some(0.0)]);
    }

    #[test]
    fn test_exec_time_reads_mean() {
        let data = vec![
            snapshot("aaaaaa1", "benchmark", json!({ "hello": 7 })),
            snapshot("aaaaaa2", "benchmark", json!({ "hello": { "mean": 0 } })),
            snapshot("aaaaaa3", "benchmark", json!({ "hello": { "mean": 12.5, "stddev": 0.3 } })),
        ];

        let columns = project(&data, EXEC_TIME_GROUP).unwrap();
        assert_eq!(
            columns,
            vec![Column::new("hello", vec![Some(7.0), None, Some(12.5)])]
        );
    }

    #[test]
    fn test_exec_time_record_without_mean_is_null() {
        let data = vec![snapshot("aaaaaa1", "benchmark", json!({ "hello": { "min": 1.0 } }))];
        let columns = project(&data, EXEC_TIME_GROUP).unwrap();
        assert_eq!(columns[0].values, vec![None]);
    }

    #[test]
    fn test_empty_history_is_an_error() {
        let err = project(&[], "throughput").unwrap_err();
        assert!(matches!(err, Error::EmptyHistory));
    }

    #[test]
    fn test_group_missing_from_latest_is_an_error() {
        let data = vec![
            snapshot("aaaaaa1", "throughput", json!({ "a": 1.0 })),
            Snapshot::new("aaaaaa2"),
        ];
        let err = project(&data, "throughput").unwrap_err();
        assert!(matches!(err, Error::MissingGroup { ref group } if group == "throughput"));
    }

    #[test]
    fn test_scalar_latest_group_has_no_series() {
        let data = vec![snapshot("aaaaaa1", "binary_size", json!(5000))];
        assert!(project(&data, "binary_size").unwrap().is_empty());
    }
}
