//! Chart assembly and the presenter boundary
//!
//! Every chart is built independently, so a metric group missing from the
//! latest snapshot costs only that chart.

use crate::error::Result;
use crate::links::RepoLinks;
use bench_trends_core::{
    commit_hash_list, compile_time_columns, pull_request_number_list, short_hash_list,
    BuildRecord, Column, MetricKind, Snapshot, ValueFormat,
};
use serde::Serialize;
use tracing::{debug, warn};

/// Identifier of the CI compile-time chart
pub const COMPILE_TIME_CHART_ID: &str = "compile-time";

/// Everything a presenter needs to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// DOM-safe identifier
    pub id: String,
    pub title: String,
    pub columns: Vec<Column>,
    /// Category x-axis labels, one per position
    pub categories: Vec<String>,
    /// Navigation target per position, used by the click handler
    pub links: Vec<Option<String>>,
    pub format: ValueFormat,
}

impl ChartSpec {
    /// URL to open when the point at `index` is clicked
    pub fn link_for(&self, index: usize) -> Option<&str> {
        self.links.get(index).and_then(|l| l.as_deref())
    }

    /// Latest non-null value of each series, formatted for display
    pub fn latest_values(&self) -> Vec<(String, String)> {
        self.columns
            .iter()
            .map(|column| {
                let latest = column
                    .values
                    .iter()
                    .rev()
                    .find_map(|v| *v)
                    .map(|v| self.format.apply(v))
                    .unwrap_or_else(|| "-".to_string());
                (column.label.clone(), latest)
            })
            .collect()
    }
}

/// Rendering boundary: one call per chart
pub trait ChartPresenter {
    fn render(&mut self, chart: &ChartSpec) -> Result<()>;
}

/// Chart for one snapshot metric; categories are short commit hashes
pub fn snapshot_chart(
    kind: MetricKind,
    data: &[Snapshot],
    links: Option<&RepoLinks>,
) -> bench_trends_core::Result<ChartSpec> {
    let columns = kind.columns(data)?;
    let hashes = commit_hash_list(data);

    let targets = hashes
        .iter()
        .map(|hash| links.map(|l| l.commit_url(hash)))
        .collect();

    Ok(ChartSpec {
        id: kind.group().replace('_', "-"),
        title: kind.title().to_string(),
        columns,
        categories: short_hash_list(&hashes),
        links: targets,
        format: kind.value_format(),
    })
}

/// Every snapshot metric that can be projected; failures are logged and skipped
pub fn snapshot_charts(data: &[Snapshot], links: Option<&RepoLinks>) -> Vec<ChartSpec> {
    MetricKind::ALL
        .iter()
        .filter_map(|kind| match snapshot_chart(*kind, data, links) {
            Ok(chart) => {
                debug!("Built chart '{}' with {} series", chart.id, chart.columns.len());
                Some(chart)
            }
            Err(e) => {
                warn!("Skipping {} chart: {}", kind, e);
                None
            }
        })
        .collect()
}

/// CI compile-time chart; categories are pull-request numbers
pub fn compile_time_chart(builds: &[BuildRecord], links: Option<&RepoLinks>) -> ChartSpec {
    let numbers = pull_request_number_list(builds);

    ChartSpec {
        id: COMPILE_TIME_CHART_ID.to_string(),
        title: "Compile time".to_string(),
        columns: compile_time_columns(builds),
        categories: numbers
            .iter()
            .map(|n| n.map_or_else(|| "-".to_string(), |n| n.to_string()))
            .collect(),
        links: numbers
            .iter()
            .map(|n| n.and_then(|n| links.map(|l| l.pull_request_url(n))))
            .collect(),
        format: ValueFormat::Minutes,
    }
}

/// Hand every chart to the presenter in order
pub fn present<P: ChartPresenter>(presenter: &mut P, charts: &[ChartSpec]) -> Result<()> {
    for chart in charts {
        presenter.render(chart)?;
    }
    Ok(())
}
