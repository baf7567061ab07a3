//! Data structures for benchmark snapshots, CI builds and chart columns
//!
//! The published history mixes two schemas. Older snapshots store a bare
//! number where newer ones store a keyed mapping or a record with a `mean`
//! field, so metric groups are kept as raw JSON and classified at read time
//! through [`GroupValue`] and [`SeriesValue`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{Error, Result};

/// One historical benchmark record for a single commit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    /// Commit SHA the benchmarks ran against
    #[serde(rename = "sha1", alias = "commitHash")]
    pub commit_hash: String,
    /// Creation time as published (not always RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Metric groups keyed by group name, in published key order
    #[serde(flatten)]
    pub groups: Map<String, Value>,
}

impl Snapshot {
    /// Create a snapshot with no metric groups
    pub fn new(commit_hash: impl Into<String>) -> Self {
        Self {
            commit_hash: commit_hash.into(),
            created_at: None,
            groups: Map::new(),
        }
    }

    /// Builder-style helper to attach a metric group
    pub fn with_group(mut self, name: &str, value: Value) -> Self {
        self.groups.insert(name.to_string(), value);
        self
    }

    /// Classify the value stored under `name`, or `None` when absent or null
    pub fn group(&self, name: &str) -> Option<GroupValue<'_>> {
        self.groups.get(name).and_then(GroupValue::classify)
    }

    /// Series names of a group in key order.
    ///
    /// A scalar group has no keys and yields an empty list. Returns `None`
    /// when the group is absent or null.
    pub fn series_names(&self, name: &str) -> Option<Vec<String>> {
        self.group(name).map(|group| match group {
            GroupValue::Keyed(map) => map.keys().cloned().collect(),
            GroupValue::Scalar(_) | GroupValue::Other(_) => Vec::new(),
        })
    }

    /// Parse `created_at`, accepting RFC 3339 and zone-less ISO timestamps
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Shape of a metric group inside one snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroupValue<'a> {
    /// Legacy single number
    Scalar(f64),
    /// Mapping from series name to value
    Keyed(&'a Map<String, Value>),
    /// Anything else (string, bool, array)
    Other(&'a Value),
}

impl<'a> GroupValue<'a> {
    /// Classify a raw group value; null counts as absent
    pub fn classify(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(n.as_f64().map_or(GroupValue::Other(value), GroupValue::Scalar)),
            Value::Object(map) => Some(GroupValue::Keyed(map)),
            other => Some(GroupValue::Other(other)),
        }
    }

    /// Look up one series in a keyed group
    pub fn series(&self, name: &str) -> Option<SeriesValue<'a>> {
        match *self {
            GroupValue::Keyed(map) => map.get(name).and_then(SeriesValue::classify),
            GroupValue::Scalar(_) | GroupValue::Other(_) => None,
        }
    }
}

/// Shape of a single series value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesValue<'a> {
    /// Bare number
    Number(f64),
    /// Record exposing a `mean` field
    Sampled { mean: Option<f64> },
    /// Anything else
    Other(&'a Value),
}

impl<'a> SeriesValue<'a> {
    /// Classify a raw series value; null counts as absent
    pub fn classify(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(n.as_f64().map_or(SeriesValue::Other(value), SeriesValue::Number)),
            Value::Object(record) => Some(SeriesValue::Sampled {
                mean: record.get("mean").and_then(Value::as_f64),
            }),
            other => Some(SeriesValue::Other(other)),
        }
    }

    /// The plain numeric value, zero included
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SeriesValue::Number(n) => Some(*n),
            SeriesValue::Sampled { .. } | SeriesValue::Other(_) => None,
        }
    }

    /// The numeric value only when it is truthy (non-zero)
    pub fn truthy_number(&self) -> Option<f64> {
        self.as_number().and_then(truthy)
    }

    /// Execution time: `mean` of a record, or a legacy bare number.
    /// Falsy values map to `None`.
    pub fn mean_or_number(&self) -> Option<f64> {
        match self {
            SeriesValue::Number(n) => truthy(*n),
            SeriesValue::Sampled { mean } => mean.and_then(truthy),
            SeriesValue::Other(_) => None,
        }
    }
}

fn truthy(n: f64) -> Option<f64> {
    if n == 0.0 || n.is_nan() {
        None
    } else {
        Some(n)
    }
}

/// Ordered sequence of snapshots, oldest first
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct History {
    pub snapshots: Vec<Snapshot>,
}

impl History {
    /// Parse a published `data.json` artifact
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a published `data.json` artifact from disk
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    /// Most recent snapshot
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// One CI build, as returned by the Travis v2.1 build list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BuildRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Build number as displayed by the CI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Wall-clock duration in seconds; null while a build is running
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default, alias = "pullRequestNumber")]
    pub pull_request_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl BuildRecord {
    /// Default admission rule for the compile-time chart
    pub fn has_duration(&self) -> bool {
        self.duration.map_or(false, |d| d > 0.0)
    }
}

/// Response envelope of the CI build list; builds are newest first
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BuildList {
    #[serde(default)]
    pub builds: Vec<BuildRecord>,
}

impl BuildList {
    /// Reverse the newest-first envelope into chronological order
    pub fn into_chronological(self) -> Vec<BuildRecord> {
        let mut builds = self.builds;
        builds.reverse();
        builds
    }
}

/// A chart column: label followed by one cell per snapshot or build.
///
/// Serializes as the flat `[label, v0, v1, ...]` array chart libraries
/// expect, with `null` for missing cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    /// Number of cells including the label
    pub fn cell_count(&self) -> usize {
        self.values.len() + 1
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.cell_count()))?;
        seq.serialize_element(&self.label)?;
        for value in &self.values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}
