//! bench-trends - performance trend charts from published benchmark history
//!
//! This library turns a project's published `data.json` benchmark history and
//! its CI build list into chart-ready column tables, and renders them as an
//! HTML dashboard.
//!
//! # Features
//!
//! - Load the snapshot history from a file or URL and the CI build list
//!   from the Travis API, concurrently
//! - Project legacy and current snapshot schemas into per-series columns
//! - Link every chart point back to its commit or pull request
//! - Render a c3.js dashboard, or plug in any [`dashboard::ChartPresenter`]
//!
//! # Example
//!
//! ```no_run
//! use bench_trends::{dashboard, html::{DashboardConfig, HtmlPresenter}, History};
//!
//! let history = History::load_from_file("data.json".as_ref()).unwrap();
//! let charts = dashboard::snapshot_charts(&history.snapshots, None);
//!
//! let mut presenter = HtmlPresenter::new(DashboardConfig::default());
//! dashboard::present(&mut presenter, &charts).unwrap();
//! println!("{}", presenter.generate().unwrap());
//! ```

pub mod dashboard;
pub mod error;
pub mod html;
pub mod links;
pub mod loader;

pub use bench_trends_core::{
    format_bytes, format_seconds, project, BuildRecord, Column, History, MetricKind, Snapshot,
    ValueFormat,
};
pub use error::{Error, Result};
