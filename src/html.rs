//! HTML dashboard presenter with c3.js

use crate::dashboard::{ChartPresenter, ChartSpec};
use crate::error::{Error, Result};
use minijinja::{context, Environment};
use std::path::{Path, PathBuf};

/// HTML template for the trend dashboard
const DASHBOARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/c3/0.6.8/c3.min.css">
    <script src="https://cdnjs.cloudflare.com/ajax/libs/d3/5.7.0/d3.min.js"></script>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/c3/0.6.8/c3.min.js"></script>
    <style>
        :root {
            --bg-primary: #0d1117;
            --bg-secondary: #161b22;
            --bg-tertiary: #21262d;
            --text-primary: #c9d1d9;
            --text-secondary: #8b949e;
            --text-muted: #6e7681;
            --border-color: #30363d;
            --accent-blue: #58a6ff;
        }

        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.6;
        }

        .container { max-width: 1400px; margin: 0 auto; padding: 2rem; }

        header {
            text-align: center;
            margin-bottom: 2rem;
            padding: 2rem;
            background: var(--bg-secondary);
            border-radius: 16px;
            border: 1px solid var(--border-color);
        }

        h1 { font-size: 2.25rem; font-weight: 600; color: var(--accent-blue); }

        .last-updated { color: var(--text-muted); font-size: 0.9rem; margin-top: 1rem; }

        .trend-chart {
            background: var(--bg-secondary);
            border: 1px solid var(--border-color);
            border-radius: 12px;
            margin-bottom: 2rem;
            overflow: hidden;
        }

        .chart-header {
            padding: 1rem 1.5rem;
            background: var(--bg-tertiary);
            border-bottom: 1px solid var(--border-color);
        }

        .chart-header h2 { font-size: 1.2rem; font-weight: 600; }

        .chart-container { padding: 1.5rem; background: #fff; }

        .latest-table { width: 100%; border-collapse: collapse; }

        .latest-table th,
        .latest-table td {
            padding: 0.75rem 1.5rem;
            text-align: left;
            border-top: 1px solid var(--border-color);
        }

        .latest-table th {
            color: var(--text-secondary);
            font-weight: 500;
            font-size: 0.85rem;
            text-transform: uppercase;
        }

        .series-name { font-family: 'SF Mono', 'Fira Code', monospace; color: var(--accent-blue); }

        .no-data { text-align: center; padding: 3rem; color: var(--text-muted); }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>{{ title }}</h1>
            {% if last_update %}
            <p class="last-updated">Last updated: {{ last_update }}</p>
            {% endif %}
        </header>

        {% if charts %}
            {% for chart in charts %}
            <div class="trend-chart">
                <div class="chart-header">
                    <h2>{{ chart.title }}</h2>
                </div>
                <div class="chart-container">
                    <div id="chart-{{ chart.id }}"></div>
                </div>
                {% if chart.latest %}
                <table class="latest-table">
                    <thead>
                        <tr><th>Series</th><th>Latest</th></tr>
                    </thead>
                    <tbody>
                        {% for row in chart.latest %}
                        <tr>
                            <td class="series-name">{{ row[0] }}</td>
                            <td>{{ row[1] }}</td>
                        </tr>
                        {% endfor %}
                    </tbody>
                </table>
                {% endif %}
            </div>
            {% endfor %}
        {% else %}
            <div class="no-data">
                <p>No benchmark data available.</p>
            </div>
        {% endif %}
    </div>

    <script>
        window.TREND_CHARTS = {{ charts_json | safe }};

        function formatBytes(a, b) {
            if (a == 0) return "0 Bytes";
            const c = 1024;
            const d = b || 2;
            const e = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
            const f = Math.min(Math.max(Math.floor(Math.log(Math.abs(a)) / Math.log(c)), 0), e.length - 1);
            return parseFloat((a / Math.pow(c, f)).toFixed(d)) + " " + e[f];
        }

        function formatSeconds(t) {
            const rem = t % 60;
            const min = Math.floor(t / 60);
            return rem < 30 ? min + " min" : (min + 1) + " min";
        }

        const formatters = { plain: null, bytes: formatBytes, minutes: formatSeconds };

        document.addEventListener('DOMContentLoaded', function() {
            window.TREND_CHARTS.forEach(chart => {
                c3.generate({
                    bindto: '#chart-' + chart.id,
                    data: {
                        columns: chart.columns,
                        onclick: function(d) {
                            const url = chart.links[d.index];
                            if (url) window.open(url);
                        }
                    },
                    axis: {
                        x: {
                            type: 'category',
                            show: false,
                            categories: chart.categories
                        },
                        y: {
                            tick: { format: formatters[chart.format] || undefined }
                        }
                    }
                });
            });
        });
    </script>
</body>
</html>
"#;

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Title for the dashboard
    pub title: String,
    /// Path to output directory
    pub output_dir: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Benchmark Trends".to_string(),
            output_dir: "dist".to_string(),
        }
    }
}

/// Chart data for template rendering
#[derive(Debug, Clone, serde::Serialize)]
struct ChartSection {
    id: String,
    title: String,
    latest: Vec<(String, String)>,
}

/// Collects charts and renders them into a single page
#[derive(Debug, Clone)]
pub struct HtmlPresenter {
    config: DashboardConfig,
    charts: Vec<ChartSpec>,
}

impl HtmlPresenter {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            charts: Vec::new(),
        }
    }

    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    /// Render the collected charts to an HTML string
    pub fn generate(&self) -> Result<String> {
        let mut env = Environment::new();
        env.add_template("dashboard.html", DASHBOARD_TEMPLATE)?;

        let template = env.get_template("dashboard.html")?;

        let sections: Vec<ChartSection> = self
            .charts
            .iter()
            .map(|chart| ChartSection {
                id: chart.id.clone(),
                title: chart.title.clone(),
                latest: chart.latest_values(),
            })
            .collect();

        // Inline JSON must not be able to close the script element
        let charts_json = serde_json::to_string(&self.charts)?.replace("</", "<\\/");
        let last_update = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

        let html = template.render(context! {
            title => &self.config.title,
            last_update => last_update,
            charts => sections,
            charts_json => charts_json,
        })?;

        Ok(html)
    }

    /// Write `index.html` under `base_path/output_dir`
    pub fn write(&self, base_path: &Path) -> Result<PathBuf> {
        let output_dir = base_path.join(&self.config.output_dir);
        std::fs::create_dir_all(&output_dir).map_err(|e| Error::FileWriteError {
            path: output_dir.display().to_string(),
            source: e,
        })?;

        let html = self.generate()?;
        let index_path = output_dir.join("index.html");
        std::fs::write(&index_path, html).map_err(|e| Error::FileWriteError {
            path: index_path.display().to_string(),
            source: e,
        })?;

        Ok(index_path)
    }
}

impl ChartPresenter for HtmlPresenter {
    fn render(&mut self, chart: &ChartSpec) -> Result<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}
