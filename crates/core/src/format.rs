//! Human-readable formatting for chart ticks and tooltips

use serde::{Deserialize, Serialize};

const BYTE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Value formatter attached to a chart's y-axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    #[default]
    Plain,
    Bytes,
    Minutes,
}

impl ValueFormat {
    pub fn apply(&self, value: f64) -> String {
        match self {
            ValueFormat::Plain => value.to_string(),
            ValueFormat::Bytes => format_bytes(value, None),
            ValueFormat::Minutes => format_seconds(value),
        }
    }
}

/// Format a byte count using 1024 steps, e.g. `19000` -> `"18.55 KB"`.
///
/// `decimals` defaults to 2; zero is treated as unset. Trailing zeros of the
/// rounded value are dropped (`1024` -> `"1 KB"`).
pub fn format_bytes(bytes: f64, decimals: Option<usize>) -> String {
    if bytes == 0.0 {
        return "0 Bytes".to_string();
    }

    let decimals = decimals.filter(|d| *d > 0).unwrap_or(2);
    let exponent = (bytes.abs().ln() / 1024f64.ln()).floor();
    let exponent = exponent.clamp(0.0, (BYTE_UNITS.len() - 1) as f64) as usize;

    let scaled = bytes / 1024f64.powi(exponent as i32);
    let rounded: f64 = format!("{:.*}", decimals, scaled)
        .parse()
        .unwrap_or(scaled);

    format!("{} {}", rounded, BYTE_UNITS[exponent])
}

/// Format seconds as whole minutes; a remainder of 30s or more rounds up
pub fn format_seconds(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor();
    let remainder = seconds % 60.0;
    let minutes = if remainder < 30.0 { minutes } else { minutes + 1.0 };
    format!("{} min", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_zero() {
        assert_eq!(format_bytes(0.0, None), "0 Bytes");
    }

    #[test]
    fn test_format_bytes_kilobytes() {
        assert_eq!(format_bytes(19000.0, Some(2)), "18.55 KB");
        assert_eq!(format_bytes(1024.0, None), "1 KB");
    }

    #[test]
    fn test_format_bytes_small_and_large() {
        assert_eq!(format_bytes(512.0, None), "512 Bytes");
        assert_eq!(format_bytes(0.5, None), "0.5 Bytes");
        assert_eq!(format_bytes(48_000_000.0, None), "45.78 MB");
        assert_eq!(format_bytes(1024f64.powi(9), None), "1024 YB");
    }

    #[test]
    fn test_format_bytes_decimals() {
        assert_eq!(format_bytes(19000.0, Some(3)), "18.555 KB");
        assert_eq!(format_bytes(19000.0, Some(0)), "18.55 KB");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(29.0), "0 min");
        assert_eq!(format_seconds(30.0), "1 min");
        assert_eq!(format_seconds(125.0), "2 min");
        assert_eq!(format_seconds(150.0), "3 min");
    }

    #[test]
    fn test_value_format_apply() {
        assert_eq!(ValueFormat::Bytes.apply(0.0), "0 Bytes");
        assert_eq!(ValueFormat::Minutes.apply(90.0), "2 min");
        assert_eq!(ValueFormat::Plain.apply(2.5), "2.5");
    }
}
