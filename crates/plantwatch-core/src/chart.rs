//! ---
//! pw_section: "01-core-functionality"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Power history to chart configuration mapping."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! Maps a power time-series into a renderer-agnostic chart configuration.
//! A zero sample is an authoritative "no telemetry" signal, never legitimate
//! zero output: zero points get alert styling, segments whose endpoints are
//! both zero render offline (dashed, thinner, alert color), and tooltips for
//! zero samples say so instead of reporting power.

use serde::{Deserialize, Serialize};

use plantwatch_model::PowerHistory;

/// Line/point color for healthy samples.
pub const ONLINE_COLOR: (u8, u8, u8) = (0x28, 0xa7, 0x45);
/// Line/point color for offline samples and segments.
pub const OFFLINE_COLOR: (u8, u8, u8) = (0xdc, 0x35, 0x45);

/// Marker styling for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointStyle {
    pub radius: u8,
    pub color: (u8, u8, u8),
}

/// Stroke styling for the segment between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStyle {
    /// True when both endpoints are zero.
    pub offline: bool,
    pub color: (u8, u8, u8),
    pub width: u8,
    /// Dash pattern, `None` for a solid stroke.
    pub dash: Option<(u8, u8)>,
}

/// One sample with its derived presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub power_kw: f64,
    pub style: PointStyle,
    pub tooltip: Vec<String>,
}

/// Complete configuration handed to whichever charting surface renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub points: Vec<ChartPoint>,
    /// One entry per consecutive sample pair (`points.len() - 1`).
    pub segments: Vec<SegmentStyle>,
}

impl ChartConfig {
    /// Build the chart configuration for one plant's history.
    pub fn build(plant_id: u32, history: &PowerHistory) -> Self {
        let points = history
            .labels
            .iter()
            .zip(&history.power_kw)
            .map(|(label, &power_kw)| ChartPoint {
                label: label.clone(),
                power_kw,
                style: point_style(power_kw),
                tooltip: tooltip_lines(power_kw),
            })
            .collect::<Vec<_>>();
        let segments = history
            .power_kw
            .windows(2)
            .map(|pair| segment_style(pair[0], pair[1]))
            .collect();
        Self {
            title: format!("Plant {plant_id} Total Power (kW)"),
            x_axis_title: "Time (Last 5 Hours)".to_owned(),
            y_axis_title: "Total Plant Power (kW)".to_owned(),
            points,
            segments,
        }
    }

    /// Number of zero-valued samples, i.e. detected offline intervals.
    pub fn offline_intervals(&self) -> usize {
        self.points
            .iter()
            .filter(|point| point.power_kw == 0.0)
            .count()
    }
}

fn point_style(power_kw: f64) -> PointStyle {
    if power_kw == 0.0 {
        PointStyle {
            radius: 6,
            color: OFFLINE_COLOR,
        }
    } else {
        PointStyle {
            radius: 4,
            color: ONLINE_COLOR,
        }
    }
}

fn segment_style(from_kw: f64, to_kw: f64) -> SegmentStyle {
    if from_kw == 0.0 && to_kw == 0.0 {
        SegmentStyle {
            offline: true,
            color: OFFLINE_COLOR,
            width: 2,
            dash: Some((5, 5)),
        }
    } else {
        SegmentStyle {
            offline: false,
            color: ONLINE_COLOR,
            width: 3,
            dash: None,
        }
    }
}

fn tooltip_lines(power_kw: f64) -> Vec<String> {
    if power_kw == 0.0 {
        return vec![
            "⚠ OFFLINE".to_owned(),
            "Power: 0 kW".to_owned(),
            "Status: Not sending data".to_owned(),
        ];
    }
    let display = if power_kw >= 1000.0 {
        format!("{:.2} MW", power_kw / 1000.0)
    } else {
        format!("{power_kw:.2} kW")
    };
    vec!["✓ ONLINE".to_owned(), format!("Power: {display}")]
}

/// Y-axis tick label: megawatts with one decimal from 1000 kW upward,
/// kilowatts with no forced decimal below.
pub fn y_tick_label(value_kw: f64) -> String {
    if value_kw >= 1000.0 {
        format!("{:.1} MW", value_kw / 1000.0)
    } else {
        format!("{value_kw} kW")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(power: &[f64]) -> PowerHistory {
        PowerHistory {
            labels: (0..power.len()).map(|i| format!("10:{i:02}")).collect(),
            power_kw: power.to_vec(),
        }
    }

    #[test]
    fn both_zero_endpoints_flag_an_offline_segment() {
        let config = ChartConfig::build(1, &history(&[100.0, 0.0, 0.0, 50.0]));
        assert_eq!(config.segments.len(), 3);
        assert!(!config.segments[0].offline, "one nonzero endpoint");
        assert!(config.segments[1].offline, "both endpoints zero");
        assert!(!config.segments[2].offline, "one nonzero endpoint");
        assert_eq!(config.segments[1].dash, Some((5, 5)));
        assert_eq!(config.segments[1].color, OFFLINE_COLOR);
        assert_eq!(config.segments[1].width, 2);
        assert_eq!(config.segments[0].width, 3);
    }

    #[test]
    fn zero_points_get_alert_markers_even_next_to_online_segments() {
        let config = ChartConfig::build(1, &history(&[100.0, 0.0, 50.0]));
        assert_eq!(config.points[1].style.radius, 6);
        assert_eq!(config.points[1].style.color, OFFLINE_COLOR);
        assert_eq!(config.points[0].style.radius, 4);
        assert!(!config.segments[0].offline);
        assert!(!config.segments[1].offline);
    }

    #[test]
    fn zero_tooltip_reads_as_no_data() {
        let config = ChartConfig::build(1, &history(&[100.0, 0.0]));
        let tooltip = &config.points[1].tooltip;
        assert!(tooltip.iter().any(|line| line.contains("OFFLINE")));
        assert!(tooltip.iter().any(|line| line.contains("Not sending data")));
        assert!(!tooltip
            .iter()
            .any(|line| line.contains("of power")), "never implies real output");
    }

    #[test]
    fn nonzero_tooltip_crosses_to_megawatts_at_1000() {
        let config = ChartConfig::build(1, &history(&[999.0, 1000.0]));
        assert_eq!(config.points[0].tooltip[1], "Power: 999.00 kW");
        assert_eq!(config.points[1].tooltip[1], "Power: 1.00 MW");
    }

    #[test]
    fn y_tick_crossover_is_exactly_1000() {
        assert_eq!(y_tick_label(999.0), "999 kW");
        assert_eq!(y_tick_label(1000.0), "1.0 MW");
        assert_eq!(y_tick_label(1500.0), "1.5 MW");
        assert_eq!(y_tick_label(750.5), "750.5 kW");
    }

    #[test]
    fn offline_interval_count_matches_zero_samples() {
        let config = ChartConfig::build(2, &history(&[0.0, 10.0, 0.0, 0.0]));
        assert_eq!(config.offline_intervals(), 3);
    }

    #[test]
    fn title_names_the_plant() {
        let config = ChartConfig::build(7, &history(&[1.0]));
        assert_eq!(config.title, "Plant 7 Total Power (kW)");
    }
}
