//! ---
//! pw_section: "01-core-functionality"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Counter formatting and stats view-models."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use plantwatch_model::{FleetSnapshot, PlantSnapshot, PlantSummary};

/// Format kilowatts as megawatts with exactly two decimals,
/// round-half-away-from-zero. `1234 kW` renders as `"1.23"`.
pub fn format_mw(kilowatts: f64) -> String {
    let megawatts = kilowatts / 1000.0;
    let rounded = (megawatts * 100.0).round() / 100.0;
    format!("{rounded:.2}")
}

/// Megawatt counter text with its unit suffix, e.g. `"15.25 MW"`.
pub fn mw_text(kilowatts: f64) -> String {
    format!("{} MW", format_mw(kilowatts))
}

/// Plant-button power text, one decimal, e.g. `"8000.0 kW"`.
pub fn plant_kw_text(kilowatts: f64) -> String {
    format!("{kilowatts:.1} kW")
}

/// Plant-button info text, e.g. `"R: 5 | S: 0 | O: 1"`.
pub fn plant_info_text(summary: &PlantSummary) -> String {
    format!(
        "R: {} | S: {} | O: {}",
        summary.running_units, summary.standby_units, summary.offline_units
    )
}

/// Displayed counters for the fleet view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetStatsView {
    pub total_power_text: String,
    pub running_units: u32,
    pub standby_units: u32,
    pub total_units: u32,
    pub active_plants: u32,
}

impl FleetStatsView {
    pub fn from_snapshot(snapshot: &FleetSnapshot) -> Self {
        Self {
            total_power_text: mw_text(snapshot.total_power_kw),
            running_units: snapshot.total_running_units,
            standby_units: snapshot.total_standby_units,
            total_units: snapshot.total_units,
            active_plants: snapshot.active_plants,
        }
    }
}

/// Displayed counters for the plant detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantStatsView {
    pub total_power_text: String,
    pub online_units: u32,
    pub offline_units: u32,
    pub standby_units: u32,
    pub running_units: u32,
}

impl PlantStatsView {
    pub fn from_snapshot(snapshot: &PlantSnapshot) -> Self {
        Self {
            total_power_text: mw_text(snapshot.total_power_kw),
            online_units: snapshot.online_units,
            offline_units: snapshot.offline_units,
            standby_units: snapshot.standby_units,
            running_units: snapshot.running_units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mw_conversion_is_exact() {
        assert_eq!(mw_text(1234.0), "1.23 MW");
        assert_eq!(mw_text(0.0), "0.00 MW");
        assert_eq!(mw_text(15250.0), "15.25 MW");
    }

    #[test]
    fn mw_rounds_half_away_from_zero() {
        assert_eq!(format_mw(1235.0), "1.24");
        assert_eq!(format_mw(-1235.0), "-1.24");
    }

    #[test]
    fn plant_power_uses_one_decimal() {
        assert_eq!(plant_kw_text(8000.0), "8000.0 kW");
        assert_eq!(plant_kw_text(123.45), "123.5 kW");
    }

    #[test]
    fn info_text_matches_display_contract() {
        let summary = PlantSummary {
            running_units: 5,
            standby_units: 0,
            offline_units: 1,
            total_power_kw: 8000.0,
        };
        assert_eq!(plant_info_text(&summary), "R: 5 | S: 0 | O: 1");
    }

    #[test]
    fn fleet_view_from_snapshot() {
        let snapshot = FleetSnapshot {
            total_power_kw: 15250.0,
            total_running_units: 10,
            total_standby_units: 2,
            total_units: 15,
            active_plants: 3,
            plants: Default::default(),
        };
        let view = FleetStatsView::from_snapshot(&snapshot);
        assert_eq!(view.total_power_text, "15.25 MW");
        assert_eq!(view.total_units, 15);
    }
}
