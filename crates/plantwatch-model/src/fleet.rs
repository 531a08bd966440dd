//! ---
//! pw_section: "02-data-model"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Fleet-level aggregate snapshot."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::issue::FieldIssue;
use crate::lenient;

/// One poll of `GET /api/master/live`: fleet-wide totals plus a per-plant
/// summary keyed by plant id. Constructed fresh per poll and discarded after
/// render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    /// Fleet total power in kilowatts.
    #[serde(
        rename = "total_power",
        default,
        deserialize_with = "lenient::f64_or_zero"
    )]
    pub total_power_kw: f64,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub total_running_units: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub total_standby_units: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub total_units: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub active_plants: u32,
    /// Per-plant summaries in payload order.
    #[serde(rename = "plant_data", default)]
    pub plants: IndexMap<String, PlantSummary>,
}

/// Per-plant roll-up inside the fleet snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantSummary {
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub running_units: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub standby_units: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub offline_units: u32,
    /// Plant total power in kilowatts.
    #[serde(
        rename = "total_power",
        default,
        deserialize_with = "lenient::f64_or_zero"
    )]
    pub total_power_kw: f64,
}

impl FleetSnapshot {
    /// Decode a fleet payload, collecting soft shape issues.
    pub fn from_value(value: Value) -> Result<(Self, Vec<FieldIssue>), serde_json::Error> {
        let mut issues = Vec::new();
        if let Value::Object(map) = &value {
            if !map.contains_key("total_power") {
                issues.push(FieldIssue::MissingField("total_power"));
            }
            if !map.contains_key("plant_data") {
                issues.push(FieldIssue::MissingField("plant_data"));
            }
        }
        let snapshot = serde_json::from_value(value)?;
        Ok((snapshot, issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_payload() {
        let payload = json!({
            "total_power": 15250,
            "total_running_units": 10,
            "total_standby_units": 2,
            "total_units": 15,
            "active_plants": 3,
            "plant_data": {
                "1": {"running_units": 5, "standby_units": 0, "offline_units": 1, "total_power": 8000}
            }
        });
        let (snapshot, issues) = FleetSnapshot::from_value(payload).unwrap();
        assert!(issues.is_empty());
        assert_eq!(snapshot.total_power_kw, 15250.0);
        assert_eq!(snapshot.total_running_units, 10);
        let plant = &snapshot.plants["1"];
        assert_eq!(plant.running_units, 5);
        assert_eq!(plant.total_power_kw, 8000.0);
    }

    #[test]
    fn missing_total_power_is_soft() {
        let payload = json!({"total_units": 4, "plant_data": {}});
        let (snapshot, issues) = FleetSnapshot::from_value(payload).unwrap();
        assert_eq!(snapshot.total_power_kw, 0.0);
        assert!(issues.contains(&FieldIssue::MissingField("total_power")));
    }

    #[test]
    fn missing_plant_data_is_soft() {
        let payload = json!({"total_power": 10});
        let (snapshot, issues) = FleetSnapshot::from_value(payload).unwrap();
        assert!(snapshot.plants.is_empty());
        assert!(issues.contains(&FieldIssue::MissingField("plant_data")));
    }

    #[test]
    fn plant_order_is_preserved() {
        let payload = json!({
            "total_power": 0,
            "plant_data": {"2": {}, "1": {}, "3": {}}
        });
        let (snapshot, _) = FleetSnapshot::from_value(payload).unwrap();
        let keys: Vec<&String> = snapshot.plants.keys().collect();
        assert_eq!(keys, ["2", "1", "3"]);
    }
}
