//! ---
//! pw_section: "02-data-model"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Single-plant detail snapshot and unit readings."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::issue::FieldIssue;
use crate::lenient;

/// One poll of `GET /api/plant/{id}/details`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantSnapshot {
    /// Plant total power in kilowatts.
    #[serde(
        rename = "total_power",
        default,
        deserialize_with = "lenient::f64_or_zero"
    )]
    pub total_power_kw: f64,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub online_units: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub offline_units: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub standby_units: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub running_units: u32,
    /// Per-unit telemetry, ordered as the backend reports it.
    #[serde(default)]
    pub units: Vec<UnitReading>,
}

/// Raw telemetry for one generation unit.
///
/// `unit_id` is the stable identity used to match an existing card; all
/// other fields are the latest readings for that unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitReading {
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub unit_id: u32,
    #[serde(default, deserialize_with = "lenient::bool_or_false")]
    pub online: bool,
    /// Explicit standby flag; optional on the wire.
    #[serde(default, deserialize_with = "lenient::bool_or_false")]
    pub standby: bool,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub voltage_avg: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub current_avg: f64,
    /// Unit power in kilowatts.
    #[serde(rename = "power", default, deserialize_with = "lenient::f64_or_zero")]
    pub power_kw: f64,
    /// Last-update timestamp, displayed verbatim.
    #[serde(default)]
    pub timestamp: String,
}

impl PlantSnapshot {
    /// Decode a plant detail payload, collecting soft shape issues.
    pub fn from_value(value: Value) -> Result<(Self, Vec<FieldIssue>), serde_json::Error> {
        let mut issues = Vec::new();
        if let Value::Object(map) = &value {
            if !map.contains_key("units") {
                issues.push(FieldIssue::MissingField("units"));
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
    fn decodes_units_in_order() {
        let payload = json!({
            "total_power": 420.5,
            "online_units": 2,
            "offline_units": 1,
            "standby_units": 0,
            "running_units": 2,
            "units": [
                {"unit_id": 3, "online": true, "voltage_avg": 230.1, "current_avg": 12.0,
                 "power": 210.0, "timestamp": "2025-08-25 10:00:00"},
                {"unit_id": 1, "online": false}
            ]
        });
        let (snapshot, issues) = PlantSnapshot::from_value(payload).unwrap();
        assert!(issues.is_empty());
        assert_eq!(snapshot.units.len(), 2);
        assert_eq!(snapshot.units[0].unit_id, 3);
        assert!(!snapshot.units[1].online);
        assert_eq!(snapshot.units[1].power_kw, 0.0);
        assert_eq!(snapshot.units[1].timestamp, "");
    }

    #[test]
    fn missing_units_is_soft() {
        let payload = json!({"total_power": 1.0});
        let (snapshot, issues) = PlantSnapshot::from_value(payload).unwrap();
        assert!(snapshot.units.is_empty());
        assert!(issues.contains(&FieldIssue::MissingField("units")));
    }

    #[test]
    fn standby_flag_defaults_false() {
        let payload = json!({"units": [{"unit_id": 1, "online": true}]});
        let (snapshot, _) = PlantSnapshot::from_value(payload).unwrap();
        assert!(!snapshot.units[0].standby);
    }
}
