//! ---
//! pw_section: "01-core-functionality"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Unit and plant lifecycle status classification."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use plantwatch_model::UnitReading;

/// Lifecycle state of a generation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    /// Actively producing with nonzero readings.
    Online,
    /// Powered but idle: explicit flag, or all readings zero while online.
    Standby,
    /// Not reporting, or online flag false.
    Offline,
}

impl UnitStatus {
    /// Classify a raw unit reading. Precedence: offline beats standby beats
    /// online; a unit with `online == false` is offline no matter what its
    /// readings say.
    pub fn classify(unit: &UnitReading) -> Self {
        if !unit.online {
            return UnitStatus::Offline;
        }
        let all_zero = unit.power_kw == 0.0 && unit.current_avg == 0.0 && unit.voltage_avg == 0.0;
        if unit.standby || all_zero {
            return UnitStatus::Standby;
        }
        UnitStatus::Online
    }

    /// Stable lowercase identifier, matching the wire vocabulary.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Online => "online",
            UnitStatus::Standby => "standby",
            UnitStatus::Offline => "offline",
        }
    }

    /// Badge label shown next to a unit card.
    pub fn label(&self) -> &'static str {
        match self {
            UnitStatus::Online => "Running",
            UnitStatus::Standby => "Standby",
            UnitStatus::Offline => "Offline",
        }
    }

    /// Badge symbol shown next to a unit card.
    pub fn symbol(&self) -> &'static str {
        match self {
            UnitStatus::Online => "⚡",
            UnitStatus::Standby => "⏸",
            UnitStatus::Offline => "⚠",
        }
    }
}

/// Display mapping for a status *name* rather than a classified reading.
/// Unknown vocabulary falls back to a neutral badge instead of failing.
pub fn status_display(status: &str) -> (&'static str, &'static str) {
    match status {
        "online" | "running" => ("Running", "⚡"),
        "standby" => ("Standby", "⏸"),
        "offline" => ("Offline", "⚠"),
        _ => ("Unknown", "?"),
    }
}

/// Derive a plant's aggregate activity for the fleet buttons: any running
/// unit wins, then any standby unit, else offline.
pub fn plant_activity(running_units: u32, standby_units: u32) -> UnitStatus {
    if running_units > 0 {
        UnitStatus::Online
    } else if standby_units > 0 {
        UnitStatus::Standby
    } else {
        UnitStatus::Offline
    }
}
