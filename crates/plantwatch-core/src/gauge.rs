//! ---
//! pw_section: "01-core-functionality"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Gauge kinds and the dynamic scale policy."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

/// Fixed headroom added above the current reading when deriving a scale.
const SCALE_HEADROOM: f64 = 100.0;

/// The three instruments rendered per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeKind {
    Voltage,
    Current,
    Power,
}

impl GaugeKind {
    /// Minimum gauge maximum, so a near-zero reading never yields a
    /// degenerate scale.
    pub fn floor(&self) -> f64 {
        match self {
            GaugeKind::Voltage => 100.0,
            GaugeKind::Current => 50.0,
            GaugeKind::Power => 100.0,
        }
    }

    /// Foreground color for this instrument (RGB).
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            GaugeKind::Voltage => (0x00, 0x7b, 0xff),
            GaugeKind::Current => (0xff, 0xc1, 0x07),
            GaugeKind::Power => (0x28, 0xa7, 0x45),
        }
    }

    /// Axis/legend label.
    pub fn label(&self) -> &'static str {
        match self {
            GaugeKind::Voltage => "Voltage",
            GaugeKind::Current => "Current",
            GaugeKind::Power => "Power",
        }
    }

    /// Unit suffix for the value readout.
    pub fn unit(&self) -> &'static str {
        match self {
            GaugeKind::Voltage => "V",
            GaugeKind::Current => "A",
            GaugeKind::Power => "kW",
        }
    }

    /// Derive the gauge maximum from the current reading:
    /// `max(floor, value + headroom)`. Recomputed on every render so the
    /// scale grows with the reading and the arc never pins at 100%.
    pub fn scale_max(&self, value: f64) -> f64 {
        self.floor().max(value + SCALE_HEADROOM)
    }
}

/// Transient per-render description of one gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeInstrument {
    pub kind: GaugeKind,
    pub value: f64,
    /// Derived from `value` at construction time, never persisted.
    pub scale_max: f64,
    pub color: (u8, u8, u8),
}

impl GaugeInstrument {
    /// Build an instrument for the given reading, deriving scale and color.
    pub fn new(kind: GaugeKind, value: f64) -> Self {
        Self {
            kind,
            value,
            scale_max: kind.scale_max(value),
            color: kind.color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_never_drops_below_floor() {
        for kind in [GaugeKind::Voltage, GaugeKind::Current, GaugeKind::Power] {
            for value in [0.0, 0.5, 10.0, 49.0, 99.9, 100.0, 5000.0] {
                let max = kind.scale_max(value);
                assert!(max >= kind.floor(), "{kind:?} at {value} gave {max}");
                assert!(max >= value, "{kind:?} scale must cover the reading");
            }
        }
    }

    #[test]
    fn scale_tracks_reading_above_floor() {
        assert_eq!(GaugeKind::Voltage.scale_max(230.0), 330.0);
        assert_eq!(GaugeKind::Current.scale_max(120.0), 220.0);
        assert_eq!(GaugeKind::Power.scale_max(450.0), 550.0);
    }

    #[test]
    fn floors_apply_near_zero() {
        assert_eq!(GaugeKind::Voltage.scale_max(0.0), 100.0);
        assert_eq!(GaugeKind::Current.scale_max(0.0), 100.0); // 0 + headroom beats the 50 floor
        assert_eq!(GaugeKind::Current.scale_max(-80.0), 50.0);
        assert_eq!(GaugeKind::Power.scale_max(0.0), 100.0);
    }

    #[test]
    fn instrument_derives_scale_and_color() {
        let gauge = GaugeInstrument::new(GaugeKind::Power, 250.0);
        assert_eq!(gauge.scale_max, 350.0);
        assert_eq!(gauge.color, (0x28, 0xa7, 0x45));
    }
}
