//! ---
//! pw_section: "01-core-functionality"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "View state, sink traits, and poll handlers."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! Per-view state that persists across polls, plus the sink traits the poll
//! handlers render through. A sink receives typed view-models; whatever
//! display surface sits behind it decides where (or whether) each one lands,
//! so a missing output target is a local no-op rather than an error.

use tracing::warn;

use plantwatch_model::{FleetSnapshot, PlantSnapshot, PlantSummary, UnitReading};

use crate::gauge::{GaugeInstrument, GaugeKind};
use crate::reconcile::{Action, Reconciler};
use crate::stats::{plant_info_text, plant_kw_text, FleetStatsView, PlantStatsView};
use crate::status::{plant_activity, UnitStatus};

/// Header live-status lamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveIndicator {
    /// At least one unit online, data flowing.
    Online,
    /// Data flowing but nothing online.
    Offline,
    /// The last poll failed; values on screen are the previous good ones.
    Error,
}

/// Render model for one plant button on the fleet view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantButtonView {
    pub plant_id: String,
    pub activity: UnitStatus,
    /// `"R: 5 | S: 0 | O: 1"`
    pub info_text: String,
    /// `"8000.0 kW"`
    pub power_text: String,
}

impl PlantButtonView {
    pub fn from_summary(plant_id: &str, summary: &PlantSummary) -> Self {
        Self {
            plant_id: plant_id.to_owned(),
            activity: plant_activity(summary.running_units, summary.standby_units),
            info_text: plant_info_text(summary),
            power_text: plant_kw_text(summary.total_power_kw),
        }
    }
}

/// Render model for one unit card on the plant view.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCardView {
    pub unit_id: u32,
    pub status: UnitStatus,
    /// `"⚡ Running"`
    pub badge_text: String,
    /// Raw readings, or `"---"` while the unit is offline.
    pub voltage_text: String,
    pub current_text: String,
    pub power_text: String,
    /// Voltage, current, power instruments with freshly derived scales.
    pub gauges: [GaugeInstrument; 3],
    pub timestamp_text: String,
}

impl UnitCardView {
    pub fn from_reading(unit: &UnitReading) -> Self {
        let status = UnitStatus::classify(unit);
        let reading_text = |value: f64| {
            if unit.online {
                format!("{value}")
            } else {
                "---".to_owned()
            }
        };
        // Offline gauges draw at zero, matching the dashed-out readings.
        let gauge_value = |value: f64| if unit.online { value } else { 0.0 };
        Self {
            unit_id: unit.unit_id,
            status,
            badge_text: format!("{} {}", status.symbol(), status.label()),
            voltage_text: reading_text(unit.voltage_avg),
            current_text: reading_text(unit.current_avg),
            power_text: reading_text(unit.power_kw),
            gauges: [
                GaugeInstrument::new(GaugeKind::Voltage, gauge_value(unit.voltage_avg)),
                GaugeInstrument::new(GaugeKind::Current, gauge_value(unit.current_avg)),
                GaugeInstrument::new(GaugeKind::Power, gauge_value(unit.power_kw)),
            ],
            timestamp_text: if unit.online {
                format!("Last update: {}", unit.timestamp)
            } else {
                "Last update: No data".to_owned()
            },
        }
    }
}

/// Output surface for the fleet view.
pub trait FleetSink {
    fn stats(&mut self, view: FleetStatsView);
    fn plant_button(&mut self, view: PlantButtonView);
    fn live(&mut self, indicator: LiveIndicator);
}

/// Output surface for the plant detail view.
pub trait PlantSink {
    fn stats(&mut self, view: PlantStatsView);
    fn unit_card(&mut self, view: UnitCardView);
    fn live(&mut self, indicator: LiveIndicator);
}

/// State that persists across fleet polls.
#[derive(Debug, Default)]
pub struct FleetViewState {
    known_plants: Vec<String>,
    last: Option<FleetSnapshot>,
}

impl FleetViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a successful fleet poll. The plant-button set is fixed by the
    /// first snapshot; a plant that later disappears from the payload is
    /// logged and its button left at the previous values.
    pub fn apply(&mut self, snapshot: FleetSnapshot, sink: &mut dyn FleetSink) {
        sink.stats(FleetStatsView::from_snapshot(&snapshot));
        if self.known_plants.is_empty() {
            self.known_plants = snapshot.plants.keys().cloned().collect();
        }
        for plant_id in &self.known_plants {
            match snapshot.plants.get(plant_id) {
                Some(summary) => sink.plant_button(PlantButtonView::from_summary(plant_id, summary)),
                None => warn!(plant_id, "no data for plant, display left unchanged"),
            }
        }
        sink.live(LiveIndicator::Online);
        self.last = Some(snapshot);
    }

    /// Apply a failed poll: flip the indicator, keep the last good values.
    pub fn apply_error(&mut self, sink: &mut dyn FleetSink) {
        sink.live(LiveIndicator::Error);
    }

    /// Last good snapshot, if any poll has succeeded.
    pub fn last(&self) -> Option<&FleetSnapshot> {
        self.last.as_ref()
    }
}

/// State that persists across plant-detail polls.
#[derive(Debug)]
pub struct PlantViewState {
    plant_id: u32,
    reconciler: Reconciler,
    last: Option<PlantSnapshot>,
}

impl PlantViewState {
    pub fn new(plant_id: u32) -> Self {
        Self {
            plant_id,
            reconciler: Reconciler::new(),
            last: None,
        }
    }

    pub fn plant_id(&self) -> u32 {
        self.plant_id
    }

    /// Apply a successful plant poll.
    ///
    /// A running/standby count change returns [`Action::Reload`] and leaves
    /// the sink untouched for this poll; the caller schedules the rebuild.
    /// Otherwise stats and every unit card are patched in place.
    pub fn apply(&mut self, snapshot: PlantSnapshot, sink: &mut dyn PlantSink) -> Action {
        let action = self
            .reconciler
            .observe(snapshot.running_units, snapshot.standby_units);
        if action == Action::Reload {
            warn!(
                plant_id = self.plant_id,
                running = snapshot.running_units,
                standby = snapshot.standby_units,
                "unit counts changed, scheduling full rebuild"
            );
            return Action::Reload;
        }
        sink.stats(PlantStatsView::from_snapshot(&snapshot));
        for unit in &snapshot.units {
            sink.unit_card(UnitCardView::from_reading(unit));
        }
        sink.live(if snapshot.online_units > 0 {
            LiveIndicator::Online
        } else {
            LiveIndicator::Offline
        });
        self.last = Some(snapshot);
        Action::Patch
    }

    /// Apply a failed poll: error lamp, last good values stay on screen.
    pub fn apply_error(&mut self, sink: &mut dyn PlantSink) {
        sink.live(LiveIndicator::Error);
    }

    /// Discard history ahead of a full rebuild, as a page reload would.
    pub fn rebuild(&mut self) {
        self.reconciler.reset();
        self.last = None;
    }

    /// Last good snapshot, if any poll has succeeded.
    pub fn last(&self) -> Option<&PlantSnapshot> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingPlantSink {
        stats: Vec<PlantStatsView>,
        cards: Vec<UnitCardView>,
        live: Vec<LiveIndicator>,
    }

    impl PlantSink for RecordingPlantSink {
        fn stats(&mut self, view: PlantStatsView) {
            self.stats.push(view);
        }
        fn unit_card(&mut self, view: UnitCardView) {
            self.cards.push(view);
        }
        fn live(&mut self, indicator: LiveIndicator) {
            self.live.push(indicator);
        }
    }

    fn snapshot(running: u32, standby: u32) -> PlantSnapshot {
        PlantSnapshot {
            total_power_kw: 500.0,
            online_units: running,
            offline_units: 0,
            standby_units: standby,
            running_units: running,
            units: vec![UnitReading {
                unit_id: 1,
                online: true,
                standby: false,
                voltage_avg: 230.0,
                current_avg: 10.0,
                power_kw: 500.0,
                timestamp: "2025-08-25 10:00:00".to_owned(),
            }],
        }
    }

    #[test]
    fn patch_updates_stats_and_cards() {
        let mut state = PlantViewState::new(1);
        let mut sink = RecordingPlantSink::default();
        assert_eq!(state.apply(snapshot(2, 0), &mut sink), Action::Patch);
        assert_eq!(sink.stats.len(), 1);
        assert_eq!(sink.cards.len(), 1);
        assert_eq!(sink.live, vec![LiveIndicator::Online]);
    }

    #[test]
    fn reload_leaves_the_sink_untouched() {
        let mut state = PlantViewState::new(1);
        let mut sink = RecordingPlantSink::default();
        state.apply(snapshot(2, 0), &mut sink);
        let before = (sink.stats.len(), sink.cards.len());
        assert_eq!(state.apply(snapshot(2, 1), &mut sink), Action::Reload);
        assert_eq!((sink.stats.len(), sink.cards.len()), before);
    }

    #[test]
    fn rebuild_starts_reconciliation_over() {
        let mut state = PlantViewState::new(1);
        let mut sink = RecordingPlantSink::default();
        state.apply(snapshot(2, 0), &mut sink);
        assert_eq!(state.apply(snapshot(3, 0), &mut sink), Action::Reload);
        state.rebuild();
        assert_eq!(state.apply(snapshot(3, 0), &mut sink), Action::Patch);
    }

    #[test]
    fn error_keeps_last_good_and_flips_indicator() {
        let mut state = PlantViewState::new(1);
        let mut sink = RecordingPlantSink::default();
        state.apply(snapshot(2, 0), &mut sink);
        state.apply_error(&mut sink);
        assert_eq!(sink.live.last(), Some(&LiveIndicator::Error));
        assert!(state.last().is_some());
    }

    #[test]
    fn offline_unit_card_blanks_readings_and_gauges() {
        let unit = UnitReading {
            unit_id: 4,
            online: false,
            standby: false,
            voltage_avg: 230.0,
            current_avg: 9.0,
            power_kw: 100.0,
            timestamp: "stale".to_owned(),
        };
        let card = UnitCardView::from_reading(&unit);
        assert_eq!(card.status, UnitStatus::Offline);
        assert_eq!(card.voltage_text, "---");
        assert_eq!(card.timestamp_text, "Last update: No data");
        assert!(card.gauges.iter().all(|gauge| gauge.value == 0.0));
    }

    #[test]
    fn online_unit_card_carries_fresh_scales() {
        let unit = UnitReading {
            unit_id: 4,
            online: true,
            standby: false,
            voltage_avg: 230.0,
            current_avg: 9.0,
            power_kw: 450.0,
            timestamp: "2025-08-25 10:00:00".to_owned(),
        };
        let card = UnitCardView::from_reading(&unit);
        assert_eq!(card.gauges[0].scale_max, 330.0);
        assert_eq!(card.gauges[2].scale_max, 550.0);
        assert_eq!(card.badge_text, "⚡ Running");
        assert_eq!(card.timestamp_text, "Last update: 2025-08-25 10:00:00");
    }
}
