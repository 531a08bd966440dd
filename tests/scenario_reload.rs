//! ---
//! pw_section: "07-testing-qa"
//! pw_subsection: "scenario-tests"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Plant detail scenario: patch polls, topology change, rebuild."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! Drives a plant view through the patch/reload cycle the way successive
//! polls would: steady counts patch in place, a standby change freezes the
//! screen until the rebuild, and the rebuild starts reconciliation over.

use serde_json::json;

use plantwatch_core::stats::PlantStatsView;
use plantwatch_core::view::UnitCardView;
use plantwatch_core::{Action, LiveIndicator, PlantSink, PlantViewState, UnitStatus};
use plantwatch_model::PlantSnapshot;

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

fn details(running: u32, standby: u32) -> PlantSnapshot {
    let payload = json!({
        "total_power": 5000,
        "online_units": running,
        "offline_units": 1,
        "standby_units": standby,
        "running_units": running,
        "units": [
            {"unit_id": 1, "online": true, "voltage_avg": 230.5,
             "current_avg": 12.0, "power": 2500,
             "timestamp": "2025-08-25 10:00:00"},
            {"unit_id": 2, "online": false, "voltage_avg": 0,
             "current_avg": 0, "power": 0, "timestamp": ""}
        ]
    });
    let (snapshot, issues) = PlantSnapshot::from_value(payload).expect("valid payload");
    assert!(issues.is_empty());
    snapshot
}

#[test]
fn steady_counts_patch_cards_in_place() {
    let mut state = PlantViewState::new(1);
    let mut sink = RecordingPlantSink::default();

    assert_eq!(state.apply(details(5, 2), &mut sink), Action::Patch);
    assert_eq!(state.apply(details(5, 2), &mut sink), Action::Patch);

    assert_eq!(sink.stats.len(), 2);
    assert_eq!(sink.cards.len(), 4, "two cards per successful poll");
    assert_eq!(sink.stats[0].total_power_text, "5.00 MW");

    let online_card = &sink.cards[0];
    assert_eq!(online_card.status, UnitStatus::Online);
    assert_eq!(online_card.voltage_text, "230.5");
    assert_eq!(online_card.timestamp_text, "Last update: 2025-08-25 10:00:00");

    let offline_card = &sink.cards[1];
    assert_eq!(offline_card.status, UnitStatus::Offline);
    assert_eq!(offline_card.power_text, "---");
    assert!(offline_card.gauges.iter().all(|gauge| gauge.value == 0.0));
}

#[test]
fn standby_count_change_reloads_without_touching_the_screen() {
    let mut state = PlantViewState::new(1);
    let mut sink = RecordingPlantSink::default();
    state.apply(details(5, 2), &mut sink);
    let delivered = (sink.stats.len(), sink.cards.len(), sink.live.len());

    assert_eq!(state.apply(details(5, 3), &mut sink), Action::Reload);
    assert_eq!(
        (sink.stats.len(), sink.cards.len(), sink.live.len()),
        delivered,
        "a reload poll must not repaint anything"
    );
}

#[test]
fn rebuild_then_refetch_patches_with_the_new_topology() {
    let mut state = PlantViewState::new(1);
    let mut sink = RecordingPlantSink::default();
    state.apply(details(5, 2), &mut sink);
    assert_eq!(state.apply(details(5, 3), &mut sink), Action::Reload);

    // reload delay elapses, the view is torn down and re-polled
    state.rebuild();
    assert!(state.last().is_none());
    assert_eq!(state.apply(details(5, 3), &mut sink), Action::Patch);
    assert_eq!(state.apply(details(5, 3), &mut sink), Action::Patch);
}

#[test]
fn running_count_change_also_reloads() {
    let mut state = PlantViewState::new(1);
    let mut sink = RecordingPlantSink::default();
    state.apply(details(5, 2), &mut sink);
    assert_eq!(state.apply(details(6, 2), &mut sink), Action::Reload);
}
