//! ---
//! pw_section: "06-terminal-dashboard"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Screen models behind the sink traits, with entrance animation."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! The terminal-side implementations of the view sinks. Each screen keeps the
//! last delivered view-models plus the count-up steppers that animate the
//! counters on first load; after the entrance has played, fresh polls write
//! straight through.

use plantwatch_core::anim::{
    CountUp, COUNT_MS, FLEET_POWER_MS, PLANT_POWER_MS, PLANT_STAGGER_MS, TICK,
};
use plantwatch_core::stats::{FleetStatsView, PlantStatsView};
use plantwatch_core::view::{PlantButtonView, UnitCardView};
use plantwatch_core::{ChartConfig, FleetSink, LiveIndicator, PlantSink};

use std::time::Duration;

fn leading_number(text: &str) -> f64 {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .unwrap_or(0.0)
}

fn count_up_to(end: f64, millis: u64, decimals: usize) -> CountUp {
    CountUp::new(0.0, end, Duration::from_millis(millis), decimals)
}

fn stagger_ticks(index: usize) -> u32 {
    (index as u64 * PLANT_STAGGER_MS / TICK.as_millis() as u64) as u32
}

/// Fleet overview: counters, one button per plant, live lamp.
pub struct FleetScreen {
    pub stats: Option<FleetStatsView>,
    pub buttons: Vec<PlantButtonView>,
    pub live: LiveIndicator,
    pub selected: usize,
    power_anim: Option<CountUp>,
    count_anims: [Option<CountUp>; 4],
    button_anims: Vec<CountUp>,
    entered: bool,
}

impl FleetScreen {
    pub fn new() -> Self {
        Self {
            stats: None,
            buttons: Vec::new(),
            live: LiveIndicator::Offline,
            selected: 0,
            power_anim: None,
            count_anims: [None, None, None, None],
            button_anims: Vec::new(),
            entered: false,
        }
    }

    /// Advance every running animation by one 16 ms frame.
    pub fn tick(&mut self) {
        if let Some(anim) = &mut self.power_anim {
            anim.step();
        }
        for anim in self.count_anims.iter_mut().flatten() {
            anim.step();
        }
        for anim in &mut self.button_anims {
            anim.step();
        }
    }

    pub fn power_text(&self) -> String {
        match (&self.power_anim, &self.stats) {
            (Some(anim), Some(_)) if !anim.is_finished() => {
                format!("{} MW", anim.value_text())
            }
            (_, Some(stats)) => stats.total_power_text.clone(),
            _ => "--".to_owned(),
        }
    }

    fn count_text(&self, slot: usize, target: impl Fn(&FleetStatsView) -> u32) -> String {
        match (&self.count_anims[slot], &self.stats) {
            (Some(anim), Some(_)) if !anim.is_finished() => anim.value_text(),
            (_, Some(stats)) => target(stats).to_string(),
            _ => "--".to_owned(),
        }
    }

    pub fn running_text(&self) -> String {
        self.count_text(0, |s| s.running_units)
    }

    pub fn standby_text(&self) -> String {
        self.count_text(1, |s| s.standby_units)
    }

    pub fn total_units_text(&self) -> String {
        self.count_text(2, |s| s.total_units)
    }

    pub fn active_plants_text(&self) -> String {
        self.count_text(3, |s| s.active_plants)
    }

    pub fn button_power_text(&self, index: usize) -> String {
        match (self.button_anims.get(index), self.buttons.get(index)) {
            (Some(anim), Some(_)) if !anim.is_finished() => {
                format!("{} kW", anim.value_text())
            }
            (_, Some(button)) => button.power_text.clone(),
            _ => String::new(),
        }
    }

    pub fn select_next(&mut self) {
        if !self.buttons.is_empty() && self.selected + 1 < self.buttons.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_plant(&self) -> Option<&PlantButtonView> {
        self.buttons.get(self.selected)
    }
}

impl FleetSink for FleetScreen {
    fn stats(&mut self, view: FleetStatsView) {
        if !self.entered {
            self.power_anim = Some(count_up_to(
                leading_number(&view.total_power_text),
                FLEET_POWER_MS,
                2,
            ));
            self.count_anims = [
                Some(count_up_to(view.running_units as f64, COUNT_MS, 0)),
                Some(count_up_to(view.standby_units as f64, COUNT_MS, 0)),
                Some(count_up_to(view.total_units as f64, COUNT_MS, 0)),
                Some(count_up_to(view.active_plants as f64, COUNT_MS, 0)),
            ];
            self.entered = true;
        }
        self.stats = Some(view);
    }

    fn plant_button(&mut self, view: PlantButtonView) {
        match self
            .buttons
            .iter()
            .position(|button| button.plant_id == view.plant_id)
        {
            Some(index) => self.buttons[index] = view,
            None => {
                let index = self.buttons.len();
                self.button_anims.push(
                    count_up_to(leading_number(&view.power_text), COUNT_MS, 1)
                        .with_delay_ticks(stagger_ticks(index)),
                );
                self.buttons.push(view);
            }
        }
    }

    fn live(&mut self, indicator: LiveIndicator) {
        self.live = indicator;
    }
}

/// Plant detail: counters, one card per unit, chart, live lamp.
pub struct PlantScreen {
    pub plant_id: u32,
    pub stats: Option<PlantStatsView>,
    pub cards: Vec<UnitCardView>,
    pub live: LiveIndicator,
    pub chart: Option<ChartConfig>,
    pub chart_error: bool,
    /// A topology change was seen; the rebuild is counting down.
    pub reload_pending: bool,
    power_anim: Option<CountUp>,
    count_anims: [Option<CountUp>; 4],
    entered: bool,
}

impl PlantScreen {
    pub fn new(plant_id: u32) -> Self {
        Self {
            plant_id,
            stats: None,
            cards: Vec::new(),
            live: LiveIndicator::Offline,
            chart: None,
            chart_error: false,
            reload_pending: false,
            power_anim: None,
            count_anims: [None, None, None, None],
            entered: false,
        }
    }

    /// Advance every running animation by one 16 ms frame.
    pub fn tick(&mut self) {
        if let Some(anim) = &mut self.power_anim {
            anim.step();
        }
        for anim in self.count_anims.iter_mut().flatten() {
            anim.step();
        }
    }

    pub fn power_text(&self) -> String {
        match (&self.power_anim, &self.stats) {
            (Some(anim), Some(_)) if !anim.is_finished() => {
                format!("{} MW", anim.value_text())
            }
            (_, Some(stats)) => stats.total_power_text.clone(),
            _ => "--".to_owned(),
        }
    }

    fn count_text(&self, slot: usize, target: impl Fn(&PlantStatsView) -> u32) -> String {
        match (&self.count_anims[slot], &self.stats) {
            (Some(anim), Some(_)) if !anim.is_finished() => anim.value_text(),
            (_, Some(stats)) => target(stats).to_string(),
            _ => "--".to_owned(),
        }
    }

    pub fn online_text(&self) -> String {
        self.count_text(0, |s| s.online_units)
    }

    pub fn offline_text(&self) -> String {
        self.count_text(1, |s| s.offline_units)
    }

    pub fn standby_text(&self) -> String {
        self.count_text(2, |s| s.standby_units)
    }

    pub fn running_text(&self) -> String {
        self.count_text(3, |s| s.running_units)
    }

    pub fn set_chart(&mut self, config: ChartConfig) {
        self.chart = Some(config);
        self.chart_error = false;
    }

    pub fn set_chart_error(&mut self) {
        self.chart_error = true;
    }

    pub fn begin_reload(&mut self) {
        self.reload_pending = true;
    }

    /// Forget everything, as a fresh page build would. The entrance
    /// animation replays on the next poll.
    pub fn reset(&mut self) {
        *self = Self::new(self.plant_id);
    }
}

impl PlantSink for PlantScreen {
    fn stats(&mut self, view: PlantStatsView) {
        if !self.entered {
            self.power_anim = Some(count_up_to(
                leading_number(&view.total_power_text),
                PLANT_POWER_MS,
                2,
            ));
            self.count_anims = [
                Some(count_up_to(view.online_units as f64, COUNT_MS, 0)),
                Some(count_up_to(view.offline_units as f64, COUNT_MS, 0)),
                Some(count_up_to(view.standby_units as f64, COUNT_MS, 0)),
                Some(count_up_to(view.running_units as f64, COUNT_MS, 0)),
            ];
            self.entered = true;
        }
        self.stats = Some(view);
    }

    fn unit_card(&mut self, view: UnitCardView) {
        match self
            .cards
            .iter()
            .position(|card| card.unit_id == view.unit_id)
        {
            Some(index) => self.cards[index] = view,
            None => self.cards.push(view),
        }
    }

    fn live(&mut self, indicator: LiveIndicator) {
        self.live = indicator;
    }
}
