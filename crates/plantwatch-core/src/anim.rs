//! ---
//! pw_section: "01-core-functionality"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Deterministic count-up entrance animation stepper."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use std::time::Duration;

/// Nominal animation frame, ~60 fps.
pub const TICK: Duration = Duration::from_millis(16);

/// Entrance duration for the fleet total-power counter.
pub const FLEET_POWER_MS: u64 = 800;
/// Entrance duration for unit-count counters.
pub const COUNT_MS: u64 = 1200;
/// Entrance duration for the plant-view total-power counter.
pub const PLANT_POWER_MS: u64 = 1500;
/// Stagger between successive plant-button power animations.
pub const PLANT_STAGGER_MS: u64 = 100;

/// Linear count-up from a start value to a target, advanced one 16 ms tick
/// at a time by the caller's timer. Snaps exactly to the target when reached
/// or passed and never steps again, so the tick count is bounded by
/// `duration / 16 ms` (plus any stagger delay).
#[derive(Debug, Clone)]
pub struct CountUp {
    current: f64,
    end: f64,
    increment: f64,
    decimals: usize,
    delay_ticks: u32,
    finished: bool,
}

impl CountUp {
    /// Build a stepper interpolating `start..end` over `duration`.
    pub fn new(start: f64, end: f64, duration: Duration, decimals: usize) -> Self {
        let steps = (duration.as_millis() as f64 / TICK.as_millis() as f64).max(1.0);
        let increment = (end - start) / steps;
        Self {
            current: start,
            end,
            increment,
            decimals,
            delay_ticks: 0,
            finished: increment == 0.0,
        }
    }

    /// Delay the first step by a number of ticks (cascading plant buttons).
    pub fn with_delay_ticks(mut self, ticks: u32) -> Self {
        self.delay_ticks = ticks;
        self
    }

    /// Advance one tick and return the value to display.
    pub fn step(&mut self) -> f64 {
        if self.finished {
            return self.end;
        }
        if self.delay_ticks > 0 {
            self.delay_ticks -= 1;
            return self.current;
        }
        self.current += self.increment;
        let passed_end = (self.increment > 0.0 && self.current >= self.end)
            || (self.increment < 0.0 && self.current <= self.end);
        if passed_end {
            self.current = self.end;
            self.finished = true;
        }
        self.current
    }

    /// Current display value without advancing.
    pub fn value(&self) -> f64 {
        if self.finished {
            self.end
        } else {
            self.current
        }
    }

    /// Current display value formatted to the configured decimal count.
    pub fn value_text(&self) -> String {
        format!("{:.*}", self.decimals, self.value())
    }

    /// True once the target has been reached; the caller stops its timer.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminates_on_target_within_bounded_ticks() {
        let duration = Duration::from_millis(800);
        let mut anim = CountUp::new(0.0, 15.25, duration, 2);
        let max_ticks = (duration.as_millis() / TICK.as_millis()) as usize + 1;
        let mut ticks = 0;
        while !anim.is_finished() {
            anim.step();
            ticks += 1;
            assert!(ticks <= max_ticks, "animation ran past its budget");
        }
        assert_eq!(anim.value_text(), "15.25");
    }

    #[test]
    fn never_steps_past_the_target() {
        let mut anim = CountUp::new(0.0, 10.0, Duration::from_millis(160), 0);
        let mut previous = 0.0;
        while !anim.is_finished() {
            let value = anim.step();
            assert!(value >= previous, "monotonic toward the target");
            assert!(value <= 10.0, "no visible overshoot");
            previous = value;
        }
        // further steps are inert
        assert_eq!(anim.step(), 10.0);
        assert_eq!(anim.step(), 10.0);
    }

    #[test]
    fn counts_down_when_target_is_below_start() {
        let mut anim = CountUp::new(10.0, 2.0, Duration::from_millis(160), 0);
        while !anim.is_finished() {
            anim.step();
        }
        assert_eq!(anim.value(), 2.0);
    }

    #[test]
    fn zero_range_finishes_immediately() {
        let anim = CountUp::new(5.0, 5.0, Duration::from_millis(800), 1);
        assert!(anim.is_finished());
        assert_eq!(anim.value_text(), "5.0");
    }

    #[test]
    fn delay_holds_the_start_value() {
        let mut anim = CountUp::new(0.0, 8.0, Duration::from_millis(160), 0).with_delay_ticks(3);
        assert_eq!(anim.step(), 0.0);
        assert_eq!(anim.step(), 0.0);
        assert_eq!(anim.step(), 0.0);
        assert!(anim.step() > 0.0);
    }
}
