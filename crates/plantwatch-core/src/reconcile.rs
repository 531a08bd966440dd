//! ---
//! pw_section: "01-core-functionality"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Cross-poll change detection: patch in place or reload."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use std::time::Duration;

/// Delay before a reload is executed, letting in-flight visuals settle.
pub const RELOAD_DELAY: Duration = Duration::from_secs(5);

/// Outcome of comparing one poll against the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Counts unchanged: recolor/redraw the existing cards in place.
    Patch,
    /// Unit topology changed: rebuild the whole view after [`RELOAD_DELAY`]
    /// instead of patching. The unit grid is laid out once per build and
    /// never gains or loses cards incrementally.
    Reload,
}

/// Tracks the previous poll's running/standby counts for one plant view.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    previous_running: Option<u32>,
    previous_standby: Option<u32>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the current counts against the previous observation.
    ///
    /// The first observation always patches. Afterwards any difference in
    /// either count returns [`Action::Reload`] without updating the stored
    /// counts; the rebuild re-observes from scratch.
    pub fn observe(&mut self, running_units: u32, standby_units: u32) -> Action {
        if let (Some(previous_running), Some(previous_standby)) =
            (self.previous_running, self.previous_standby)
        {
            if previous_standby != standby_units || previous_running != running_units {
                return Action::Reload;
            }
        }
        self.previous_running = Some(running_units);
        self.previous_standby = Some(standby_units);
        Action::Patch
    }

    /// Forget the history, as a fresh page build would.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_patches() {
        let mut reconciler = Reconciler::new();
        assert_eq!(reconciler.observe(5, 2), Action::Patch);
    }

    #[test]
    fn identical_counts_keep_patching() {
        let mut reconciler = Reconciler::new();
        reconciler.observe(5, 2);
        assert_eq!(reconciler.observe(5, 2), Action::Patch);
        assert_eq!(reconciler.observe(5, 2), Action::Patch);
    }

    #[test]
    fn standby_change_triggers_reload_once() {
        let mut reconciler = Reconciler::new();
        reconciler.observe(5, 2);
        assert_eq!(reconciler.observe(5, 3), Action::Reload);
        // previous counts were not updated by the reload observation
        assert_eq!(reconciler.observe(5, 2), Action::Patch);
    }

    #[test]
    fn running_change_triggers_reload() {
        let mut reconciler = Reconciler::new();
        reconciler.observe(5, 2);
        assert_eq!(reconciler.observe(6, 2), Action::Reload);
    }

    #[test]
    fn reset_behaves_like_a_fresh_view() {
        let mut reconciler = Reconciler::new();
        reconciler.observe(5, 2);
        reconciler.reset();
        assert_eq!(reconciler.observe(9, 9), Action::Patch);
    }
}
