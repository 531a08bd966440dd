//! ---
//! pw_section: "03-configuration-logging"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Fixed-offset display clock for the dashboard header."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use chrono::{DateTime, FixedOffset, Utc};

/// Header clock pinned to UTC+05:30 regardless of the host timezone, so
/// operators everywhere read the same wall time as the plant sites.
#[derive(Debug, Clone, Copy)]
pub struct DisplayClock {
    offset: FixedOffset,
}

impl Default for DisplayClock {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayClock {
    pub fn new() -> Self {
        Self {
            offset: FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("valid display offset"),
        }
    }

    /// `HH:MM:SS`, 24-hour, at the pinned offset.
    pub fn time_text(&self, now: DateTime<Utc>) -> String {
        now.with_timezone(&self.offset).format("%H:%M:%S").to_string()
    }

    /// `YYYY-MM-DD` at the pinned offset.
    pub fn date_text(&self, now: DateTime<Utc>) -> String {
        now.with_timezone(&self.offset).format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn shifts_utc_by_five_thirty() {
        let clock = DisplayClock::new();
        let now = Utc.with_ymd_and_hms(2025, 8, 25, 10, 0, 0).unwrap();
        assert_eq!(clock.time_text(now), "15:30:00");
        assert_eq!(clock.date_text(now), "2025-08-25");
    }

    #[test]
    fn rolls_the_date_across_midnight() {
        let clock = DisplayClock::new();
        let now = Utc.with_ymd_and_hms(2025, 8, 25, 19, 45, 0).unwrap();
        assert_eq!(clock.time_text(now), "01:15:00");
        assert_eq!(clock.date_text(now), "2025-08-26");
    }
}
