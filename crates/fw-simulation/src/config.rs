use fw_core::SimDate;
use fw_core::era::SOVIET_AGRARIAN_START;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// RNG seed for deterministic simulation.
    pub seed: u64,
    /// The calendar date the simulation begins on.
    pub start_date: SimDate,
    /// Days the calendar advances per simulated day.
    pub tick_days: i32,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_date: SOVIET_AGRARIAN_START.into(),
            tick_days: 1,
            max_events: 1000,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the calendar date the simulation begins on.
    pub fn with_start_date(mut self, date: SimDate) -> Self {
        self.start_date = date;
        self
    }

    /// Set the number of calendar days per simulated day.
    pub fn with_tick_days(mut self, days: i32) -> Self {
        self.tick_days = days;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.tick_days, 1);
        assert_eq!(config.max_events, 1000);
        assert_eq!(config.start_date.to_string(), "1905-01-01");
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_seed(123)
            .with_tick_days(7)
            .with_max_events(500)
            .with_start_date(SimDate::from_ymd(1929, 6, 1).unwrap());
        assert_eq!(config.seed, 123);
        assert_eq!(config.tick_days, 7);
        assert_eq!(config.max_events, 500);
        assert_eq!(config.start_date.year(), 1929);
    }
}
