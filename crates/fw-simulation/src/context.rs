use fw_core::{SimDate, World};

use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::metrics::SimulationMetrics;

/// Mutable state a policy may touch while it runs.
pub struct PolicyContext<'a> {
    /// The entity collections.
    pub world: &'a mut World,
    /// The day being simulated.
    pub date: SimDate,
    /// Metrics, including the running totals policies contribute to.
    pub metrics: &'a mut SimulationMetrics,
    /// The event log.
    pub events: &'a mut EventLog,
}

impl PolicyContext<'_> {
    /// Emit a simulation event dated today.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events.push(SimEvent::new(self.date, kind, description));
    }

    /// The calendar year of the day being simulated.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}
