use fw_core::{FarmId, PersonId, SimDate};

/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEventKind {
    /// The calendar moved into a new era.
    EraEntered {
        /// Id of the era that became current.
        era: String,
    },
    /// The calendar left the era table; the last era stays current.
    DateUncovered {
        /// Id of the era that remains current.
        era: String,
    },
    /// A private farm was converted to collective ownership.
    FarmCollectivized {
        /// The converted farm.
        farm: FarmId,
    },
    /// A person left their farm because of famine.
    PersonDisplaced {
        /// The displaced person.
        person: PersonId,
        /// The farm they worked, if any.
        farm: Option<FarmId>,
    },
}

impl SimEventKind {
    /// Check whether a given farm is involved in this event.
    pub fn involves_farm(&self, id: FarmId) -> bool {
        match self {
            Self::FarmCollectivized { farm } => *farm == id,
            Self::PersonDisplaced { farm, .. } => *farm == Some(id),
            Self::EraEntered { .. } | Self::DateUncovered { .. } => false,
        }
    }
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    /// The simulated date the event happened on.
    pub date: SimDate,
    /// The specific kind of event that occurred.
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SimEvent {
    /// Create a new simulation event with the given date, kind, and description.
    pub fn new(date: SimDate, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            date,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return all events that happened on the given date.
    pub fn events_on(&self, date: SimDate) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    /// Return all events involving the given farm.
    pub fn events_for_farm(&self, id: FarmId) -> Vec<&SimEvent> {
        self.events
            .iter()
            .filter(|e| e.kind.involves_farm(id))
            .collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: i32) -> SimDate {
        SimDate::from_ymd(1929, 1, 1).unwrap().add_days(n)
    }

    fn collectivized(n: i32, farm: u32) -> SimEvent {
        SimEvent::new(
            day(n),
            SimEventKind::FarmCollectivized { farm: FarmId(farm) },
            "test",
        )
    }

    #[test]
    fn event_log_push_and_query() {
        let mut log = EventLog::new(0);
        log.push(collectivized(1, 7));
        assert_eq!(log.len(), 1);
        assert_eq!(log.events_on(day(1)).len(), 1);
        assert_eq!(log.events_for_farm(FarmId(7)).len(), 1);
        assert!(log.events_for_farm(FarmId(8)).is_empty());
    }

    #[test]
    fn event_log_max_events_trims() {
        let mut log = EventLog::new(2);
        for i in 0..5 {
            log.push(collectivized(i, 1));
        }
        assert_eq!(log.len(), 2);
        // Oldest events were dropped, newest remain
        assert_eq!(log.events()[0].date, day(3));
        assert_eq!(log.events()[1].date, day(4));
    }

    #[test]
    fn event_kind_involvement() {
        let displaced = SimEventKind::PersonDisplaced {
            person: PersonId(3),
            farm: Some(FarmId(9)),
        };
        assert!(displaced.involves_farm(FarmId(9)));

        let landless = SimEventKind::PersonDisplaced {
            person: PersonId(3),
            farm: None,
        };
        assert!(!landless.involves_farm(FarmId(9)));

        let era = SimEventKind::EraEntered { era: "nep".into() };
        assert!(!era.involves_farm(FarmId(1)));
    }

    #[test]
    fn event_log_unlimited_capacity() {
        let mut log = EventLog::new(0);
        for i in 0..1000 {
            log.push(collectivized(i, 1));
        }
        assert_eq!(log.len(), 1000);
    }
}
