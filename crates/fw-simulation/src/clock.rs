use fw_core::{Era, EraTable, SimDate};

use crate::error::{SimError, SimResult};

/// What happened to the active era when the calendar moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraResolution {
    /// The date is still inside the current era.
    Unchanged,
    /// The date moved into the era at this table index.
    Entered(usize),
    /// No era contains the date; the previous era stays current.
    Uncovered,
}

/// Walks the calendar forward and tracks which era is current.
#[derive(Debug, Clone)]
pub struct TimeController {
    eras: EraTable,
    current: SimDate,
    era_index: usize,
    tick_days: i32,
    days_elapsed: u64,
}

impl TimeController {
    /// Start at `start`, which must lie inside some era of `eras`.
    pub fn new(eras: EraTable, start: SimDate, tick_days: i32) -> SimResult<Self> {
        if eras.is_empty() {
            return Err(SimError::EmptyEraTable);
        }
        if tick_days < 1 {
            return Err(SimError::InvalidTickDays(tick_days));
        }
        let era_index = eras.find(start).ok_or(SimError::StartNotCovered(start))?;
        Ok(Self {
            eras,
            current: start,
            era_index,
            tick_days,
            days_elapsed: 0,
        })
    }

    /// Move the date forward by one tick and re-resolve the active era.
    ///
    /// Leaving the era table is logged once, on the first uncovered day.
    pub fn advance_one_day(&mut self) -> EraResolution {
        let was_covered = self.is_covered();
        self.current = self.current.add_days(self.tick_days);
        self.days_elapsed += 1;

        match self.eras.find(self.current) {
            Some(index) if index == self.era_index => EraResolution::Unchanged,
            Some(index) => {
                self.era_index = index;
                tracing::info!(
                    date = %self.current,
                    era = %self.current_era().id,
                    "entered era {}",
                    self.current_era().name
                );
                EraResolution::Entered(index)
            }
            None => {
                if was_covered {
                    tracing::warn!(
                        date = %self.current,
                        era = %self.current_era().id,
                        "date is outside every era; keeping the last known era"
                    );
                }
                EraResolution::Uncovered
            }
        }
    }

    /// The current calendar date.
    pub fn current_date(&self) -> SimDate {
        self.current
    }

    /// The active era.
    pub fn current_era(&self) -> &Era {
        // era_index always comes from a successful lookup in the same table
        &self.eras.eras()[self.era_index]
    }

    /// Index of the active era in the table.
    pub fn era_index(&self) -> usize {
        self.era_index
    }

    /// Fraction of the active era that has elapsed, in `[0, 1]`.
    pub fn era_progress(&self) -> f64 {
        self.current_era().progress(self.current)
    }

    /// True if the current date lies inside the active era.
    pub fn is_covered(&self) -> bool {
        self.current_era().contains(self.current)
    }

    /// The era table being walked.
    pub fn eras(&self) -> &EraTable {
        &self.eras
    }

    /// Calendar days per tick.
    pub fn tick_days(&self) -> i32 {
        self.tick_days
    }

    /// Number of ticks taken since construction.
    pub fn days_elapsed(&self) -> u64 {
        self.days_elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fw_core::Era;

    fn standard() -> TimeController {
        TimeController::new(EraTable::soviet_agrarian(), SimDate::from_ymd(1905, 1, 1).unwrap(), 1).unwrap()
    }

    #[test]
    fn starts_in_first_era() {
        let clock = standard();
        assert_eq!(clock.era_index(), 0);
        assert_eq!(clock.current_era().id, "tsarist");
        assert_eq!(clock.era_progress(), 0.0);
    }

    #[test]
    fn revolution_begins_on_new_year_1917() {
        let mut clock = standard();
        for _ in 0..4382 {
            assert_ne!(clock.advance_one_day(), EraResolution::Entered(1));
        }
        assert_eq!(clock.current_date(), SimDate::from_ymd(1916, 12, 31).unwrap());
        assert_eq!(clock.current_era().id, "tsarist");

        assert_eq!(clock.advance_one_day(), EraResolution::Entered(1));
        assert_eq!(clock.current_date(), SimDate::from_ymd(1917, 1, 1).unwrap());
        assert_eq!(clock.current_era().id, "revolution");
        assert_eq!(clock.days_elapsed(), 4383);
    }

    #[test]
    fn era_progress_midway() {
        let eras = EraTable::new(vec![Era::new(
            "a",
            "A",
            SimDate::from_ymd(1900, 1, 1).unwrap(),
            SimDate::from_ymd(1900, 1, 11).unwrap(),
        )])
        .unwrap();
        let mut clock = TimeController::new(eras, SimDate::from_ymd(1900, 1, 1).unwrap(), 1).unwrap();
        for _ in 0..5 {
            clock.advance_one_day();
        }
        assert!((clock.era_progress() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn gap_keeps_last_era() {
        let eras = EraTable::new(vec![
            Era::new("a", "A", SimDate::from_ymd(1900, 1, 1).unwrap(), SimDate::from_ymd(1900, 1, 2).unwrap()),
            Era::new("b", "B", SimDate::from_ymd(1900, 1, 5).unwrap(), SimDate::from_ymd(1900, 1, 9).unwrap()),
        ])
        .unwrap();
        let mut clock = TimeController::new(eras, SimDate::from_ymd(1900, 1, 1).unwrap(), 1).unwrap();
        assert_eq!(clock.advance_one_day(), EraResolution::Unchanged);
        assert_eq!(clock.advance_one_day(), EraResolution::Uncovered);
        assert_eq!(clock.current_era().id, "a");
        assert!(!clock.is_covered());
        assert_eq!(clock.era_progress(), 1.0);
        assert_eq!(clock.advance_one_day(), EraResolution::Uncovered);
        assert_eq!(clock.advance_one_day(), EraResolution::Entered(1));
        assert!(clock.is_covered());
    }

    #[test]
    fn past_the_last_era_stays_on_it() {
        let mut clock =
            TimeController::new(EraTable::soviet_agrarian(), SimDate::from_ymd(1940, 12, 31).unwrap(), 1)
                .unwrap();
        assert_eq!(clock.advance_one_day(), EraResolution::Uncovered);
        assert_eq!(clock.current_era().id, "postCollectivization");
    }

    #[test]
    fn weekly_ticks() {
        let mut clock =
            TimeController::new(EraTable::soviet_agrarian(), SimDate::from_ymd(1905, 1, 1).unwrap(), 7)
                .unwrap();
        clock.advance_one_day();
        assert_eq!(clock.current_date(), SimDate::from_ymd(1905, 1, 8).unwrap());
    }

    #[test]
    fn uncovered_start_is_a_configuration_error() {
        let err = TimeController::new(EraTable::soviet_agrarian(), SimDate::from_ymd(1800, 1, 1).unwrap(), 1)
            .unwrap_err();
        assert!(matches!(err, SimError::StartNotCovered(_)));
    }

    #[test]
    fn non_positive_tick_rejected() {
        let err = TimeController::new(EraTable::soviet_agrarian(), SimDate::from_ymd(1905, 1, 1).unwrap(), 0)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidTickDays(0)));
    }
}
