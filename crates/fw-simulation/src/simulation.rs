use fw_core::{Era, EraTable, FarmId, PersonId, SimDate, World};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clock::{EraResolution, TimeController};
use crate::config::SimConfig;
use crate::context::PolicyContext;
use crate::error::SimResult;
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::metrics::{LIVESTOCK_PER_LAND, SimulationMetrics};
use crate::policy::PolicyRegistry;
use crate::setup::{WorldGenConfig, generate_world};

/// What one call to [`Simulation::advance_day`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayReport {
    /// The date that was simulated.
    pub date: SimDate,
    /// How the active era changed when the calendar moved.
    pub era: EraResolution,
    /// Persons displaced during this day.
    pub newly_displaced: usize,
}

/// The top-level simulation orchestrator.
///
/// Owns the world, calendar, policy registry, RNG, metrics, and event log,
/// and drives the daily tick.
pub struct Simulation {
    world: World,
    clock: TimeController,
    policies: PolicyRegistry,
    rng: StdRng,
    metrics: SimulationMetrics,
    events: EventLog,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("date", &self.clock.current_date())
            .field("era", &self.clock.current_era().id)
            .field("farms", &self.world.farms().len())
            .field("persons", &self.world.persons().len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a simulation over an existing world with the built-in policies.
    pub fn new(world: World, eras: EraTable, config: &SimConfig) -> SimResult<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(world, eras, config, rng)
    }

    /// Generate a starting world from the config's seed and simulate it.
    ///
    /// World generation and the daily updates draw from the same RNG stream,
    /// so one seed reproduces the whole run.
    pub fn generate(
        world_gen: &WorldGenConfig,
        eras: EraTable,
        config: &SimConfig,
    ) -> SimResult<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let world = generate_world(world_gen, &mut rng)?;
        Self::with_rng(world, eras, config, rng)
    }

    fn with_rng(world: World, eras: EraTable, config: &SimConfig, rng: StdRng) -> SimResult<Self> {
        let clock = TimeController::new(eras, config.start_date, config.tick_days)?;
        let mut sim = Self {
            world,
            clock,
            policies: PolicyRegistry::standard(),
            rng,
            metrics: SimulationMetrics::default(),
            events: EventLog::new(config.max_events),
        };
        sim.refresh_metrics(0.0);
        Ok(sim)
    }

    /// Replace the policy registry.
    pub fn with_policies(mut self, policies: PolicyRegistry) -> Self {
        self.policies = policies;
        self
    }

    /// Move the calendar forward one tick, then simulate the new day under
    /// whichever era is current.
    pub fn advance_day(&mut self) -> DayReport {
        let was_covered = self.clock.is_covered();
        let displaced_before = self.world.displaced_count();

        let resolution = self.clock.advance_one_day();
        let date = self.clock.current_date();
        match resolution {
            EraResolution::Entered(_) => {
                let era = self.clock.current_era();
                let description = format!("{} begins", era.name);
                let kind = SimEventKind::EraEntered { era: era.id.clone() };
                self.events.push(SimEvent::new(date, kind, description));
            }
            EraResolution::Uncovered if was_covered => {
                let era = &self.clock.current_era().id;
                let description = format!("{date} lies outside every era; staying in {era}");
                let kind = SimEventKind::DateUncovered { era: era.clone() };
                self.events.push(SimEvent::new(date, kind, description));
            }
            _ => {}
        }

        let era = self.clock.current_era().clone();
        self.daily_tick(&era);

        DayReport {
            date,
            era: resolution,
            newly_displaced: self.world.displaced_count() - displaced_before,
        }
    }

    /// Advance `days` days.
    pub fn run(&mut self, days: u64) {
        for _ in 0..days {
            self.advance_day();
        }
    }

    /// Simulate one day under `era` without moving the calendar.
    ///
    /// Steps run strictly in order: reset farm modifiers, apply the era's
    /// policies, compute each farm's yield from its non-displaced occupants,
    /// update households, update persons, then refresh the metrics.
    pub fn daily_tick(&mut self, era: &Era) {
        let date = self.clock.current_date();

        for farm in self.world.farms_mut() {
            farm.daily_reset();
        }

        let mut ctx = PolicyContext {
            world: &mut self.world,
            date,
            metrics: &mut self.metrics,
            events: &mut self.events,
        };
        self.policies.apply(era.policies.as_slice(), &mut ctx);

        // Famine risk is fixed from here to the end of the day.
        let local_risk: Vec<f64> = self
            .world
            .persons()
            .iter()
            .map(|p| self.world.local_famine_risk(p))
            .collect();
        let occupancy = self.world.occupancy();
        let parts = self.world.parts_mut();

        let mut total_yield = 0.0;
        for (farm_idx, farm) in parts.farms.iter_mut().enumerate() {
            let (labor_sum, morale_sum, workers) = occupancy
                .occupants(farm_idx)
                .iter()
                .map(|&i| &parts.persons[i])
                .filter(|p| !p.is_displaced())
                .fold((0.0, 0.0, 0usize), |(labor, morale, n), p| {
                    (labor + p.effective_labor(), morale + p.morale(), n + 1)
                });
            total_yield += farm.compute_daily_yield(labor_sum, morale_sum / workers.max(1) as f64);
        }

        for household in parts.households.iter_mut() {
            household.daily_update();
        }

        let mut displaced: Vec<(PersonId, Option<FarmId>)> = Vec::new();
        for (person, risk) in parts.persons.iter_mut().zip(local_risk) {
            if person.daily_update(risk, &mut self.rng) {
                displaced.push((person.id(), person.farm));
            }
        }
        for (person, farm) in displaced {
            tracing::debug!(%person, farm = ?farm, "person displaced by famine");
            self.events.push(SimEvent::new(
                date,
                SimEventKind::PersonDisplaced { person, farm },
                format!("{person} displaced by famine"),
            ));
        }

        self.refresh_metrics(total_yield);
    }

    fn refresh_metrics(&mut self, total_yield: f64) {
        self.metrics.total_grain_today = total_yield;
        self.metrics.displaced_count = self.world.displaced_count();
        self.metrics.avg_morale = self.world.average_morale();
        self.metrics.total_livestock_est = self
            .world
            .farms()
            .iter()
            .map(|f| f.land_area * LIVESTOCK_PER_LAND)
            .sum();
    }

    /// Metrics for the most recently completed day.
    pub fn metrics(&self) -> &SimulationMetrics {
        &self.metrics
    }

    /// The entity collections.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The calendar.
    pub fn clock(&self) -> &TimeController {
        &self.clock
    }

    /// The current date.
    pub fn current_date(&self) -> SimDate {
        self.clock.current_date()
    }

    /// The active era.
    pub fn current_era(&self) -> &Era {
        self.clock.current_era()
    }

    /// The event log.
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}
