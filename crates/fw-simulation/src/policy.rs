use std::collections::HashMap;

use fw_core::FarmId;
use fw_core::world::Occupancy;

use crate::context::PolicyContext;
use crate::event::SimEventKind;

/// Ids of the built-in policies, as referenced from era tables.
pub mod ids {
    /// Slow organic growth of private farms.
    pub const BASELINE_AGRARIAN: &str = "baselineAgrarian";
    /// Revolutionary disruption of harvests and morale.
    pub const DISRUPTION: &str = "disruption";
    /// Requisitioning of stored grain.
    pub const EARLY_REQUISITION: &str = "earlyRequisition";
    /// Market incentives that lift yields and morale.
    pub const NEP_INCENTIVES: &str = "nepIncentives";
    /// Forced conversion of private farms to collectives.
    pub const COLLECTIVIZE: &str = "collectivize";
    /// Quota pressure on collective farms.
    pub const QUOTA_PRESSURE: &str = "quotaPressure";
    /// Mechanization of collective farms.
    pub const MECHANIZATION_PUSH: &str = "mechanizationPush";
}

/// First calendar year in which `collectivize` converts farms.
pub const COLLECTIVIZATION_START_YEAR: i32 = 1929;

/// A named effect applied to the world once per simulated day.
///
/// Policies run in the order the active era lists them, after farms are
/// reset and before yields are computed.
pub trait Policy: std::fmt::Debug {
    /// The id eras use to refer to this policy.
    fn id(&self) -> &str;

    /// Apply one day's worth of effect.
    fn apply_daily(&self, ctx: &mut PolicyContext<'_>);
}

/// Policies by id.
#[derive(Debug, Default)]
pub struct PolicyRegistry {
    policies: HashMap<String, Box<dyn Policy>>,
}

impl PolicyRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in policy.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(BaselineAgrarian);
        registry.register(Disruption);
        registry.register(EarlyRequisition);
        registry.register(NepIncentives);
        registry.register(Collectivize);
        registry.register(QuotaPressure);
        registry.register(MechanizationPush);
        registry
    }

    /// Register a policy, replacing any earlier one with the same id.
    pub fn register<P: Policy + 'static>(&mut self, policy: P) {
        self.policies
            .insert(policy.id().to_string(), Box::new(policy));
    }

    /// Look up a policy by id.
    pub fn get(&self, id: &str) -> Option<&dyn Policy> {
        self.policies.get(id).map(|policy| &**policy)
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.policies.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Apply the listed policies in order. Unknown ids are skipped.
    ///
    /// Returns the number of policies that ran.
    pub fn apply<S: AsRef<str>>(&self, ids: &[S], ctx: &mut PolicyContext<'_>) -> usize {
        let mut applied = 0;
        for id in ids {
            match self.get(id.as_ref()) {
                Some(policy) => {
                    policy.apply_daily(ctx);
                    applied += 1;
                }
                None => tracing::trace!(policy = id.as_ref(), "unknown policy skipped"),
            }
        }
        applied
    }
}

// ---------------------------------------------------------------------------
// Built-in policies
// ---------------------------------------------------------------------------

/// Private farms: productivity grows by 0.005 % per day.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineAgrarian;

impl Policy for BaselineAgrarian {
    fn id(&self) -> &str {
        ids::BASELINE_AGRARIAN
    }

    fn apply_daily(&self, ctx: &mut PolicyContext<'_>) {
        for farm in ctx.world.farms_mut().iter_mut().filter(|f| f.is_private()) {
            farm.productivity_base *= 1.00005;
        }
    }
}

/// All farms lose 10 % of the day's yield and gain famine risk; morale falls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disruption;

impl Policy for Disruption {
    fn id(&self) -> &str {
        ids::DISRUPTION
    }

    fn apply_daily(&self, ctx: &mut PolicyContext<'_>) {
        for farm in ctx.world.farms_mut() {
            farm.daily_yield_modifier *= 0.90;
            farm.set_famine_risk(farm.famine_risk() + 0.0002);
        }
        for person in ctx.world.persons_mut() {
            person.adjust_morale(-0.001);
        }
    }
}

/// Two percent of every farm's stored grain is taken each day.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarlyRequisition;

impl Policy for EarlyRequisition {
    fn id(&self) -> &str {
        ids::EARLY_REQUISITION
    }

    fn apply_daily(&self, ctx: &mut PolicyContext<'_>) {
        let mut taken_total = 0.0;
        for farm in ctx.world.farms_mut().iter_mut().filter(|f| f.stored_grain > 0.0) {
            let taken = farm.stored_grain * 0.02;
            farm.stored_grain -= taken;
            taken_total += taken;
        }
        ctx.metrics.grain_requisitioned += taken_total;
    }
}

/// All farms yield 8 % more and famine risk eases; morale rises.
#[derive(Debug, Clone, Copy, Default)]
pub struct NepIncentives;

impl Policy for NepIncentives {
    fn id(&self) -> &str {
        ids::NEP_INCENTIVES
    }

    fn apply_daily(&self, ctx: &mut PolicyContext<'_>) {
        for farm in ctx.world.farms_mut() {
            farm.daily_yield_modifier *= 1.08;
            farm.set_famine_risk(farm.famine_risk() * 0.95);
        }
        for person in ctx.world.persons_mut() {
            person.adjust_morale(0.002);
        }
    }
}

/// From 1929 on, converts one percent (rounded up) of the remaining private
/// farms per day, taking them in farm order. Morale falls every day the
/// policy is active, whether or not anything converts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Collectivize;

impl Collectivize {
    fn convert(
        ctx: &mut PolicyContext<'_>,
        occupancy: &Occupancy,
        farm_idx: usize,
        id: FarmId,
    ) {
        let (skill_sum, workers) = occupancy
            .active(ctx.world, farm_idx)
            .fold((0.0, 0usize), |(sum, n), p| (sum + p.labor_skill, n + 1));
        let average_skill = skill_sum / workers.max(1) as f64;

        let Some(farm) = ctx.world.farm_mut(id) else {
            return;
        };
        farm.convert_to_collective(average_skill);
        let description = format!("{} collectivized", farm.name);
        tracing::debug!(farm = %id, average_skill, "farm collectivized");

        ctx.metrics.farms_collectivized += 1;
        ctx.emit(SimEventKind::FarmCollectivized { farm: id }, description);
    }
}

impl Policy for Collectivize {
    fn id(&self) -> &str {
        ids::COLLECTIVIZE
    }

    fn apply_daily(&self, ctx: &mut PolicyContext<'_>) {
        if ctx.year() >= COLLECTIVIZATION_START_YEAR {
            let private: Vec<(usize, FarmId)> = ctx
                .world
                .farms()
                .iter()
                .enumerate()
                .filter(|(_, f)| f.is_private())
                .map(|(idx, f)| (idx, f.id()))
                .collect();
            let quota = private.len().div_ceil(100);
            let occupancy = ctx.world.occupancy();
            for (farm_idx, id) in private.into_iter().take(quota) {
                Self::convert(ctx, &occupancy, farm_idx, id);
            }
        }
        for person in ctx.world.persons_mut() {
            person.adjust_morale(-0.0015);
        }
    }
}

/// Collective farms yield 5 % more but famine risk creeps up to 0.5.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotaPressure;

impl Policy for QuotaPressure {
    fn id(&self) -> &str {
        ids::QUOTA_PRESSURE
    }

    fn apply_daily(&self, ctx: &mut PolicyContext<'_>) {
        for farm in ctx.world.farms_mut().iter_mut().filter(|f| f.is_collective()) {
            farm.daily_yield_modifier *= 1.05;
            farm.set_famine_risk((farm.famine_risk() + 0.0005).min(0.5));
        }
    }
}

/// Collective farms mechanize, grow more productive, and see famine risk ease.
#[derive(Debug, Clone, Copy, Default)]
pub struct MechanizationPush;

impl Policy for MechanizationPush {
    fn id(&self) -> &str {
        ids::MECHANIZATION_PUSH
    }

    fn apply_daily(&self, ctx: &mut PolicyContext<'_>) {
        for farm in ctx.world.farms_mut().iter_mut().filter(|f| f.is_collective()) {
            farm.mechanization_level += 0.0003;
            farm.productivity_base *= 1.0001;
            farm.set_famine_risk(farm.famine_risk() * 0.995);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventLog;
    use crate::metrics::SimulationMetrics;
    use fw_core::{Farm, Ownership, Person, PersonId, SimDate, World};

    struct Fixture {
        world: World,
        metrics: SimulationMetrics,
        events: EventLog,
    }

    impl Fixture {
        fn new(world: World) -> Self {
            Self {
                world,
                metrics: SimulationMetrics::default(),
                events: EventLog::new(0),
            }
        }

        fn run(&mut self, ids: &[&str], date: SimDate) -> usize {
            let mut ctx = PolicyContext {
                world: &mut self.world,
                date,
                metrics: &mut self.metrics,
                events: &mut self.events,
            };
            PolicyRegistry::standard().apply(ids, &mut ctx)
        }
    }

    fn farms(private: u32, collective: u32) -> World {
        let mut world = World::new();
        for i in 1..=private {
            world.add_farm(Farm::new(FarmId(i), 100.0)).unwrap();
        }
        for i in 1..=collective {
            world
                .add_farm(
                    Farm::new(FarmId(private + i), 100.0).with_ownership(Ownership::Collective),
                )
                .unwrap();
        }
        world
    }

    fn day_in(year: i32) -> SimDate {
        SimDate::from_ymd(year, 6, 1).unwrap()
    }

    #[test]
    fn standard_registry_has_all_policies() {
        let registry = PolicyRegistry::standard();
        assert_eq!(
            registry.ids(),
            vec![
                "baselineAgrarian",
                "collectivize",
                "disruption",
                "earlyRequisition",
                "mechanizationPush",
                "nepIncentives",
                "quotaPressure",
            ]
        );
    }

    #[test]
    fn unknown_ids_are_skipped() {
        let mut fx = Fixture::new(farms(1, 0));
        let applied = fx.run(&["noSuchPolicy", ids::BASELINE_AGRARIAN], day_in(1905));
        assert_eq!(applied, 1);
    }

    #[test]
    fn baseline_grows_private_only() {
        let mut fx = Fixture::new(farms(1, 1));
        fx.run(&[ids::BASELINE_AGRARIAN], day_in(1905));
        assert!((fx.world.farms()[0].productivity_base - 1.00005).abs() < 1e-12);
        assert_eq!(fx.world.farms()[1].productivity_base, 1.0);
    }

    #[test]
    fn disruption_caps_famine_risk_and_lowers_morale() {
        let mut world = farms(0, 0);
        world
            .add_farm(Farm::new(FarmId(1), 10.0).with_famine_risk(0.99995))
            .unwrap();
        world
            .add_person(Person::new(PersonId(1)).with_morale(0.0005))
            .unwrap();
        let mut fx = Fixture::new(world);
        fx.run(&[ids::DISRUPTION], day_in(1918));

        let farm = &fx.world.farms()[0];
        assert!((farm.daily_yield_modifier - 0.9).abs() < 1e-12);
        assert_eq!(farm.famine_risk(), 1.0);
        assert_eq!(fx.world.persons()[0].morale(), 0.0);
    }

    #[test]
    fn requisition_accumulates() {
        let mut world = farms(2, 0);
        world.farm_mut(FarmId(2)).unwrap().stored_grain = 0.0;
        let mut fx = Fixture::new(world);
        fx.run(&[ids::EARLY_REQUISITION], day_in(1918));
        fx.run(&[ids::EARLY_REQUISITION], day_in(1918));

        assert!((fx.world.farms()[0].stored_grain - 20.0 * 0.98 * 0.98).abs() < 1e-9);
        assert_eq!(fx.world.farms()[1].stored_grain, 0.0);
        let expected = 20.0 * 0.02 + 20.0 * 0.98 * 0.02;
        assert!((fx.metrics.grain_requisitioned - expected).abs() < 1e-9);
    }

    #[test]
    fn nep_lifts_modifier_and_morale() {
        let mut world = farms(1, 0);
        world
            .add_person(Person::new(PersonId(1)).with_morale(0.5))
            .unwrap();
        let mut fx = Fixture::new(world);
        fx.run(&[ids::NEP_INCENTIVES], day_in(1923));

        let farm = &fx.world.farms()[0];
        assert!((farm.daily_yield_modifier - 1.08).abs() < 1e-12);
        assert!((farm.famine_risk() - 0.05 * 0.95).abs() < 1e-12);
        assert!((fx.world.persons()[0].morale() - 0.502).abs() < 1e-12);
    }

    #[test]
    fn collectivize_waits_for_1929() {
        let mut fx = Fixture::new(farms(5, 0));
        fx.run(&[ids::COLLECTIVIZE], day_in(1928));
        assert!(fx.world.farms().iter().all(Farm::is_private));
        assert_eq!(fx.metrics.farms_collectivized, 0);
    }

    #[test]
    fn collectivize_converts_first_private_farm() {
        let mut world = farms(3, 0);
        world
            .add_person(
                Person::new(PersonId(1))
                    .with_skill(0.6)
                    .with_morale(0.5)
                    .on_farm(FarmId(1)),
            )
            .unwrap();
        world
            .add_person(Person::new(PersonId(2)).with_skill(0.2).on_farm(FarmId(1)))
            .unwrap();
        let mut displaced = Person::new(PersonId(3)).with_skill(1.0).on_farm(FarmId(1));
        displaced.displace();
        world.add_person(displaced).unwrap();

        let mut fx = Fixture::new(world);
        fx.run(&[ids::COLLECTIVIZE], day_in(1929));

        let farm = fx.world.farm(FarmId(1)).unwrap();
        assert!(farm.is_collective());
        assert!((farm.productivity_base - (1.0 + 0.4 * 0.05)).abs() < 1e-12);
        assert_eq!(farm.mechanization_level, 0.08);
        assert!(fx.world.farm(FarmId(2)).unwrap().is_private());
        assert_eq!(fx.metrics.farms_collectivized, 1);
        assert_eq!(fx.events.events_for_farm(FarmId(1)).len(), 1);
        assert!((fx.world.persons()[0].morale() - 0.4985).abs() < 1e-12);
    }

    #[test]
    fn collectivize_averages_skill_of_the_converted_farm() {
        let mut world = World::new();
        world
            .add_farm(Farm::new(FarmId(1), 100.0).with_ownership(Ownership::Collective))
            .unwrap();
        world.add_farm(Farm::new(FarmId(2), 100.0)).unwrap();
        world
            .add_person(Person::new(PersonId(1)).with_skill(1.0).on_farm(FarmId(1)))
            .unwrap();
        world
            .add_person(Person::new(PersonId(2)).with_skill(0.2).on_farm(FarmId(2)))
            .unwrap();

        let mut fx = Fixture::new(world);
        fx.run(&[ids::COLLECTIVIZE], day_in(1930));

        let farm = fx.world.farm(FarmId(2)).unwrap();
        assert!(farm.is_collective());
        assert!((farm.productivity_base - (1.0 + 0.2 * 0.05)).abs() < 1e-12);
    }

    #[test]
    fn collectivize_quota_rounds_up() {
        let mut fx = Fixture::new(farms(101, 0));
        fx.run(&[ids::COLLECTIVIZE], day_in(1930));
        assert_eq!(fx.metrics.farms_collectivized, 2);
        let collective: Vec<_> = fx
            .world
            .farms()
            .iter()
            .filter(|f| f.is_collective())
            .map(Farm::id)
            .collect();
        assert_eq!(collective, vec![FarmId(1), FarmId(2)]);
    }

    #[test]
    fn collectivize_lowers_morale_even_without_conversion() {
        let mut world = farms(0, 0);
        world
            .add_person(Person::new(PersonId(1)).with_morale(0.5))
            .unwrap();
        let mut fx = Fixture::new(world);
        fx.run(&[ids::COLLECTIVIZE], day_in(1928));
        assert!((fx.world.persons()[0].morale() - 0.4985).abs() < 1e-12);
    }

    #[test]
    fn quota_pressure_caps_at_half() {
        let mut world = farms(1, 1);
        world.farm_mut(FarmId(2)).unwrap().set_famine_risk(0.4999);
        let mut fx = Fixture::new(world);
        fx.run(&[ids::QUOTA_PRESSURE], day_in(1930));

        assert_eq!(fx.world.farms()[0].daily_yield_modifier, 1.0);
        let collective = &fx.world.farms()[1];
        assert!((collective.daily_yield_modifier - 1.05).abs() < 1e-12);
        assert_eq!(collective.famine_risk(), 0.5);
    }

    #[test]
    fn mechanization_push_targets_collectives() {
        let mut fx = Fixture::new(farms(1, 1));
        fx.run(&[ids::MECHANIZATION_PUSH], day_in(1935));

        assert_eq!(fx.world.farms()[0].mechanization_level, 0.05);
        let collective = &fx.world.farms()[1];
        assert!((collective.mechanization_level - 0.0503).abs() < 1e-12);
        assert!((collective.productivity_base - 1.0001).abs() < 1e-12);
        assert!((collective.famine_risk() - 0.05 * 0.995).abs() < 1e-12);
    }
}
