use fw_core::{Farm, FarmId, Household, Person, PersonId, World};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Sizes of a generated starting world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Number of private farms to create.
    pub farms: u32,
    /// Number of persons to create.
    pub persons: u32,
    /// Maximum members per household.
    pub household_size: usize,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            farms: 24,
            persons: 150,
            household_size: 5,
        }
    }
}

impl WorldGenConfig {
    /// Set the number of farms.
    pub fn with_farms(mut self, farms: u32) -> Self {
        self.farms = farms;
        self
    }

    /// Set the number of persons.
    pub fn with_persons(mut self, persons: u32) -> Self {
        self.persons = persons;
        self
    }

    /// Set the maximum household size.
    pub fn with_household_size(mut self, size: usize) -> Self {
        self.household_size = size;
        self
    }

    /// Check that the settings can produce a world.
    pub fn validate(&self) -> SimResult<()> {
        if self.household_size == 0 {
            return Err(SimError::InvalidWorldGen(
                "household_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Build a starting world: private farms scattered over the map, persons
/// assigned to random farms, and households filled in order.
///
/// The same RNG state always yields the same world.
pub fn generate_world<R: Rng>(config: &WorldGenConfig, rng: &mut R) -> SimResult<World> {
    config.validate()?;
    let mut world = World::new();

    let mut farm_ids = Vec::with_capacity(config.farms as usize);
    for n in 1..=config.farms {
        let farm = Farm::new(FarmId(n), rng.random_range(60.0..210.0))
            .with_position(rng.random_range(-700.0..700.0), rng.random_range(-500.0..500.0))
            .with_productivity(rng.random_range(0.8..1.2));
        farm_ids.push(world.add_farm(farm)?);
    }

    let mut household: Option<Household> = None;
    for n in 1..=config.persons {
        let mut person = Person::new(PersonId(n))
            .with_age(rng.random_range(18..48))
            .with_skill(rng.random_range(0.4..1.0))
            .with_morale(rng.random_range(0.6..0.9))
            .with_disposition(rng.random_range(0.3..0.7));
        if !farm_ids.is_empty() {
            person = person.on_farm(farm_ids[rng.random_range(0..farm_ids.len())]);
        }

        let mut current = match household.take() {
            Some(h) if h.members().len() < config.household_size => h,
            full => {
                if let Some(h) = full {
                    world.add_household(h)?;
                }
                Household::new(world.next_household_id())
            }
        };
        current.add_member(person.id());
        person = person.in_household(current.id());
        household = Some(current);

        world.add_person(person)?;
    }
    if let Some(h) = household {
        world.add_household(h)?;
    }

    tracing::debug!(
        farms = world.farms().len(),
        persons = world.persons().len(),
        households = world.households().len(),
        "generated world"
    );
    Ok(world)
}
