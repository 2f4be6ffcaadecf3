use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::farm::Farm;
use crate::household::Household;
use crate::id::{FarmId, HouseholdId, PersonId};
use crate::person::Person;

/// Owns every farm, person, and household. Cross references between them
/// are ids resolved through the id-to-index maps kept here.
#[derive(Debug, Clone, Default)]
pub struct World {
    farms: Vec<Farm>,
    persons: Vec<Person>,
    households: Vec<Household>,

    // Indexes
    farm_index: HashMap<FarmId, usize>,
    person_index: HashMap<PersonId, usize>,
    household_index: HashMap<HouseholdId, usize>,
}

/// Mutable views of all three collections at once.
///
/// Slices cannot grow or shrink, so the world's indexes stay valid.
pub struct WorldPartsMut<'w> {
    /// All farms, in insertion order.
    pub farms: &'w mut [Farm],
    /// All persons, in insertion order.
    pub persons: &'w mut [Person],
    /// All households, in insertion order.
    pub households: &'w mut [Household],
}

/// Which persons work which farm, by position in the world's collections.
#[derive(Debug, Clone)]
pub struct Occupancy {
    by_farm: Vec<Vec<usize>>,
}

impl Occupancy {
    /// Person indices whose farm reference points at the farm at `farm_idx`.
    pub fn occupants(&self, farm_idx: usize) -> &[usize] {
        self.by_farm.get(farm_idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-displaced persons working the farm at `farm_idx`.
    pub fn active<'w>(
        &'w self,
        world: &'w World,
        farm_idx: usize,
    ) -> impl Iterator<Item = &'w Person> + 'w {
        self.occupants(farm_idx)
            .iter()
            .filter_map(|&idx| world.persons.get(idx))
            .filter(|p| !p.is_displaced())
    }
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Add a farm. Fails if its id is taken.
    pub fn add_farm(&mut self, farm: Farm) -> CoreResult<FarmId> {
        let id = farm.id();
        if self.farm_index.contains_key(&id) {
            return Err(CoreError::DuplicateFarm(id));
        }
        self.farm_index.insert(id, self.farms.len());
        self.farms.push(farm);
        Ok(id)
    }

    /// Add a person. Fails if its id is taken.
    pub fn add_person(&mut self, person: Person) -> CoreResult<PersonId> {
        let id = person.id();
        if self.person_index.contains_key(&id) {
            return Err(CoreError::DuplicatePerson(id));
        }
        self.person_index.insert(id, self.persons.len());
        self.persons.push(person);
        Ok(id)
    }

    /// Add a household. Fails if its id is taken.
    pub fn add_household(&mut self, household: Household) -> CoreResult<HouseholdId> {
        let id = household.id();
        if self.household_index.contains_key(&id) {
            return Err(CoreError::DuplicateHousehold(id));
        }
        self.household_index.insert(id, self.households.len());
        self.households.push(household);
        Ok(id)
    }

    /// The next unused household id.
    pub fn next_household_id(&self) -> HouseholdId {
        HouseholdId(self.household_index.keys().map(|id| id.0).max().unwrap_or(0) + 1)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Farm by id.
    pub fn farm(&self, id: FarmId) -> Option<&Farm> {
        self.farm_index.get(&id).map(|&i| &self.farms[i])
    }

    /// Mutable farm by id.
    pub fn farm_mut(&mut self, id: FarmId) -> Option<&mut Farm> {
        self.farm_index.get(&id).map(|&i| &mut self.farms[i])
    }

    /// Person by id.
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.person_index.get(&id).map(|&i| &self.persons[i])
    }

    /// Mutable person by id.
    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.person_index.get(&id).map(|&i| &mut self.persons[i])
    }

    /// Household by id.
    pub fn household(&self, id: HouseholdId) -> Option<&Household> {
        self.household_index.get(&id).map(|&i| &self.households[i])
    }

    /// Position of a farm in [`World::farms`].
    pub fn farm_position(&self, id: FarmId) -> Option<usize> {
        self.farm_index.get(&id).copied()
    }

    /// All farms in insertion order.
    pub fn farms(&self) -> &[Farm] {
        &self.farms
    }

    /// All farms, mutably.
    pub fn farms_mut(&mut self) -> &mut [Farm] {
        &mut self.farms
    }

    /// All persons in insertion order.
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    /// All persons, mutably.
    pub fn persons_mut(&mut self) -> &mut [Person] {
        &mut self.persons
    }

    /// All households in insertion order.
    pub fn households(&self) -> &[Household] {
        &self.households
    }

    /// All households, mutably.
    pub fn households_mut(&mut self) -> &mut [Household] {
        &mut self.households
    }

    /// Borrow all three collections mutably at once.
    pub fn parts_mut(&mut self) -> WorldPartsMut<'_> {
        WorldPartsMut {
            farms: &mut self.farms,
            persons: &mut self.persons,
            households: &mut self.households,
        }
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// Group persons by the farm they work. Persons with no farm, or whose
    /// farm id is unknown, belong to no group.
    pub fn occupancy(&self) -> Occupancy {
        let mut by_farm = vec![Vec::new(); self.farms.len()];
        for (person_idx, person) in self.persons.iter().enumerate() {
            if let Some(farm_idx) = person.farm.and_then(|id| self.farm_position(id)) {
                by_farm[farm_idx].push(person_idx);
            }
        }
        Occupancy { by_farm }
    }

    /// Famine risk of the farm a person works, or 0 when there is none.
    pub fn local_famine_risk(&self, person: &Person) -> f64 {
        person
            .farm
            .and_then(|id| self.farm(id))
            .map(Farm::famine_risk)
            .unwrap_or(0.0)
    }

    /// Number of displaced persons.
    pub fn displaced_count(&self) -> usize {
        self.persons.iter().filter(|p| p.is_displaced()).count()
    }

    /// Mean morale over all persons, or 0 for an empty world.
    pub fn average_morale(&self) -> f64 {
        let total: f64 = self.persons.iter().map(Person::morale).sum();
        total / self.persons.len().max(1) as f64
    }

    /// True if the world holds no entities at all.
    pub fn is_empty(&self) -> bool {
        self.farms.is_empty() && self.persons.is_empty() && self.households.is_empty()
    }
}
