use serde::{Deserialize, Serialize};

use crate::id::{HouseholdId, PersonId};

/// Food eaten per member per day.
const CONSUMPTION_PER_MEMBER: f64 = 0.5;

/// A household sharing a food store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    id: HouseholdId,
    members: Vec<PersonId>,
    stored_food: f64,
}

impl Household {
    /// Create an empty household with the default food store of 40.
    pub fn new(id: HouseholdId) -> Self {
        Self {
            id,
            members: Vec::new(),
            stored_food: 40.0,
        }
    }

    /// Set the stored food (floored at 0).
    pub fn with_stored_food(mut self, food: f64) -> Self {
        self.stored_food = food.max(0.0);
        self
    }

    /// The household identifier.
    pub fn id(&self) -> HouseholdId {
        self.id
    }

    /// Member ids in join order.
    pub fn members(&self) -> &[PersonId] {
        &self.members
    }

    /// Add a member; duplicates are ignored.
    pub fn add_member(&mut self, person: PersonId) {
        if !self.members.contains(&person) {
            self.members.push(person);
        }
    }

    /// Stored food, never negative.
    pub fn stored_food(&self) -> f64 {
        self.stored_food
    }

    /// Eat one day's food. The store never drops below zero and running out
    /// has no further effect.
    pub fn daily_update(&mut self) {
        let consumption = self.members.len() as f64 * CONSUMPTION_PER_MEMBER;
        self.stored_food = (self.stored_food - consumption).max(0.0);
    }
}
