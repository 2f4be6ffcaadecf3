use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::FarmId;

/// Days of realized yield a farm remembers.
pub const YIELD_HISTORY_DAYS: usize = 365;

/// Share of each day's realized yield added to the farm's grain store.
const STORED_SHARE: f64 = 0.2;

/// Who owns and works a farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    /// Individually held land.
    Private,
    /// Land consolidated into a collective.
    Collective,
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private => write!(f, "private"),
            Self::Collective => write!(f, "collective"),
        }
    }
}

/// A farm: land, productivity, risk, and a rolling yield record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    id: FarmId,
    /// Display name.
    pub name: String,
    /// World-space x position.
    pub x: f64,
    /// World-space y position.
    pub y: f64,
    /// Who owns the land.
    pub ownership: Ownership,
    /// Cultivated area in hectares.
    pub land_area: f64,
    /// Yield per hectare before any modifiers.
    pub productivity_base: f64,
    /// Degree of mechanization; practically within `[0, 1]`.
    pub mechanization_level: f64,
    famine_risk: f64,
    /// Multiplier accumulated by policies for the current day only.
    pub daily_yield_modifier: f64,
    yield_history: VecDeque<f64>,
    /// Grain kept in store.
    pub stored_grain: f64,
}

impl Farm {
    /// Create a private farm with the default starting state.
    pub fn new(id: FarmId, land_area: f64) -> Self {
        Self {
            id,
            name: format!("Farm {id}"),
            x: 0.0,
            y: 0.0,
            ownership: Ownership::Private,
            land_area,
            productivity_base: 1.0,
            mechanization_level: 0.05,
            famine_risk: 0.05,
            daily_yield_modifier: 1.0,
            yield_history: VecDeque::with_capacity(YIELD_HISTORY_DAYS),
            stored_grain: 20.0,
        }
    }

    /// Set the world-space position.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the ownership mode.
    pub fn with_ownership(mut self, ownership: Ownership) -> Self {
        self.ownership = ownership;
        self
    }

    /// Set the productivity base.
    pub fn with_productivity(mut self, productivity_base: f64) -> Self {
        self.productivity_base = productivity_base;
        self
    }

    /// Set the mechanization level (floored at 0).
    pub fn with_mechanization(mut self, level: f64) -> Self {
        self.mechanization_level = level.max(0.0);
        self
    }

    /// Set the famine risk (clamped to `[0, 1]`).
    pub fn with_famine_risk(mut self, risk: f64) -> Self {
        self.set_famine_risk(risk);
        self
    }

    /// Set the stored grain.
    pub fn with_stored_grain(mut self, grain: f64) -> Self {
        self.stored_grain = grain;
        self
    }

    /// The farm's identifier.
    pub fn id(&self) -> FarmId {
        self.id
    }

    /// Current famine risk in `[0, 1]`.
    pub fn famine_risk(&self) -> f64 {
        self.famine_risk
    }

    /// Set famine risk, clamped to `[0, 1]`.
    pub fn set_famine_risk(&mut self, risk: f64) {
        self.famine_risk = if risk.is_nan() { 0.0 } else { risk.clamp(0.0, 1.0) };
    }

    /// True for individually held farms.
    pub fn is_private(&self) -> bool {
        self.ownership == Ownership::Private
    }

    /// True for collective farms.
    pub fn is_collective(&self) -> bool {
        self.ownership == Ownership::Collective
    }

    /// Clear the per-day modifier. Runs before any policy each day.
    pub fn daily_reset(&mut self) {
        self.daily_yield_modifier = 1.0;
    }

    /// Consolidate into a collective. Productivity gains 5% of the average
    /// occupant skill, and mechanization is raised to at least 0.08.
    pub fn convert_to_collective(&mut self, average_skill: f64) {
        self.ownership = Ownership::Collective;
        self.productivity_base *= 1.0 + average_skill * 0.05;
        self.mechanization_level = self.mechanization_level.max(0.08);
    }

    /// Realize one day of yield, store a fifth of it, and record it.
    ///
    /// The labor factor saturates at 1.0 as soon as `labor_sum` reaches 1,
    /// so labor only matters for nearly empty farms.
    pub fn compute_daily_yield(&mut self, labor_sum: f64, morale_average: f64) -> f64 {
        let mut base = self.productivity_base * self.land_area;
        base *= 1.0 + self.mechanization_level * 0.5;
        base *= 0.7 + 0.3 * morale_average;
        base *= 0.5 + labor_sum / (2.0 * labor_sum.max(1.0));
        base *= self.daily_yield_modifier;
        let realized = base * (1.0 - self.famine_risk * 0.3);

        self.stored_grain += realized * STORED_SHARE;
        self.yield_history.push_back(realized);
        while self.yield_history.len() > YIELD_HISTORY_DAYS {
            self.yield_history.pop_front();
        }
        realized
    }

    /// Recorded yields, oldest first. At most [`YIELD_HISTORY_DAYS`] entries.
    pub fn yield_history(&self) -> &VecDeque<f64> {
        &self.yield_history
    }

    /// Most recent realized yield.
    pub fn last_yield(&self) -> Option<f64> {
        self.yield_history.back().copied()
    }

    /// Sum of the most recent 30 recorded yields.
    pub fn sum_last_30_day_yield(&self) -> f64 {
        self.yield_history.iter().rev().take(30).sum()
    }

    /// Legacy name for [`Farm::sum_last_30_day_yield`].
    ///
    /// Despite the name this returns the 30-day **sum**, not an average.
    pub fn avg_30_day_yield(&self) -> f64 {
        self.sum_last_30_day_yield()
    }

    /// Marker radius used by the map: grows with land area, capped at 35.
    pub fn marker_radius(&self) -> f64 {
        10.0 + (self.land_area / 30.0).min(25.0)
    }
}
