use serde::Serialize;

/// Aggregate figures describing the most recently completed day.
///
/// `grain_requisitioned` and `farms_collectivized` are running totals over
/// the whole run; every other field is recomputed at the end of each day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationMetrics {
    /// Sum of realized yields across all farms for the day.
    pub total_grain_today: f64,
    /// Livestock proxy: total land area times 0.05.
    pub total_livestock_est: f64,
    /// Mean morale across all persons (0 when there are none).
    pub avg_morale: f64,
    /// Number of displaced persons.
    pub displaced_count: usize,
    /// Grain removed by requisitioning since the run began.
    pub grain_requisitioned: f64,
    /// Farms converted to collective ownership since the run began.
    pub farms_collectivized: u32,
}

/// Livestock estimated per unit of land area.
pub const LIVESTOCK_PER_LAND: f64 = 0.05;
