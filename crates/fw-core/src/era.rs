use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::SimDate;
use crate::error::{CoreError, CoreResult};

/// A named historical period with an inclusive date range and the ordered
/// list of policy ids that govern daily simulation during it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Era {
    /// Stable identifier, e.g. `"nep"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description shown next to the era name.
    #[serde(default)]
    pub description: String,
    /// First day of the era.
    pub start: SimDate,
    /// Last day of the era (inclusive).
    pub end: SimDate,
    /// Policy ids applied each day, in order.
    #[serde(default)]
    pub policies: Vec<String>,
}

impl Era {
    /// Create an era with no description and no policies.
    pub fn new(id: impl Into<String>, name: impl Into<String>, start: SimDate, end: SimDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            start,
            end,
            policies: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the ordered policy ids.
    pub fn with_policies<I, S>(mut self, policies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policies = policies.into_iter().map(Into::into).collect();
        self
    }

    /// True if `date` lies within `[start, end]`.
    pub fn contains(&self, date: SimDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Fraction of the era elapsed at `date`, clamped to `[0, 1]`.
    ///
    /// A single-day era reports 1.
    pub fn progress(&self, date: SimDate) -> f64 {
        let span = self.end.days_since(self.start);
        if span <= 0 {
            return 1.0;
        }
        let pos = date.days_since(self.start);
        (pos as f64 / span as f64).clamp(0.0, 1.0)
    }
}

/// First day of the standard era table.
pub const SOVIET_AGRARIAN_START: NaiveDate = ymd(1905, 1, 1);

const TSARIST: (NaiveDate, NaiveDate) = (SOVIET_AGRARIAN_START, ymd(1916, 12, 31));
const REVOLUTION: (NaiveDate, NaiveDate) = (ymd(1917, 1, 1), ymd(1921, 12, 31));
const NEP: (NaiveDate, NaiveDate) = (ymd(1922, 1, 1), ymd(1927, 12, 31));
const COLLECTIVIZATION: (NaiveDate, NaiveDate) = (ymd(1928, 1, 1), ymd(1933, 12, 31));
const POST_COLLECTIVIZATION: (NaiveDate, NaiveDate) = (ymd(1934, 1, 1), ymd(1940, 12, 31));

// Only used for const items, so a bad date fails the build.
const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date in era table"),
    }
}

/// The ordered, non-overlapping list of eras the simulation moves through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Era>", into = "Vec<Era>")]
pub struct EraTable {
    eras: Vec<Era>,
}

impl EraTable {
    /// Build a table, checking that it is non-empty, that every era starts on
    /// or before its end, and that eras are chronological without overlap.
    ///
    /// Gaps between eras are allowed; see [`EraTable::gaps`].
    pub fn new(eras: Vec<Era>) -> CoreResult<Self> {
        if eras.is_empty() {
            return Err(CoreError::EmptyEraTable);
        }
        for era in &eras {
            if era.end < era.start {
                return Err(CoreError::InvertedEra {
                    id: era.id.clone(),
                    start: era.start.to_string(),
                    end: era.end.to_string(),
                });
            }
        }
        for pair in eras.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(CoreError::EraOverlap {
                    previous: pair[0].id.clone(),
                    next: pair[1].id.clone(),
                });
            }
        }
        Ok(Self { eras })
    }

    /// The five agrarian eras from late tsarist rule to the eve of 1941.
    pub fn soviet_agrarian() -> Self {
        let era = |id: &str, name: &str, (start, end): (NaiveDate, NaiveDate)| {
            Era::new(id, name, SimDate::from(start), SimDate::from(end))
        };
        let eras = vec![
            era("tsarist", "Late Tsarist", TSARIST)
                .with_description("Private landholding, unrest emerging.")
                .with_policies(["baselineAgrarian"]),
            era("revolution", "Revolution & Turmoil", REVOLUTION)
                .with_description("Disruption & requisitions.")
                .with_policies(["disruption", "earlyRequisition"]),
            era("nep", "NEP", NEP)
                .with_description("Partial market incentives, recovery.")
                .with_policies(["nepIncentives"]),
            era("collectivization", "Collectivization", COLLECTIVIZATION)
                .with_description("Forced consolidation, quota pressure.")
                .with_policies(["collectivize", "quotaPressure"]),
            era("postCollectivization", "Post-Collectivization", POST_COLLECTIVIZATION)
                .with_description("Stabilization & mechanization push.")
                .with_policies(["mechanizationPush"]),
        ];
        Self { eras }
    }

    /// Index of the first era containing `date`.
    pub fn find(&self, date: SimDate) -> Option<usize> {
        self.eras.iter().position(|era| era.contains(date))
    }

    /// Index of the era with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.eras.iter().position(|era| era.id == id)
    }

    /// Era at `index`.
    pub fn get(&self, index: usize) -> Option<&Era> {
        self.eras.get(index)
    }

    /// All eras in chronological order.
    pub fn eras(&self) -> &[Era] {
        &self.eras
    }

    /// Number of eras.
    pub fn len(&self) -> usize {
        self.eras.len()
    }

    /// Always false for a constructed table; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.eras.is_empty()
    }

    /// True if some era contains `date`.
    pub fn covers(&self, date: SimDate) -> bool {
        self.find(date).is_some()
    }

    /// Uncovered stretches between consecutive eras, as inclusive
    /// `(first_day, last_day)` pairs.
    pub fn gaps(&self) -> Vec<(SimDate, SimDate)> {
        self.eras
            .windows(2)
            .filter(|pair| pair[1].start.days_since(pair[0].end) > 1)
            .map(|pair| (pair[0].end.add_days(1), pair[1].start.add_days(-1)))
            .collect()
    }
}

impl Default for EraTable {
    fn default() -> Self {
        Self::soviet_agrarian()
    }
}

impl TryFrom<Vec<Era>> for EraTable {
    type Error = CoreError;

    fn try_from(eras: Vec<Era>) -> Result<Self, Self::Error> {
        Self::new(eras)
    }
}

impl From<EraTable> for Vec<Era> {
    fn from(table: EraTable) -> Self {
        table.eras
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> SimDate {
        SimDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn default_table_is_contiguous() {
        let table = EraTable::soviet_agrarian();
        assert_eq!(table.len(), 5);
        assert!(table.gaps().is_empty());
        assert!(EraTable::new(table.eras().to_vec()).is_ok());
    }

    #[test]
    fn default_table_spans_1905_to_1940() {
        let table = EraTable::soviet_agrarian();
        let eras = table.eras();
        assert_eq!(eras[0].start, SimDate::from(SOVIET_AGRARIAN_START));
        assert_eq!(eras[0].start, date(1905, 1, 1));
        assert_eq!(eras[2].start, date(1922, 1, 1));
        assert_eq!(eras[4].end, date(1940, 12, 31));
    }

    #[test]
    fn find_resolves_boundaries() {
        let table = EraTable::soviet_agrarian();
        assert_eq!(table.find(date(1916, 12, 31)), Some(0));
        assert_eq!(table.find(date(1917, 1, 1)), Some(1));
        assert_eq!(table.find(date(1940, 12, 31)), Some(4));
        assert_eq!(table.find(date(1941, 1, 1)), None);
        assert_eq!(table.find(date(1904, 12, 31)), None);
    }

    #[test]
    fn revolution_policies_in_order() {
        let table = EraTable::soviet_agrarian();
        let era = table.get(table.position("revolution").unwrap()).unwrap();
        assert_eq!(era.policies, vec!["disruption", "earlyRequisition"]);
    }

    #[test]
    fn empty_table_rejected() {
        assert!(matches!(EraTable::new(Vec::new()), Err(CoreError::EmptyEraTable)));
    }

    #[test]
    fn overlapping_eras_rejected() {
        let eras = vec![
            Era::new("a", "A", date(1900, 1, 1), date(1905, 1, 1)),
            Era::new("b", "B", date(1905, 1, 1), date(1910, 1, 1)),
        ];
        assert!(matches!(EraTable::new(eras), Err(CoreError::EraOverlap { .. })));
    }

    #[test]
    fn inverted_era_rejected() {
        let eras = vec![Era::new("a", "A", date(1910, 1, 1), date(1900, 1, 1))];
        assert!(matches!(EraTable::new(eras), Err(CoreError::InvertedEra { .. })));
    }

    #[test]
    fn gaps_are_reported() {
        let eras = vec![
            Era::new("a", "A", date(1900, 1, 1), date(1900, 12, 31)),
            Era::new("b", "B", date(1902, 1, 1), date(1902, 12, 31)),
        ];
        let table = EraTable::new(eras).unwrap();
        assert_eq!(table.gaps(), vec![(date(1901, 1, 1), date(1901, 12, 31))]);
        assert!(!table.covers(date(1901, 6, 1)));
    }

    #[test]
    fn progress_is_clamped() {
        let era = Era::new("a", "A", date(1900, 1, 1), date(1900, 1, 11));
        assert_eq!(era.progress(date(1899, 1, 1)), 0.0);
        assert!((era.progress(date(1900, 1, 6)) - 0.5).abs() < 1e-12);
        assert_eq!(era.progress(date(1901, 1, 1)), 1.0);
    }

    #[test]
    fn single_day_era_progress_is_complete() {
        let day = date(1900, 1, 1);
        assert_eq!(Era::new("a", "A", day, day).progress(day), 1.0);
    }
}
