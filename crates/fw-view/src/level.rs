use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};

/// One zoom depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Stable identifier, e.g. `"village"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Base rendering scale; larger is closer.
    pub scale: f64,
}

impl Level {
    /// Create a level.
    pub fn new(id: impl Into<String>, name: impl Into<String>, scale: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scale,
        }
    }
}

/// Levels ordered from the closest zoom depth to the farthest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Level>", into = "Vec<Level>")]
pub struct LevelTable {
    levels: Vec<Level>,
}

impl LevelTable {
    /// Validate and wrap a list of levels.
    ///
    /// The list must be non-empty, ids must be unique, and every scale must
    /// be positive and finite.
    pub fn new(levels: Vec<Level>) -> ViewResult<Self> {
        if levels.is_empty() {
            return Err(ViewError::EmptyLevelTable);
        }
        let mut seen = HashSet::new();
        for level in &levels {
            if !(level.scale.is_finite() && level.scale > 0.0) {
                return Err(ViewError::InvalidScale {
                    id: level.id.clone(),
                    scale: level.scale,
                });
            }
            if !seen.insert(level.id.as_str()) {
                return Err(ViewError::DuplicateLevel(level.id.clone()));
            }
        }
        Ok(Self { levels })
    }

    /// House, district, village, state, country, world.
    pub fn standard() -> Self {
        Self {
            levels: vec![
                Level::new("house", "House", 1.2),
                Level::new("district", "District", 0.8),
                Level::new("village", "Village", 0.55),
                Level::new("state", "State", 0.35),
                Level::new("country", "Country", 0.2),
                Level::new("world", "World", 0.08),
            ],
        }
    }

    /// Level at `index`.
    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// Index of the level with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.id == id)
    }

    /// Level with the given id.
    pub fn by_id(&self, id: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// All levels, closest first.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a validated table.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<Level>> for LevelTable {
    type Error = ViewError;

    fn try_from(levels: Vec<Level>) -> ViewResult<Self> {
        Self::new(levels)
    }
}

impl From<LevelTable> for Vec<Level> {
    fn from(table: LevelTable) -> Self {
        table.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_order_and_scales() {
        let table = LevelTable::standard();
        let ids: Vec<&str> = table.levels().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(
            ids,
            ["house", "district", "village", "state", "country", "world"]
        );
        assert_eq!(table.by_id("house").unwrap().scale, 1.2);
        assert_eq!(table.by_id("world").unwrap().scale, 0.08);
        assert_eq!(table.position("state"), Some(3));
        assert_eq!(table.position("galaxy"), None);
    }

    #[test]
    fn empty_table_rejected() {
        assert!(matches!(
            LevelTable::new(Vec::new()),
            Err(ViewError::EmptyLevelTable)
        ));
    }

    #[test]
    fn bad_scale_rejected() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = LevelTable::new(vec![Level::new("a", "A", scale)]).unwrap_err();
            assert!(matches!(err, ViewError::InvalidScale { .. }));
        }
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = LevelTable::new(vec![Level::new("a", "A", 1.0), Level::new("a", "B", 0.5)])
            .unwrap_err();
        assert!(matches!(err, ViewError::DuplicateLevel(id) if id == "a"));
    }
}
