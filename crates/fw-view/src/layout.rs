use serde::{Deserialize, Serialize};

use crate::pick::{Pick, pick_nearest};

/// An axis-aligned world-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Bounds {
    /// Create a rectangle.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// True if the point lies inside or on the edge.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }

    /// The center point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// What a level marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// A resident shown at house level.
    Person,
    /// A house shown at district level.
    House,
    /// A district shown at village level.
    District,
    /// A village shown at state level.
    Village,
    /// A state shown at country level.
    State,
    /// A country shown at world level.
    Country,
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Person => "person",
            Self::House => "house",
            Self::District => "district",
            Self::Village => "village",
            Self::State => "state",
            Self::Country => "country",
        };
        f.write_str(s)
    }
}

/// A named point of interest drawn at one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What the marker represents.
    pub kind: MarkerKind,
    /// World x.
    pub x: f64,
    /// World y.
    pub y: f64,
}

impl Marker {
    /// Create a marker.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: MarkerKind,
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            x,
            y,
        }
    }
}

/// Bounds and markers of one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Level id this layout belongs to.
    pub level: String,
    /// Extent of the level in world space.
    pub bounds: Bounds,
    /// Markers in pick order.
    pub markers: Vec<Marker>,
}

/// Static per-level content used for drawing outlines and picking markers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldLayout {
    levels: Vec<LevelLayout>,
}

impl WorldLayout {
    /// Wrap a list of level layouts.
    pub fn new(levels: Vec<LevelLayout>) -> Self {
        Self { levels }
    }

    /// One house with two residents, nested up to a single demo country.
    pub fn standard() -> Self {
        let single = |level: &str, bounds: Bounds, marker: Marker| LevelLayout {
            level: level.to_string(),
            bounds,
            markers: vec![marker],
        };
        Self::new(vec![
            LevelLayout {
                level: "house".into(),
                bounds: Bounds::new(-100.0, -60.0, 200.0, 120.0),
                markers: vec![
                    Marker::new("person_1", "Alice", MarkerKind::Person, -30.0, 0.0),
                    Marker::new("person_2", "Bob", MarkerKind::Person, 20.0, 10.0),
                ],
            },
            single(
                "district",
                Bounds::new(-800.0, -600.0, 1600.0, 1200.0),
                Marker::new("house_main", "Main House", MarkerKind::House, 0.0, 0.0),
            ),
            single(
                "village",
                Bounds::new(-1500.0, -1200.0, 3000.0, 2400.0),
                Marker::new(
                    "district_central",
                    "Central District",
                    MarkerKind::District,
                    0.0,
                    0.0,
                ),
            ),
            single(
                "state",
                Bounds::new(-3000.0, -2200.0, 6000.0, 4400.0),
                Marker::new("village_alpha", "Alpha Village", MarkerKind::Village, 0.0, 0.0),
            ),
            single(
                "country",
                Bounds::new(-4500.0, -3600.0, 9000.0, 7200.0),
                Marker::new("state_north", "North State", MarkerKind::State, 0.0, 0.0),
            ),
            single(
                "world",
                Bounds::new(-6000.0, -4800.0, 12000.0, 9600.0),
                Marker::new("country_demo", "Demo Country", MarkerKind::Country, 0.0, 0.0),
            ),
        ])
    }

    /// Layout for a level id.
    pub fn level(&self, id: &str) -> Option<&LevelLayout> {
        self.levels.iter().find(|l| l.level == id)
    }

    /// All level layouts.
    pub fn levels(&self) -> &[LevelLayout] {
        &self.levels
    }

    /// Markers drawn at a level; empty for unknown levels.
    pub fn markers(&self, level: &str) -> &[Marker] {
        self.level(level).map(|l| l.markers.as_slice()).unwrap_or(&[])
    }

    /// Nearest marker of `level` strictly within `radius` of the world point.
    pub fn pick_entity(&self, level: &str, x: f64, y: f64, radius: f64) -> Option<&Marker> {
        pick_nearest(self.markers(level), x, y, radius, |m| (m.x, m.y))
            .map(|Pick { item, .. }| item)
    }
}
