//! Derived render state: everything a frontend needs to draw one frame,
//! computed from a [`Session`] without touching any drawing API.

use std::fmt;

use fw_core::{Farm, FarmId, Ownership, Person, PersonId};
use fw_view::MarkerKind;
use serde::{Deserialize, Serialize};

use crate::session::{Selection, Session};

/// Fill colour of a private farm.
pub const PRIVATE_FARM_COLOR: u32 = 0x52C28D;
/// Fill colour of a collective farm.
pub const COLLECTIVE_FARM_COLOR: u32 = 0xC2527D;
/// Alpha of the farm fill.
pub const FARM_FILL_ALPHA: f64 = 0.85;
/// Colour of the famine-risk ring; its alpha is the farm's famine risk.
pub const FAMINE_RING_COLOR: u32 = 0xFFB400;
/// Colour of the selection ring.
pub const SELECTION_RING_COLOR: u32 = 0xFFFFFF;
/// Colour of a working person's dot.
pub const PERSON_COLOR: u32 = 0xDBE2E9;
/// Colour of a displaced person's dot.
pub const DISPLACED_PERSON_COLOR: u32 = 0xFFA500;
/// Person dots drawn per frame.
pub const MAX_PERSON_DOTS: usize = 120;
/// Overlay heat alpha at full intensity.
pub const HEAT_ALPHA: f64 = 0.25;
/// Heat circle radius relative to the farm marker.
pub const HEAT_RADIUS_FACTOR: f64 = 2.0;

/// A per-farm heat overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    /// No overlay.
    #[default]
    None,
    /// Last day's yield over 100.
    Grain,
    /// Mean morale of the farm's occupants.
    Morale,
    /// The farm's famine risk.
    FamineRisk,
}

impl Overlay {
    /// Every overlay in cycle order.
    pub const ALL: [Overlay; 4] = [Self::None, Self::Grain, Self::Morale, Self::FamineRisk];

    /// The overlay after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Grain,
            Self::Grain => Self::Morale,
            Self::Morale => Self::FamineRisk,
            Self::FamineRisk => Self::None,
        }
    }

    /// Heat colour, or `None` for [`Overlay::None`].
    pub fn color(self) -> Option<u32> {
        match self {
            Self::None => None,
            Self::Grain => Some(0x78DCFF),
            Self::Morale => Some(0x78FF78),
            Self::FamineRisk => Some(0xFF3C00),
        }
    }

    /// Intensity for one farm, clamped to `[0, 1]`.
    ///
    /// `workers` are the farm's active occupants; only morale reads them.
    pub fn value<'p>(
        self,
        farm: &Farm,
        workers: impl IntoIterator<Item = &'p Person>,
    ) -> Option<f64> {
        let raw = match self {
            Self::None => return None,
            Self::Grain => farm.last_yield().unwrap_or(0.0) / 100.0,
            Self::Morale => {
                let (sum, count) = workers
                    .into_iter()
                    .fold((0.0, 0usize), |(s, n), p| (s + p.morale(), n + 1));
                if count == 0 { 0.0 } else { sum / count as f64 }
            }
            Self::FamineRisk => farm.famine_risk(),
        };
        Some(if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) })
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Grain => write!(f, "grain"),
            Self::Morale => write!(f, "morale"),
            Self::FamineRisk => write!(f, "famine_risk"),
        }
    }
}

/// Overlay heat drawn under a farm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heat {
    /// RGB colour.
    pub color: u32,
    /// Alpha, `HEAT_ALPHA * value`.
    pub alpha: f64,
    /// Circle radius in pixels.
    pub radius: f64,
}

/// A farm as drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmMarker {
    /// Farm id.
    pub id: FarmId,
    /// Screen x.
    pub x: f64,
    /// Screen y.
    pub y: f64,
    /// Marker radius in pixels.
    pub radius: f64,
    /// Fill colour by ownership.
    pub color: u32,
    /// Alpha of the famine ring.
    pub famine_ring_alpha: f64,
    /// Whether the farm is selected.
    pub selected: bool,
    /// Overlay heat, if an overlay is active.
    pub heat: Option<Heat>,
}

/// A person dot, drawn at the person's farm.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonDot {
    /// Person id.
    pub id: PersonId,
    /// Screen x.
    pub x: f64,
    /// Screen y.
    pub y: f64,
    /// Colour by displacement.
    pub color: u32,
    /// Whether the person is selected.
    pub selected: bool,
}

/// A screen-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

/// A level marker as drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    /// Marker id.
    pub id: String,
    /// Label.
    pub name: String,
    /// Marker kind.
    pub kind: MarkerKind,
    /// Screen x.
    pub x: f64,
    /// Screen y.
    pub y: f64,
    /// Whether the marker is selected.
    pub selected: bool,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    /// Level label, with an arrow mid-transition.
    pub level_label: String,
    /// Interpolated level scale.
    pub scale: f64,
    /// User zoom.
    pub zoom: f64,
    /// Current level bounds on screen, if the layout has the level.
    pub bounds: Option<ScreenRect>,
    /// Farms in world order.
    pub farms: Vec<FarmMarker>,
    /// Person dots; only at the closest level.
    pub persons: Vec<PersonDot>,
    /// Markers of the current level.
    pub markers: Vec<MarkerView>,
    /// HUD text lines.
    pub hud: Vec<String>,
    /// Detail lines for the selection; empty when nothing is selected.
    pub details: Vec<String>,
}

impl RenderState {
    /// Derive the frame from the session's current state.
    pub fn capture(session: &Session) -> Self {
        let world = session.simulation().world();
        let selection = session.selection();
        let overlay = session.overlay();
        let occupancy = world.occupancy();

        let farms = world
            .farms()
            .iter()
            .enumerate()
            .map(|(idx, farm)| {
                let (x, y) = session.world_to_screen(farm.x, farm.y);
                let radius = farm.marker_radius();
                let heat = overlay
                    .color()
                    .zip(overlay.value(farm, occupancy.active(world, idx)))
                    .map(|(color, value)| Heat {
                        color,
                        alpha: HEAT_ALPHA * value,
                        radius: radius * HEAT_RADIUS_FACTOR,
                    });
                FarmMarker {
                    id: farm.id(),
                    x,
                    y,
                    radius,
                    color: match farm.ownership {
                        Ownership::Private => PRIVATE_FARM_COLOR,
                        Ownership::Collective => COLLECTIVE_FARM_COLOR,
                    },
                    famine_ring_alpha: farm.famine_risk(),
                    selected: selection == Some(&Selection::Farm(farm.id())),
                    heat,
                }
            })
            .collect();

        let persons = if session.transition().current_index() == 0 {
            world
                .persons()
                .iter()
                .take(MAX_PERSON_DOTS)
                .filter_map(|person| {
                    let farm = world.farm(person.farm?)?;
                    let (x, y) = session.world_to_screen(farm.x, farm.y);
                    Some(PersonDot {
                        id: person.id(),
                        x,
                        y,
                        color: if person.is_displaced() {
                            DISPLACED_PERSON_COLOR
                        } else {
                            PERSON_COLOR
                        },
                        selected: selection == Some(&Selection::Person(person.id())),
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        let level = &session.transition().current_level().id;
        let bounds = session.layout().level(level).map(|layout| {
            let b = layout.bounds;
            let (x0, y0) = session.world_to_screen(b.x, b.y);
            let (x1, y1) = session.world_to_screen(b.x + b.w, b.y + b.h);
            ScreenRect {
                x: x0,
                y: y0,
                w: x1 - x0,
                h: y1 - y0,
            }
        });
        let markers = session
            .layout()
            .markers(level)
            .iter()
            .map(|marker| {
                let (x, y) = session.world_to_screen(marker.x, marker.y);
                let selected = matches!(
                    selection,
                    Some(Selection::Marker { level: l, id }) if l == level && *id == marker.id
                );
                MarkerView {
                    id: marker.id.clone(),
                    name: marker.name.clone(),
                    kind: marker.kind,
                    x,
                    y,
                    selected,
                }
            })
            .collect();

        Self {
            level_label: session.level_label(),
            scale: session.level_scale(),
            zoom: session.camera().user_zoom(),
            bounds,
            farms,
            persons,
            markers,
            hud: hud_lines(session),
            details: selection_details(session),
        }
    }
}

/// HUD text: view state, era status, then the day's metrics.
pub fn hud_lines(session: &Session) -> Vec<String> {
    let sim = session.simulation();
    let clock = sim.clock();
    let metrics = sim.metrics();
    vec![
        session.level_label(),
        format!(
            "Scale: {:.3} | Zoom: {:.2}",
            session.level_scale(),
            session.camera().user_zoom()
        ),
        format!("Overlay: {}", session.overlay()),
        sim.current_era().name.clone(),
        sim.current_date().to_string(),
        format!("Era progress: {:.0}%", clock.era_progress() * 100.0),
        format!("Grain: {:.1}", metrics.total_grain_today),
        format!("Livestock: {:.0}", metrics.total_livestock_est),
        format!("Avg Morale: {:.2}", metrics.avg_morale),
        format!("Displaced: {}", metrics.displaced_count),
        format!("Collectivized: {}", metrics.farms_collectivized),
        format!("Req Grain: {:.1}", metrics.grain_requisitioned),
    ]
}

/// Detail lines for the current selection.
///
/// A selection whose entity no longer exists yields no lines.
pub fn selection_details(session: &Session) -> Vec<String> {
    let world = session.simulation().world();
    match session.selection() {
        None => Vec::new(),
        Some(Selection::Farm(id)) => world
            .farm(*id)
            .map(|farm| {
                vec![
                    format!("Farm {}", farm.id()),
                    farm.name.clone(),
                    format!("Mode: {}", farm.ownership),
                    format!("Area: {:.0} ha", farm.land_area),
                    format!("Mech: {:.2}", farm.mechanization_level),
                    format!("FamineRisk: {:.2}", farm.famine_risk()),
                    format!("Yield 30d: {:.1}", farm.sum_last_30_day_yield()),
                    format!("StoredGrain: {:.1}", farm.stored_grain),
                ]
            })
            .unwrap_or_default(),
        Some(Selection::Person(id)) => world
            .person(*id)
            .map(|person| {
                vec![
                    format!("Person {}", person.id()),
                    person.name.clone(),
                    format!("Age: {}", person.age),
                    format!("Morale: {:.2}", person.morale()),
                    format!("Health: {:.2}", person.health()),
                    format!("Skill: {:.2}", person.labor_skill),
                    format!(
                        "Displaced: {}",
                        if person.is_displaced() { "Yes" } else { "No" }
                    ),
                ]
            })
            .unwrap_or_default(),
        Some(Selection::Marker { level, id }) => session
            .layout()
            .markers(level)
            .iter()
            .find(|marker| marker.id == *id)
            .map(|marker| {
                vec![
                    marker.name.clone(),
                    format!("Kind: {}", marker.kind),
                    format!("Level: {level}"),
                ]
            })
            .unwrap_or_default(),
    }
}
