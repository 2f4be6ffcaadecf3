use fw_core::{FarmId, PersonId};
use fw_simulation::{DayReport, Simulation};
use fw_view::{Camera, LevelRequest, LevelTransition, Marker, Viewport, WorldLayout, pick_nearest};

use crate::config::{SessionConfig, ViewSettings};
use crate::error::SessionResult;
use crate::input::Command;
use crate::render::Overlay;

/// What the user has clicked on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A simulated farm.
    Farm(FarmId),
    /// A simulated person.
    Person(PersonId),
    /// A static level marker.
    Marker {
        /// Level the marker belongs to.
        level: String,
        /// Marker id.
        id: String,
    },
}

/// All state of one interactive session: the simulation, the level
/// transition, the camera, and what is selected.
#[derive(Debug)]
pub struct Session {
    simulation: Simulation,
    transition: LevelTransition,
    camera: Camera,
    layout: WorldLayout,
    view: ViewSettings,
    viewport: Viewport,
    selection: Option<Selection>,
    overlay: Overlay,
}

impl Session {
    /// Validate the config, generate a world, and start a session on it.
    pub fn new(config: &SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        let simulation =
            Simulation::generate(&config.world, config.eras.clone(), &config.sim_config())?;
        Self::with_simulation(simulation, config)
    }

    /// Start a session around an existing simulation.
    pub fn with_simulation(simulation: Simulation, config: &SessionConfig) -> SessionResult<Self> {
        config.camera.validate()?;
        let transition = LevelTransition::new(config.levels.clone(), config.view.ease_speed)?;
        tracing::info!(
            date = %simulation.current_date(),
            era = %simulation.current_era().id,
            level = %transition.current_level().id,
            "session started"
        );
        Ok(Self {
            simulation,
            transition,
            camera: Camera::new(config.camera),
            layout: WorldLayout::standard(),
            view: config.view,
            viewport: Viewport::default(),
            selection: None,
            overlay: Overlay::None,
        })
    }

    /// Replace the level layout.
    pub fn with_layout(mut self, layout: WorldLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the viewport size.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Apply a view or simulation command. Play controls belong to the
    /// scheduler and are ignored here. Returns whether anything changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::SelectLevel(index) => self.request_level(index),
            Command::LevelCloser => self.transition.step_toward_house(),
            Command::LevelFarther => self.transition.step_toward_world(),
            Command::CenterCamera => {
                self.camera.center();
                true
            }
            Command::ClearSelection => self.selection.take().is_some(),
            Command::StepDay => {
                self.advance_day();
                true
            }
            Command::CycleOverlay => {
                self.overlay = self.overlay.next();
                true
            }
            Command::SetOverlay(overlay) => {
                let changed = self.overlay != overlay;
                self.overlay = overlay;
                changed
            }
            Command::Zoom(delta_y) => {
                let before = self.camera.user_zoom();
                self.camera.apply_wheel(delta_y);
                self.camera.user_zoom() != before
            }
            Command::Pan(dx, dy) => {
                self.drag(dx, dy);
                true
            }
            Command::Pick(x, y) => {
                self.click(x, y);
                true
            }
            Command::Resize(width, height) => {
                self.viewport = Viewport::new(width, height);
                true
            }
            Command::TogglePlay | Command::ToggleFast => false,
        }
    }

    /// Move the calendar one day and simulate it.
    pub fn advance_day(&mut self) -> DayReport {
        self.simulation.advance_day()
    }

    /// Advance the level transition and camera smoothing by `dt` seconds.
    pub fn step_view(&mut self, dt: f64) {
        self.transition.step(dt);
        self.camera.step(dt);
    }

    /// Request a level by index or id.
    pub fn request_level<'r>(&mut self, request: impl Into<LevelRequest<'r>>) -> bool {
        self.transition.request_level(request)
    }

    /// Drag the map: the world follows the pointer, so the camera target
    /// moves opposite to the drag.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        let scale = self.level_scale();
        self.camera.pan(-dx, -dy, scale, self.viewport.width);
    }

    /// Pick at a screen position and make the result the selection.
    ///
    /// Clicking a farm also sends the camera toward it.
    pub fn click(&mut self, sx: f64, sy: f64) -> Option<&Selection> {
        let (wx, wy) = self.screen_to_world(sx, sy);
        let picked = self.pick_at(wx, wy);
        if let Some(Selection::Farm(id)) = &picked
            && let Some(farm) = self.simulation.world().farm(*id)
        {
            self.camera.focus_on(farm.x, farm.y);
        }
        tracing::debug!(wx, wy, selection = ?picked, "click");
        self.selection = picked;
        self.selection.as_ref()
    }

    /// What a click at a world position would select, without selecting it.
    ///
    /// Farms win first, then persons (closest level only, located at their
    /// farm), then markers. Persons and markers follow the target level, so
    /// a click during a transition lands on what the view is heading to.
    pub fn pick_at(&self, wx: f64, wy: f64) -> Option<Selection> {
        let world = self.simulation.world();
        if let Some(pick) = pick_nearest(world.farms(), wx, wy, self.view.farm_pick_radius, |f| {
            (f.x, f.y)
        }) {
            return Some(Selection::Farm(pick.item.id()));
        }

        if self.transition.target_index() == 0 {
            let located = world.persons().iter().filter_map(|p| {
                let farm = world.farm(p.farm?)?;
                Some((p.id(), farm.x, farm.y))
            });
            if let Some(pick) =
                pick_nearest(located, wx, wy, self.view.person_pick_radius, |&(_, x, y)| (x, y))
            {
                return Some(Selection::Person(pick.item.0));
            }
        }

        let level = &self.transition.target_level().id;
        self.pick_entity(level, wx, wy).map(|marker| Selection::Marker {
            level: level.clone(),
            id: marker.id.clone(),
        })
    }

    /// Nearest marker of `level` within the configured pick radius.
    pub fn pick_entity(&self, level: &str, wx: f64, wy: f64) -> Option<&Marker> {
        self.layout.pick_entity(level, wx, wy, self.view.pick_radius)
    }

    /// Replace the selection.
    pub fn select(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    /// Show an overlay.
    pub fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
    }

    // -----------------------------------------------------------------------
    // Transform
    // -----------------------------------------------------------------------

    /// The scale the view is drawn at right now.
    pub fn level_scale(&self) -> f64 {
        self.transition.interpolated_scale()
    }

    /// The level label, including an arrow while transitioning.
    pub fn level_label(&self) -> String {
        self.transition.interpolated_name()
    }

    /// World coordinates to screen pixels at the current scale.
    pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
        self.camera
            .world_to_screen(wx, wy, self.level_scale(), self.viewport)
    }

    /// Screen pixels to world coordinates at the current scale.
    pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
        self.camera
            .screen_to_world(sx, sy, self.level_scale(), self.viewport)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The simulation.
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// The level transition.
    pub fn transition(&self) -> &LevelTransition {
        &self.transition
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The level layout.
    pub fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    /// The viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The current selection.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// The active overlay.
    pub fn overlay(&self) -> Overlay {
        self.overlay
    }
}
