use std::path::Path;

use fw_core::{EraTable, SimDate};
use fw_simulation::{SimConfig, SimError, WorldGenConfig};
use fw_view::{CameraConfig, LevelTable};
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};
use crate::scheduler::SchedulerConfig;

/// Picking and level-transition settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Progress per second of a level transition.
    pub ease_speed: f64,
    /// Radius for picking level markers, in world units.
    pub pick_radius: f64,
    /// Radius for picking farms, in world units.
    pub farm_pick_radius: f64,
    /// Radius for picking persons around their farm, in world units.
    pub person_pick_radius: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            ease_speed: 4.0,
            pick_radius: 25.0,
            farm_pick_radius: 30.0,
            person_pick_radius: 18.0,
        }
    }
}

/// Everything needed to start a session, loadable from TOML.
///
/// Missing keys take their defaults, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed for world generation and daily updates.
    pub seed: u64,
    /// First simulated day (ISO `YYYY-MM-DD` string).
    pub start_date: SimDate,
    /// Calendar days per simulated day.
    pub tick_days: i32,
    /// Event log capacity (0 = unlimited).
    pub max_events: usize,
    /// Generated world sizes.
    pub world: WorldGenConfig,
    /// Camera smoothing and zoom band.
    pub camera: CameraConfig,
    /// Picking radii and transition speed.
    pub view: ViewSettings,
    /// Frame pacing.
    pub scheduler: SchedulerConfig,
    /// Zoom depths, closest first.
    pub levels: LevelTable,
    /// Historical eras in date order.
    pub eras: EraTable,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let sim = SimConfig::default();
        Self {
            seed: sim.seed,
            start_date: sim.start_date,
            tick_days: sim.tick_days,
            max_events: sim.max_events,
            world: WorldGenConfig::default(),
            camera: CameraConfig::default(),
            view: ViewSettings::default(),
            scheduler: SchedulerConfig::default(),
            levels: LevelTable::standard(),
            eras: EraTable::soviet_agrarian(),
        }
    }
}

impl SessionConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> SessionResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> SessionResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> SessionResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the start date.
    pub fn with_start_date(mut self, date: SimDate) -> Self {
        self.start_date = date;
        self
    }

    /// The simulation part of this config.
    pub fn sim_config(&self) -> SimConfig {
        SimConfig::default()
            .with_seed(self.seed)
            .with_start_date(self.start_date)
            .with_tick_days(self.tick_days)
            .with_max_events(self.max_events)
    }

    /// Check every setting that would keep a session from running.
    ///
    /// Level and era tables are validated when they are built; gaps between
    /// eras are allowed and only logged.
    pub fn validate(&self) -> SessionResult<()> {
        if self.tick_days < 1 {
            return Err(SimError::InvalidTickDays(self.tick_days).into());
        }
        if !self.eras.covers(self.start_date) {
            return Err(SimError::StartNotCovered(self.start_date).into());
        }
        self.world.validate()?;
        self.camera.validate()?;

        positive("view.ease_speed", self.view.ease_speed)?;
        positive("view.pick_radius", self.view.pick_radius)?;
        positive("view.farm_pick_radius", self.view.farm_pick_radius)?;
        positive("view.person_pick_radius", self.view.person_pick_radius)?;
        positive("scheduler.seconds_per_day", self.scheduler.seconds_per_day)?;
        positive(
            "scheduler.fast_forward_multiplier",
            self.scheduler.fast_forward_multiplier,
        )?;

        for (first, last) in self.eras.gaps() {
            tracing::warn!(%first, %last, "no era covers these dates");
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> SessionResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SessionError::InvalidSetting { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fw_view::ViewError;

    #[test]
    fn default_config_is_valid() {
        SessionConfig::default().validate().unwrap();
    }

    #[test]
    fn default_pacing_and_view_snapshot() {
        let config = SessionConfig::default();
        insta::assert_snapshot!(toml::to_string(&config.scheduler).unwrap(), @r"
        seconds_per_day = 0.6
        fast_forward_multiplier = 10.0
        start_playing = true
        ");
        insta::assert_snapshot!(toml::to_string(&config.view).unwrap(), @r"
        ease_speed = 4.0
        pick_radius = 25.0
        farm_pick_radius = 30.0
        person_pick_radius = 18.0
        ");
    }

    #[test]
    fn default_toml_lists_every_section() {
        let toml = SessionConfig::default().to_toml().unwrap();
        for header in ["[world]", "[camera]", "[view]", "[scheduler]", "[[levels]]", "[[eras]]"] {
            assert!(toml.contains(header), "missing {header}");
        }
        assert!(toml.contains("start_date = \"1905-01-01\""));
        assert_eq!(toml.matches("[[levels]]").count(), 6);
        assert_eq!(toml.matches("[[eras]]").count(), 5);
    }

    #[test]
    fn toml_round_trip_preserves_defaults() {
        let config = SessionConfig::default();
        let parsed = SessionConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(SessionConfig::from_toml("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SessionConfig::from_toml(
            r#"
            seed = 7
            start_date = "1929-03-01"

            [scheduler]
            fast_forward_multiplier = 4.0

            [camera]
            zoom_max = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.start_date, SimDate::from_ymd(1929, 3, 1).unwrap());
        assert_eq!(config.scheduler.fast_forward_multiplier, 4.0);
        assert_eq!(config.scheduler.seconds_per_day, 0.6);
        assert_eq!(config.camera.zoom_max, 3.0);
        assert_eq!(config.camera.zoom_min, 0.5);
        config.validate().unwrap();
    }

    #[test]
    fn empty_level_table_is_rejected() {
        let err = SessionConfig::from_toml("levels = []").unwrap_err();
        assert!(err.to_string().contains("level table is empty"));
    }

    #[test]
    fn overlapping_eras_are_rejected() {
        let err = SessionConfig::from_toml(
            r#"
            [[eras]]
            id = "a"
            name = "A"
            start = "1900-01-01"
            end = "1900-12-31"

            [[eras]]
            id = "b"
            name = "B"
            start = "1900-06-01"
            end = "1901-12-31"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::Parse(_)));
    }

    #[test]
    fn uncovered_start_fails_validation() {
        let config = SessionConfig::default().with_start_date(SimDate::from_ymd(1950, 1, 1).unwrap());
        assert!(matches!(
            config.validate(),
            Err(SessionError::Sim(SimError::StartNotCovered(_)))
        ));
    }

    #[test]
    fn bad_numbers_fail_validation() {
        let mut config = SessionConfig::default();
        config.scheduler.seconds_per_day = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidSetting {
                name: "scheduler.seconds_per_day",
                ..
            })
        ));

        let mut config = SessionConfig::default();
        config.camera.zoom_min = 3.0;
        assert!(matches!(
            config.validate(),
            Err(SessionError::View(ViewError::InvalidZoomBounds { .. }))
        ));

        let mut config = SessionConfig::default();
        config.tick_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("furrow.toml");
        std::fs::write(&path, "seed = 99\n").unwrap();
        assert_eq!(SessionConfig::load(&path).unwrap().seed, 99);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            SessionConfig::load(&missing),
            Err(SessionError::Io { .. })
        ));
    }
}
