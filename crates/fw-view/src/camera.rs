use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};

/// Camera tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the remaining distance covered per second of smoothing.
    pub smoothing_rate: f64,
    /// World units spanned by the viewport width at scale 1 and zoom 1.
    pub base_world_size: f64,
    /// Smallest user zoom factor.
    pub zoom_min: f64,
    /// Largest user zoom factor.
    pub zoom_max: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smoothing_rate: 8.0,
            base_world_size: 5000.0,
            zoom_min: 0.5,
            zoom_max: 2.5,
        }
    }
}

impl CameraConfig {
    /// Set the smoothing rate.
    pub fn with_smoothing_rate(mut self, rate: f64) -> Self {
        self.smoothing_rate = rate;
        self
    }

    /// Set the base world size.
    pub fn with_base_world_size(mut self, size: f64) -> Self {
        self.base_world_size = size;
        self
    }

    /// Set the user zoom band.
    pub fn with_zoom_bounds(mut self, min: f64, max: f64) -> Self {
        self.zoom_min = min;
        self.zoom_max = max;
        self
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> ViewResult<()> {
        positive("smoothing_rate", self.smoothing_rate)?;
        positive("base_world_size", self.base_world_size)?;
        let band_ok = self.zoom_min.is_finite()
            && self.zoom_max.is_finite()
            && self.zoom_min > 0.0
            && self.zoom_min <= self.zoom_max;
        if !band_ok {
            return Err(ViewError::InvalidZoomBounds {
                min: self.zoom_min,
                max: self.zoom_max,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> ViewResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ViewError::NonPositiveSetting { name, value })
    }
}

/// Screen size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The screen-space center.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// A camera whose live position eases toward a target.
///
/// Pan and center move only the target; [`Camera::step`] closes the gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    x: f64,
    y: f64,
    target_x: f64,
    target_y: f64,
    zoom: f64,
    config: CameraConfig,
}

impl Camera {
    /// A camera at the origin with zoom 1 (clamped into the band).
    pub fn new(config: CameraConfig) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            target_x: 0.0,
            target_y: 0.0,
            zoom: 1.0_f64.max(config.zoom_min).min(config.zoom_max),
            config,
        }
    }

    /// Live position.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Where the camera is heading.
    pub fn target(&self) -> (f64, f64) {
        (self.target_x, self.target_y)
    }

    /// User zoom factor.
    pub fn user_zoom(&self) -> f64 {
        self.zoom
    }

    /// The tuning in use.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Head back to the origin.
    pub fn center(&mut self) {
        self.focus_on(0.0, 0.0);
    }

    /// Head toward a world position.
    pub fn focus_on(&mut self, x: f64, y: f64) {
        self.target_x = x;
        self.target_y = y;
    }

    /// Snap both the live position and the target.
    pub fn jump_to(&mut self, x: f64, y: f64) {
        self.focus_on(x, y);
        self.x = x;
        self.y = y;
    }

    /// Shift the target by a screen-space delta converted to world units.
    ///
    /// Does nothing when the pixel ratio is not positive (e.g. a zero-width
    /// viewport).
    pub fn pan(&mut self, dx: f64, dy: f64, level_scale: f64, viewport_width: f64) {
        let ratio = self.pixel_ratio(level_scale, viewport_width);
        if !(ratio.is_finite() && ratio > 0.0) {
            return;
        }
        self.target_x += dx / ratio;
        self.target_y += dy / ratio;
    }

    /// Zoom out by 10 % for a positive wheel delta, in by 10 % for a negative
    /// one. A zero or NaN delta does nothing.
    pub fn apply_wheel(&mut self, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            0.9
        } else if delta_y < 0.0 {
            1.1
        } else {
            return;
        };
        self.set_zoom(self.zoom * factor);
    }

    /// Set the user zoom, clamped to the configured band.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = zoom.max(self.config.zoom_min).min(self.config.zoom_max);
    }

    /// Move the live position toward the target by `min(1, dt * rate)` of the gap.
    pub fn step(&mut self, dt: f64) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        let k = (dt * self.config.smoothing_rate).min(1.0);
        self.x += (self.target_x - self.x) * k;
        self.y += (self.target_y - self.y) * k;
    }

    /// Screen pixels per world unit.
    pub fn pixel_ratio(&self, level_scale: f64, viewport_width: f64) -> f64 {
        level_scale * self.zoom * (viewport_width / self.config.base_world_size)
    }

    /// World coordinates to screen pixels.
    pub fn world_to_screen(
        &self,
        wx: f64,
        wy: f64,
        level_scale: f64,
        viewport: Viewport,
    ) -> (f64, f64) {
        let ratio = self.pixel_ratio(level_scale, viewport.width);
        let (cx, cy) = viewport.center();
        ((wx - self.x) * ratio + cx, (wy - self.y) * ratio + cy)
    }

    /// Screen pixels to world coordinates; the inverse of [`Camera::world_to_screen`].
    pub fn screen_to_world(
        &self,
        sx: f64,
        sy: f64,
        level_scale: f64,
        viewport: Viewport,
    ) -> (f64, f64) {
        let ratio = self.pixel_ratio(level_scale, viewport.width);
        let (cx, cy) = viewport.center();
        ((sx - cx) / ratio + self.x, (sy - cy) / ratio + self.y)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
