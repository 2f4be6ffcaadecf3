use crate::error::{ViewError, ViewResult};
use crate::level::{Level, LevelTable};

/// Default progress gained per second of transition.
pub const DEFAULT_EASE_SPEED: f64 = 4.0;

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Linear interpolation from `a` to `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// A level named by table position or by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelRequest<'a> {
    /// Position in the level table.
    Index(usize),
    /// Level id.
    Id(&'a str),
}

impl From<usize> for LevelRequest<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl<'a> From<&'a str> for LevelRequest<'a> {
    fn from(id: &'a str) -> Self {
        Self::Id(id)
    }
}

/// Eased movement between zoom depths.
///
/// `progress` restarts at 0 whenever the target changes, otherwise only
/// grows, and stops at 1, where the target becomes the current level.
#[derive(Debug, Clone)]
pub struct LevelTransition {
    levels: LevelTable,
    current: usize,
    target: usize,
    progress: f64,
    ease_speed: f64,
}

impl LevelTransition {
    /// Start settled on the first level.
    pub fn new(levels: LevelTable, ease_speed: f64) -> ViewResult<Self> {
        if !(ease_speed.is_finite() && ease_speed > 0.0) {
            return Err(ViewError::NonPositiveSetting {
                name: "ease_speed",
                value: ease_speed,
            });
        }
        if levels.is_empty() {
            return Err(ViewError::EmptyLevelTable);
        }
        Ok(Self {
            levels,
            current: 0,
            target: 0,
            progress: 1.0,
            ease_speed,
        })
    }

    /// Begin moving toward another level.
    ///
    /// Unknown ids, out-of-range indices, and the level already targeted are
    /// ignored. Returns whether the request was accepted.
    pub fn request_level<'r>(&mut self, request: impl Into<LevelRequest<'r>>) -> bool {
        let index = match request.into() {
            LevelRequest::Index(i) if i < self.levels.len() => Some(i),
            LevelRequest::Index(_) => None,
            LevelRequest::Id(id) => self.levels.position(id),
        };
        match index {
            Some(i) if i != self.target => {
                tracing::debug!(
                    from = %self.target_level().id,
                    to = %self.levels.levels()[i].id,
                    "level requested"
                );
                self.target = i;
                self.progress = 0.0;
                true
            }
            _ => false,
        }
    }

    /// Target one level closer (toward house). No-op at the first level.
    pub fn step_toward_house(&mut self) -> bool {
        match self.target.checked_sub(1) {
            Some(i) => self.request_level(i),
            None => false,
        }
    }

    /// Target one level farther (toward world). No-op at the last level.
    pub fn step_toward_world(&mut self) -> bool {
        self.request_level(self.target + 1)
    }

    /// Advance the transition by `dt` seconds. Negative or NaN `dt` does nothing.
    pub fn step(&mut self, dt: f64) {
        if self.progress >= 1.0 || dt.is_nan() || dt <= 0.0 {
            return;
        }
        self.progress += dt * self.ease_speed;
        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.current = self.target;
        }
    }

    /// The scale to render at right now.
    pub fn interpolated_scale(&self) -> f64 {
        if self.progress >= 1.0 {
            return self.target_level().scale;
        }
        lerp(
            self.current_level().scale,
            self.target_level().scale,
            self.eased_progress(),
        )
    }

    /// `"<current> → <target>"` until the eased midpoint, then the target name.
    pub fn interpolated_name(&self) -> String {
        if self.progress < 1.0 && self.eased_progress() < 0.5 {
            format!(
                "{} \u{2192} {}",
                self.current_level().name,
                self.target_level().name
            )
        } else {
            self.target_level().name.clone()
        }
    }

    /// Progress after easing.
    pub fn eased_progress(&self) -> f64 {
        ease_in_out_cubic(self.progress)
    }

    /// Raw progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// True while a transition is under way.
    pub fn is_transitioning(&self) -> bool {
        self.progress < 1.0
    }

    /// The level being left (or settled on).
    pub fn current_level(&self) -> &Level {
        &self.levels.levels()[self.current]
    }

    /// The level being approached.
    pub fn target_level(&self) -> &Level {
        &self.levels.levels()[self.target]
    }

    /// Index of the current level.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Index of the target level.
    pub fn target_index(&self) -> usize {
        self.target
    }

    /// Progress gained per second.
    pub fn ease_speed(&self) -> f64 {
        self.ease_speed
    }

    /// The level table.
    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn standard() -> LevelTransition {
        LevelTransition::new(LevelTable::standard(), DEFAULT_EASE_SPEED).unwrap()
    }

    #[test]
    fn starts_settled_on_house() {
        let t = standard();
        assert_eq!(t.progress(), 1.0);
        assert_eq!(t.interpolated_scale(), 1.2);
        assert_eq!(t.interpolated_name(), "House");
        assert!(!t.is_transitioning());
    }

    #[test]
    fn house_to_world() {
        let mut t = standard();
        assert!(t.request_level("world"));
        assert_eq!(t.progress(), 0.0);
        assert_eq!(t.interpolated_scale(), 1.2);
        assert_eq!(t.interpolated_name(), "House \u{2192} World");

        let mut steps = 0;
        while t.progress() < 1.0 {
            t.step(0.3);
            steps += 1;
        }
        assert_eq!(steps, 1);
        assert_eq!(t.interpolated_scale(), 0.08);
        assert_eq!(t.interpolated_name(), "World");
        assert_eq!(t.current_level().id, "world");
    }

    #[test]
    fn label_switches_at_eased_midpoint() {
        let mut t = standard();
        t.request_level(1usize);
        t.step(0.1); // progress 0.4, eased 0.256
        assert_eq!(t.interpolated_name(), "House \u{2192} District");
        t.step(0.05); // progress 0.6, eased 0.744
        assert_eq!(t.interpolated_name(), "District");
        assert_eq!(t.current_index(), 0);
    }

    #[test]
    fn invalid_and_repeated_requests_ignored() {
        let mut t = standard();
        assert!(!t.request_level("galaxy"));
        assert!(!t.request_level(6usize));
        assert!(!t.request_level("house"));
        assert!(t.request_level("village"));
        t.step(0.1);
        let before = t.progress();
        assert!(!t.request_level(2usize));
        assert_eq!(t.progress(), before);
    }

    #[test]
    fn retarget_restarts_from_current() {
        let mut t = standard();
        t.request_level("world");
        t.step(0.1);
        t.request_level("district");
        assert_eq!(t.progress(), 0.0);
        assert_eq!(t.current_index(), 0);
        assert_eq!(t.interpolated_scale(), 1.2);
    }

    #[test]
    fn neighbour_steps_follow_the_target() {
        let mut t = standard();
        assert!(!t.step_toward_house());
        assert!(t.step_toward_world());
        assert!(t.step_toward_world());
        assert_eq!(t.target_index(), 2);
        assert_eq!(t.current_index(), 0);
        t.request_level("world");
        assert!(!t.step_toward_world());
        assert!(t.step_toward_house());
        assert_eq!(t.target_level().id, "country");
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut t = standard();
        t.request_level("state");
        t.step(0.1);
        t.step(-5.0);
        t.step(f64::NAN);
        assert!((t.progress() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn ease_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(lerp(2.0, 4.0, 0.25), 2.5);
    }

    #[test]
    fn zero_ease_speed_rejected() {
        assert!(LevelTransition::new(LevelTable::standard(), 0.0).is_err());
    }

    proptest! {
        #[test]
        fn progress_never_decreases(
            target in 0usize..6,
            dts in proptest::collection::vec(-0.1f64..0.5, 1..40),
        ) {
            let mut t = standard();
            t.request_level(target);
            let mut last = t.progress();
            for dt in dts {
                t.step(dt);
                prop_assert!(t.progress() >= last);
                prop_assert!(t.progress() <= 1.0);
                last = t.progress();
            }
            if t.progress() >= 1.0 {
                prop_assert_eq!(t.interpolated_scale(), t.target_level().scale);
            }
        }
    }
}
