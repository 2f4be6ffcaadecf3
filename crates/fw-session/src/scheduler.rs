//! Frame pacing: turns wall-clock frame deltas into simulated days.
//!
//! Each frame adds `dt` (times the fast-forward multiplier while fast) to an
//! accumulator. Once it reaches `seconds_per_day` the accumulator resets to
//! zero and exactly one day is simulated, so a long frame never advances
//! more than one day. View smoothing always runs with the unscaled `dt`.

use fw_simulation::DayReport;
use serde::{Deserialize, Serialize};

use crate::input::{Command, InputEvent};
use crate::session::Session;

/// Frame pacing settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Real seconds per simulated day at normal speed.
    pub seconds_per_day: f64,
    /// Time multiplier while fast-forwarding.
    pub fast_forward_multiplier: f64,
    /// Whether simulated time runs from the first frame.
    pub start_playing: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            seconds_per_day: 0.6,
            fast_forward_multiplier: 10.0,
            start_playing: true,
        }
    }
}

impl SchedulerConfig {
    /// Set the seconds per simulated day.
    pub fn with_seconds_per_day(mut self, seconds: f64) -> Self {
        self.seconds_per_day = seconds;
        self
    }

    /// Set the fast-forward multiplier.
    pub fn with_fast_forward_multiplier(mut self, multiplier: f64) -> Self {
        self.fast_forward_multiplier = multiplier;
        self
    }

    /// Start paused or playing.
    pub fn with_start_playing(mut self, playing: bool) -> Self {
        self.start_playing = playing;
        self
    }
}

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// The simulated day, if one was due this frame.
    pub day: Option<DayReport>,
}

/// Drives a [`Session`] one frame at a time.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    config: SchedulerConfig,
    accumulator: f64,
    playing: bool,
    fast: bool,
    stopped: bool,
    frames: u64,
    days: u64,
}

impl FrameScheduler {
    /// A scheduler that has not run any frame yet.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
            playing: config.start_playing,
            fast: false,
            stopped: false,
            frames: 0,
            days: 0,
        }
    }

    /// Run one frame of `dt` seconds. Returns `None` once stopped.
    ///
    /// Negative or non-finite deltas count as zero.
    pub fn frame(&mut self, session: &mut Session, dt: f64) -> Option<FrameReport> {
        if self.stopped {
            return None;
        }
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        let mut day = None;
        if self.playing {
            self.accumulator += dt * self.time_scale();
            if self.accumulator >= self.config.seconds_per_day {
                self.accumulator = 0.0;
                day = Some(session.advance_day());
                self.days += 1;
            }
        }
        session.step_view(dt);
        self.frames += 1;
        Some(FrameReport {
            frame: self.frames,
            day,
        })
    }

    /// Run `frames` frames of equal length; returns the days simulated.
    pub fn run(&mut self, session: &mut Session, frames: u64, dt: f64) -> u64 {
        let before = self.days;
        for _ in 0..frames {
            if self.frame(session, dt).is_none() {
                break;
            }
        }
        self.days - before
    }

    /// Route an input event: play controls stay here, everything else goes
    /// to the session. Returns whether anything changed.
    pub fn dispatch(&mut self, session: &mut Session, event: &InputEvent) -> bool {
        if self.stopped {
            return false;
        }
        match event.command() {
            None => false,
            Some(Command::TogglePlay) => {
                self.toggle_play();
                true
            }
            Some(Command::ToggleFast) => {
                self.toggle_fast();
                true
            }
            Some(command) => session.apply(command),
        }
    }

    /// Stop for good; later frames and events are ignored.
    pub fn stop(&mut self) {
        tracing::debug!(frames = self.frames, days = self.days, "scheduler stopped");
        self.stopped = true;
    }

    /// Pause or resume.
    pub fn toggle_play(&mut self) {
        self.set_playing(!self.playing);
    }

    /// Pause or resume explicitly.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Toggle fast-forward.
    pub fn toggle_fast(&mut self) {
        self.set_fast(!self.fast);
    }

    /// Set fast-forward explicitly.
    pub fn set_fast(&mut self, fast: bool) {
        self.fast = fast;
    }

    /// Current time multiplier.
    pub fn time_scale(&self) -> f64 {
        if self.fast {
            self.config.fast_forward_multiplier
        } else {
            1.0
        }
    }

    /// Whether simulated time is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether fast-forward is on.
    pub fn is_fast(&self) -> bool {
        self.fast
    }

    /// Whether [`FrameScheduler::stop`] was called.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Accumulated scaled seconds toward the next day.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Days simulated by frames so far.
    pub fn days_advanced(&self) -> u64 {
        self.days
    }

    /// The pacing in use.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::input::Key;
    use proptest::prelude::*;

    fn session() -> Session {
        Session::new(&SessionConfig::default()).unwrap()
    }

    #[test]
    fn one_day_per_threshold() {
        let mut s = session();
        let start = s.simulation().current_date();
        let mut sched = FrameScheduler::new(SchedulerConfig::default());

        let first = sched.frame(&mut s, 0.25).unwrap();
        assert_eq!(first.frame, 1);
        assert!(first.day.is_none());
        assert!(sched.frame(&mut s, 0.25).unwrap().day.is_none());
        let third = sched.frame(&mut s, 0.25).unwrap();
        assert_eq!(third.day.unwrap().date, start.add_days(1));
        assert_eq!(sched.accumulator(), 0.0);
        assert_eq!(s.simulation().current_date(), start.add_days(1));
    }

    #[test]
    fn long_frames_advance_at_most_one_day() {
        let mut s = session();
        let mut sched = FrameScheduler::new(SchedulerConfig::default());
        assert_eq!(sched.run(&mut s, 5, 10.0), 5);
        assert_eq!(sched.days_advanced(), 5);
    }

    #[test]
    fn fast_forward_multiplies_time() {
        let mut s = session();
        let mut sched = FrameScheduler::new(SchedulerConfig::default());
        assert_eq!(sched.run(&mut s, 10, 0.1), 1);

        sched.toggle_fast();
        assert_eq!(sched.time_scale(), 10.0);
        // 0.1 * 10 = 1.0 >= 0.6 every frame
        assert_eq!(sched.run(&mut s, 10, 0.1), 10);
    }

    #[test]
    fn paused_scheduler_still_steps_the_view() {
        let mut s = session();
        let start = s.simulation().current_date();
        let mut sched =
            FrameScheduler::new(SchedulerConfig::default().with_start_playing(false));
        s.request_level("world");
        assert_eq!(sched.run(&mut s, 20, 0.05), 0);
        assert_eq!(s.simulation().current_date(), start);
        assert_eq!(s.level_label(), "World");
        assert_eq!(sched.accumulator(), 0.0);
    }

    #[test]
    fn bad_deltas_count_as_zero() {
        let mut s = session();
        let mut sched = FrameScheduler::new(SchedulerConfig::default());
        sched.frame(&mut s, f64::NAN);
        sched.frame(&mut s, -3.0);
        sched.frame(&mut s, f64::INFINITY);
        assert_eq!(sched.accumulator(), 0.0);
        assert_eq!(sched.frames(), 3);
    }

    #[test]
    fn stop_ends_the_loop() {
        let mut s = session();
        let mut sched = FrameScheduler::new(SchedulerConfig::default());
        sched.stop();
        assert!(sched.frame(&mut s, 1.0).is_none());
        assert_eq!(sched.run(&mut s, 10, 1.0), 0);
        assert!(!sched.dispatch(&mut s, &InputEvent::KeyPressed(Key::Char('n'))));
    }

    #[test]
    fn dispatch_routes_play_controls_and_commands() {
        let mut s = session();
        let start = s.simulation().current_date();
        let mut sched = FrameScheduler::new(SchedulerConfig::default());

        assert!(sched.dispatch(&mut s, &InputEvent::KeyPressed(Key::Char('p'))));
        assert!(!sched.is_playing());
        assert!(sched.dispatch(&mut s, &InputEvent::KeyPressed(Key::Char('f'))));
        assert!(sched.is_fast());
        assert!(sched.dispatch(&mut s, &InputEvent::KeyPressed(Key::Char('n'))));
        assert_eq!(s.simulation().current_date(), start.add_days(1));
        assert!(sched.dispatch(&mut s, &InputEvent::KeyPressed(Key::Char('3'))));
        assert_eq!(s.transition().target_level().id, "village");
        assert!(!sched.dispatch(&mut s, &InputEvent::KeyPressed(Key::Char('q'))));
    }

    proptest! {
        #[test]
        fn days_never_exceed_frames(dts in prop::collection::vec(0.0f64..5.0, 0..40)) {
            let mut s = session();
            let mut sched = FrameScheduler::new(SchedulerConfig::default());
            for dt in &dts {
                sched.frame(&mut s, *dt);
                prop_assert!(sched.accumulator() < sched.config().seconds_per_day);
            }
            prop_assert!(sched.days_advanced() <= dts.len() as u64);
        }
    }
}
