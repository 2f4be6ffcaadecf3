//! Normalized input events and the commands they map to.
//!
//! Window and device wiring live outside this crate; callers translate raw
//! events into [`InputEvent`] values and hand them to the scheduler.

use crate::render::Overlay;

/// A key the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character, compared case-insensitively.
    Char(char),
    /// The space bar.
    Space,
    /// The escape key.
    Escape,
}

/// An already-normalized input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key went down.
    KeyPressed(Key),
    /// Mouse wheel moved; positive is away from the user (zoom out).
    Wheel {
        /// Vertical wheel delta.
        delta_y: f64,
    },
    /// Pointer dragged by a screen-space delta.
    Drag {
        /// Horizontal pixels.
        dx: f64,
        /// Vertical pixels.
        dy: f64,
    },
    /// Primary button clicked at a screen position.
    Click {
        /// Screen x in pixels.
        x: f64,
        /// Screen y in pixels.
        y: f64,
    },
    /// The viewport changed size.
    Resize {
        /// New width in pixels.
        width: f64,
        /// New height in pixels.
        height: f64,
    },
    /// An overlay was chosen from a menu.
    SetOverlay(Overlay),
}

/// What an input asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Move to the level at this table index.
    SelectLevel(usize),
    /// Target the next level toward house.
    LevelCloser,
    /// Target the next level toward world.
    LevelFarther,
    /// Send the camera back to the origin.
    CenterCamera,
    /// Drop the current selection.
    ClearSelection,
    /// Pause or resume simulated time.
    TogglePlay,
    /// Toggle fast-forward.
    ToggleFast,
    /// Simulate one day now.
    StepDay,
    /// Switch to the next overlay.
    CycleOverlay,
    /// Show a specific overlay.
    SetOverlay(Overlay),
    /// Zoom by wheel delta.
    Zoom(f64),
    /// Pan by a screen-space drag delta.
    Pan(f64, f64),
    /// Pick at a screen position.
    Pick(f64, f64),
    /// Resize the viewport.
    Resize(f64, f64),
}

impl Command {
    /// Keyboard shortcuts: `1`-`9` pick a level, `z`/`x` step toward house or
    /// world, space centers, escape clears, `p` plays, `f` fast-forwards,
    /// `n` steps one day, `o` cycles overlays.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Space => Some(Self::CenterCamera),
            Key::Escape => Some(Self::ClearSelection),
            Key::Char(c) => match c.to_ascii_lowercase() {
                d @ '1'..='9' => d.to_digit(10).map(|n| Self::SelectLevel(n as usize - 1)),
                'z' => Some(Self::LevelCloser),
                'x' => Some(Self::LevelFarther),
                'p' => Some(Self::TogglePlay),
                'f' => Some(Self::ToggleFast),
                'n' => Some(Self::StepDay),
                'o' => Some(Self::CycleOverlay),
                _ => None,
            },
        }
    }
}

impl InputEvent {
    /// The command this event maps to, if any.
    pub fn command(&self) -> Option<Command> {
        match *self {
            Self::KeyPressed(key) => Command::from_key(key),
            Self::Wheel { delta_y } => Some(Command::Zoom(delta_y)),
            Self::Drag { dx, dy } => Some(Command::Pan(dx, dy)),
            Self::Click { x, y } => Some(Command::Pick(x, y)),
            Self::Resize { width, height } => Some(Command::Resize(width, height)),
            Self::SetOverlay(overlay) => Some(Command::SetOverlay(overlay)),
        }
    }
}
