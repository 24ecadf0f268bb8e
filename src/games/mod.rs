//! The four arcade games and the pieces they share with the host.
//!
//! Each game is a self-contained session: it owns its entities, declares the
//! DOM listeners it needs ([`SessionKind::bindings`]), and advances one frame
//! at a time through the [`Game`] trait. Score is never stored here; games
//! write it through the host's [`Scoreboard`].

use std::fmt;
use std::str::FromStr;

use rand::rngs::SmallRng;

use crate::error::ArcadeError;
use crate::input::{Binding, EventType, InputEvent, Target};
use crate::render::Surface;

mod cricket;
mod doodler;
mod golf;
mod snake;

pub use cricket::{Ball as CricketBall, Cricket};
pub use doodler::{Doodler, Player, Platform, Star};
pub use golf::{Golf, GolfBall, Hole};
pub use snake::{Cell, Snake};

const DOODLER_BINDINGS: &[Binding] = &[
    Binding::new(Target::Document, EventType::KeyDown),
    Binding::new(Target::Document, EventType::KeyUp),
    Binding::new(Target::Canvas, EventType::Click),
];
const CRICKET_BINDINGS: &[Binding] = &[Binding::new(Target::Canvas, EventType::Click)];
const GOLF_BINDINGS: &[Binding] = &[
    Binding::new(Target::Canvas, EventType::MouseDown),
    Binding::new(Target::Canvas, EventType::MouseMove),
    Binding::new(Target::Canvas, EventType::MouseUp),
];
const SNAKE_BINDINGS: &[Binding] = &[Binding::new(Target::Document, EventType::KeyDown)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionKind {
    Doodler,
    Cricket,
    Golf,
    Snake,
}

impl SessionKind {
    pub const ALL: [SessionKind; 4] = [
        SessionKind::Doodler,
        SessionKind::Cricket,
        SessionKind::Golf,
        SessionKind::Snake,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Doodler => "doodler",
            SessionKind::Cricket => "cricket",
            SessionKind::Golf => "golf",
            SessionKind::Snake => "snake",
        }
    }

    pub fn descriptor(self) -> SessionDescriptor {
        let (title, instructions) = match self {
            SessionKind::Doodler => ("Space Doodler", "Use arrow keys or click to move"),
            SessionKind::Cricket => ("Mini Cricket", "Click to hit the ball"),
            SessionKind::Golf => ("Pixel Golf", "Click and drag to aim"),
            SessionKind::Snake => ("Snake Remix", "Arrow keys to move"),
        };
        SessionDescriptor { kind: self, title, instructions }
    }

    /// Listeners the session needs while it is the active one.
    pub fn bindings(self) -> &'static [Binding] {
        match self {
            SessionKind::Doodler => DOODLER_BINDINGS,
            SessionKind::Cricket => CRICKET_BINDINGS,
            SessionKind::Golf => GOLF_BINDINGS,
            SessionKind::Snake => SNAKE_BINDINGS,
        }
    }

    pub fn create(self, rng: &mut SmallRng) -> Box<dyn Game> {
        match self {
            SessionKind::Doodler => Box::new(Doodler::new(rng)),
            SessionKind::Cricket => Box::new(Cricket::new()),
            SessionKind::Golf => Box::new(Golf::new()),
            SessionKind::Snake => Box::new(Snake::new(rng)),
        }
    }
}

impl FromStr for SessionKind {
    type Err = ArcadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SessionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ArcadeError::UnknownGame(s.to_string()))
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the modal shows for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionDescriptor {
    pub kind: SessionKind,
    pub title: &'static str,
    pub instructions: &'static str,
}

/// The host-owned score. Games write through [`Scoreboard::report`]; the
/// host pushes each change to the display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    value: i32,
    dirty: bool,
}

impl Scoreboard {
    pub fn get(&self) -> i32 {
        self.value
    }

    /// Overwrite the score. No bounds checks.
    pub fn report(&mut self, value: i32) {
        self.value = value;
        self.dirty = true;
    }

    /// Returns the score once per change.
    pub fn take_update(&mut self) -> Option<i32> {
        std::mem::take(&mut self.dirty).then_some(self.value)
    }
}

/// Completion message a game raises instead of blocking the frame loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

/// Everything a game may touch outside its own entities during one step.
pub struct StepContext<'a> {
    pub score: &'a mut Scoreboard,
    pub rng: &'a mut SmallRng,
    pub notice: Option<Notice>,
}

impl<'a> StepContext<'a> {
    pub fn new(score: &'a mut Scoreboard, rng: &'a mut SmallRng) -> Self {
        Self { score, rng, notice: None }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice { message: message.into() });
    }
}

pub trait Game {
    fn kind(&self) -> SessionKind;

    fn handle_input(&mut self, event: InputEvent);

    /// Draw the current state; the canvas has already been cleared.
    fn draw(&self, surface: &mut dyn Surface);

    /// Advance physics / rules by one tick.
    fn step(&mut self, ctx: &mut StepContext<'_>);

    /// Minimum spacing between advanced ticks; `None` runs every display frame.
    fn tick_interval_ms(&self) -> Option<f64> {
        None
    }

    /// One frame of the loop. Most games draw the previous state then step.
    fn frame(&mut self, surface: &mut dyn Surface, ctx: &mut StepContext<'_>) {
        self.draw(surface);
        self.step(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_and_round_trip() {
        for kind in SessionKind::ALL {
            assert_eq!(kind.as_str().parse::<SessionKind>(), Ok(kind));
        }
        assert_eq!(
            "pong".parse::<SessionKind>(),
            Err(ArcadeError::UnknownGame("pong".into()))
        );
        // case sensitive, like the page's onclick values
        assert!("Golf".parse::<SessionKind>().is_err());
    }

    #[test]
    fn every_kind_listens_to_something() {
        for kind in SessionKind::ALL {
            assert!(!kind.bindings().is_empty(), "{kind} has no bindings");
        }
        assert!(SessionKind::Snake.bindings().iter().all(|b| b.event.is_keyboard()));
        assert!(SessionKind::Golf.bindings().iter().all(|b| b.target == Target::Canvas));
    }

    #[test]
    fn scoreboard_reports_each_change_once() {
        let mut score = Scoreboard::default();
        assert_eq!(score.take_update(), None);
        score.report(-5);
        assert_eq!(score.get(), -5);
        assert_eq!(score.take_update(), Some(-5));
        assert_eq!(score.take_update(), None);
    }
}
