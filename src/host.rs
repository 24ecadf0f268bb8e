//! Session lifecycle, independent of the browser.
//!
//! `GameHost` owns the one active game, the running flag, the score and the
//! RNG. The web layer drives it: `open`/`close` on page requests,
//! `handle_input` from registered listeners, and `tick` once per animation
//! frame. Keeping this free of `web_sys` lets the whole lifecycle run under
//! plain `cargo test`.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::games::{Game, Notice, Scoreboard, SessionDescriptor, SessionKind, StepContext};
use crate::input::InputEvent;
use crate::render::Surface;

/// What happened during one call to [`GameHost::tick`].
#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Not running (or nothing open); the loop must not reschedule.
    Stopped,
    /// Waiting on a throttle interval or a pending notice; nothing drawn.
    Skipped,
    Advanced,
    /// The game finished a round and wants the player to acknowledge it.
    Notice(Notice),
}

struct ActiveSession {
    descriptor: SessionDescriptor,
    game: Box<dyn Game>,
    last_tick_ms: Option<f64>,
}

pub struct GameHost {
    active: Option<ActiveSession>,
    running: bool,
    score: Scoreboard,
    pending_notice: Option<Notice>,
    rng: SmallRng,
}

impl GameHost {
    pub fn new(seed: u64) -> Self {
        Self {
            active: None,
            running: false,
            score: Scoreboard::default(),
            pending_notice: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Start `kind`, tearing down whatever was running first.
    pub fn open(&mut self, kind: SessionKind) -> SessionDescriptor {
        if self.active.is_some() {
            self.close();
        }
        let game = kind.create(&mut self.rng);
        self.start(game)
    }

    /// Make an already-built game the active session.
    pub fn start(&mut self, game: Box<dyn Game>) -> SessionDescriptor {
        if self.active.is_some() {
            self.close();
        }
        self.score.report(0);
        self.running = true;
        self.pending_notice = None;
        let descriptor = game.kind().descriptor();
        self.active = Some(ActiveSession { descriptor, game, last_tick_ms: None });
        log::info!("opened {} ({})", descriptor.kind, descriptor.title);
        descriptor
    }

    /// Stop the loop and drop the session. Returns whether anything was open.
    pub fn close(&mut self) -> bool {
        self.running = false;
        self.pending_notice = None;
        match self.active.take() {
            Some(session) => {
                log::info!("closed {}", session.descriptor.kind);
                true
            }
            None => false,
        }
    }

    pub fn report_score(&mut self, value: i32) {
        self.score.report(value);
    }

    pub fn score(&self) -> i32 {
        self.score.get()
    }

    /// Yields the score once after every change, for the display element.
    pub fn take_score_update(&mut self) -> Option<i32> {
        self.score.take_update()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn active_kind(&self) -> Option<SessionKind> {
        self.active.as_ref().map(|s| s.descriptor.kind)
    }

    pub fn descriptor(&self) -> Option<SessionDescriptor> {
        self.active.as_ref().map(|s| s.descriptor)
    }

    pub fn pending_notice(&self) -> Option<&Notice> {
        self.pending_notice.as_ref()
    }

    /// Dismiss the completion notice. Returns true if the loop should resume.
    pub fn acknowledge_notice(&mut self) -> bool {
        self.pending_notice.take().is_some() && self.running
    }

    /// Forward `event` to the active game. Dropped while closed or while a
    /// notice is waiting to be acknowledged.
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.running || self.pending_notice.is_some() {
            return;
        }
        if let Some(session) = self.active.as_mut() {
            session.game.handle_input(event);
        }
    }

    /// Run one frame at `now_ms` (animation-frame timestamp).
    pub fn tick(&mut self, now_ms: f64, surface: &mut dyn Surface) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Stopped;
        }
        let Some(session) = self.active.as_mut() else {
            return FrameOutcome::Stopped;
        };
        if self.pending_notice.is_some() {
            return FrameOutcome::Skipped;
        }
        if let (Some(interval), Some(last)) = (session.game.tick_interval_ms(), session.last_tick_ms) {
            if now_ms - last < interval {
                return FrameOutcome::Skipped;
            }
        }
        session.last_tick_ms = Some(now_ms);

        surface.clear(CANVAS_WIDTH, CANVAS_HEIGHT);
        let mut ctx = StepContext::new(&mut self.score, &mut self.rng);
        session.game.frame(surface, &mut ctx);

        match ctx.notice {
            Some(notice) => {
                log::info!("{}: {}", session.descriptor.kind, notice.message);
                self.pending_notice = Some(notice.clone());
                FrameOutcome::Notice(notice)
            }
            None => FrameOutcome::Advanced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::render::Recorder;

    #[test]
    fn fresh_host_is_idle() {
        let mut host = GameHost::new(0);
        assert!(!host.is_running());
        assert_eq!(host.active_kind(), None);
        assert_eq!(host.tick(0.0, &mut Recorder::default()), FrameOutcome::Stopped);
    }

    #[test]
    fn open_replaces_previous_session() {
        let mut host = GameHost::new(1);
        host.open(SessionKind::Doodler);
        host.report_score(40);
        let desc = host.open(SessionKind::Snake);
        assert_eq!(desc.title, "Snake Remix");
        assert_eq!(host.active_kind(), Some(SessionKind::Snake));
        assert_eq!(host.score(), 0);
        assert!(host.is_running());
    }

    #[test]
    fn tick_clears_then_draws() {
        let mut host = GameHost::new(2);
        host.open(SessionKind::Cricket);
        let mut rec = Recorder::default();
        assert_eq!(host.tick(16.0, &mut rec), FrameOutcome::Advanced);
        assert_eq!(rec.ops[0], "clear 400x600");
        assert_eq!(rec.ops[1], "rect 0,0 400x400 #87CEEB");
    }

    #[test]
    fn snake_is_throttled() {
        let mut host = GameHost::new(3);
        host.open(SessionKind::Snake);
        let mut rec = Recorder::default();
        assert_eq!(host.tick(1000.0, &mut rec), FrameOutcome::Advanced);
        assert_eq!(host.tick(1100.0, &mut rec), FrameOutcome::Skipped);
        assert_eq!(host.tick(1149.9, &mut rec), FrameOutcome::Skipped);
        assert_eq!(host.tick(1150.0, &mut rec), FrameOutcome::Advanced);
    }

    #[test]
    fn input_after_close_is_dropped() {
        let mut host = GameHost::new(4);
        host.open(SessionKind::Snake);
        host.close();
        host.handle_input(InputEvent::KeyDown(Key::Up));
        assert_eq!(host.active_kind(), None);
    }

    #[test]
    fn descriptor_follows_the_open_session() {
        let mut host = GameHost::new(6);
        assert_eq!(host.descriptor(), None);
        host.open(SessionKind::Golf);
        let desc = host.descriptor().map(|d| (d.kind, d.title));
        assert_eq!(desc, Some((SessionKind::Golf, "Pixel Golf")));
        host.close();
        assert_eq!(host.descriptor(), None);
    }

    #[test]
    fn acknowledging_without_notice_does_not_resume() {
        let mut host = GameHost::new(5);
        host.open(SessionKind::Golf);
        assert!(!host.acknowledge_notice());
    }
}
