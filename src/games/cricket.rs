// Mini Cricket: click to bowl, the ball flies at a fixed bat and every contact
// is worth a boundary.

use rand::Rng;
use rand::rngs::SmallRng;

use super::{Game, SessionKind, StepContext};
use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::geom::Rect;
use crate::input::InputEvent;
use crate::render::Surface;

/// Height of the playable (sky) area; the grass band below is decoration.
pub const FIELD_HEIGHT: f64 = 400.0;
pub const BALL_ORIGIN: (f64, f64) = (50.0, 300.0);
pub const BALL_RADIUS: f64 = 10.0;
pub const BAT: Rect = Rect::new(350.0, 280.0, 10.0, 40.0);
pub const RUNS_PER_HIT: i32 = 4;
pub const HIT_SPEEDUP: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub speed_x: f64,
    pub speed_y: f64,
}

pub struct Cricket {
    pub ball: Ball,
    pub moving: bool,
    pub runs: i32,
}

impl Cricket {
    pub fn new() -> Self {
        Self {
            ball: Ball { x: BALL_ORIGIN.0, y: BALL_ORIGIN.1, speed_x: 3.0, speed_y: 0.0 },
            moving: false,
            runs: 0,
        }
    }

    fn bat_contact(&self) -> bool {
        let b = &self.ball;
        b.x + BALL_RADIUS >= BAT.x
            && b.x - BALL_RADIUS <= BAT.right()
            && b.y >= BAT.y
            && b.y <= BAT.bottom()
    }

    fn reset_ball(&mut self, rng: &mut SmallRng) {
        self.ball = Ball {
            x: BALL_ORIGIN.0,
            y: BALL_ORIGIN.1,
            speed_x: 3.0 + rng.random::<f64>() * 2.0,
            speed_y: (rng.random::<f64>() - 0.5) * 4.0,
        };
        self.moving = false;
    }
}

impl Default for Cricket {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Cricket {
    fn kind(&self) -> SessionKind {
        SessionKind::Cricket
    }

    fn handle_input(&mut self, event: InputEvent) {
        // bowl; clicks on a ball already in flight are ignored
        if let InputEvent::Click { .. } = event {
            if !self.moving {
                self.moving = true;
            }
        }
    }

    fn draw(&self, s: &mut dyn Surface) {
        s.fill_rect(0.0, 0.0, CANVAS_WIDTH, FIELD_HEIGHT, "#87CEEB");
        s.fill_rect(0.0, FIELD_HEIGHT, CANVAS_WIDTH, CANVAS_HEIGHT - FIELD_HEIGHT, "#90EE90");
        for x in [370.0, 380.0, 390.0] {
            s.fill_rect(x, 260.0, 5.0, 40.0, "#8B4513");
        }
        s.fill_rect(BAT.x, BAT.y, BAT.w, BAT.h, "#8B4513");
        s.fill_circle(self.ball.x, self.ball.y, BALL_RADIUS, "#FF0000");
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) {
        if !self.moving {
            return;
        }
        let ball = &mut self.ball;
        ball.x += ball.speed_x;
        ball.y += ball.speed_y;

        if ball.y <= 0.0 || ball.y >= FIELD_HEIGHT {
            ball.speed_y = -ball.speed_y;
        }

        if self.bat_contact() {
            self.ball.speed_x = -self.ball.speed_x.abs() * HIT_SPEEDUP;
            self.ball.speed_y = (ctx.rng.random::<f64>() - 0.5) * 6.0;
            self.runs += RUNS_PER_HIT;
            ctx.score.report(self.runs);
        }

        if self.ball.x > CANVAS_WIDTH || self.ball.x < 0.0 {
            self.reset_ball(ctx.rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Scoreboard;
    use rand::SeedableRng;

    #[test]
    fn idle_ball_does_not_move() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut score = Scoreboard::default();
        let mut game = Cricket::new();
        game.step(&mut StepContext::new(&mut score, &mut rng));
        assert_eq!(game.ball.x, BALL_ORIGIN.0);
    }

    #[test]
    fn click_bowls_only_when_idle() {
        let mut game = Cricket::new();
        game.handle_input(InputEvent::Click { x: 0.0, y: 0.0 });
        assert!(game.moving);
        game.ball.x = 120.0;
        game.handle_input(InputEvent::Click { x: 0.0, y: 0.0 });
        assert!(game.moving);
        assert_eq!(game.ball.x, 120.0);
    }

    #[test]
    fn bounces_off_the_field_edges() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut score = Scoreboard::default();
        let mut game = Cricket::new();
        game.moving = true;
        game.ball = Ball { x: 100.0, y: 2.0, speed_x: 3.0, speed_y: -4.0 };
        game.step(&mut StepContext::new(&mut score, &mut rng));
        assert_eq!(game.ball.speed_y, 4.0);
    }

    #[test]
    fn leaving_the_field_resets_to_idle() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut score = Scoreboard::default();
        let mut game = Cricket::new();
        game.moving = true;
        game.ball = Ball { x: 2.0, y: 300.0, speed_x: -4.0, speed_y: 0.0 };
        game.step(&mut StepContext::new(&mut score, &mut rng));
        assert!(!game.moving);
        assert_eq!((game.ball.x, game.ball.y), BALL_ORIGIN);
        assert!((3.0..5.0).contains(&game.ball.speed_x));
        assert!((-2.0..2.0).contains(&game.ball.speed_y));
    }
}
