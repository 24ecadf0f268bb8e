// Pixel Golf: slingshot aiming (drag away from the ball, release to shoot),
// friction, damped wall and obstacle bounces, and a hole that ends the round.

use super::{Game, SessionKind, StepContext};
use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::geom::Rect;
use crate::input::InputEvent;
use crate::render::Surface;

pub const BALL_START: (f64, f64) = (50.0, 300.0);
pub const BALL_RADIUS: f64 = 8.0;
/// Drag distance divided by this is the launch speed.
pub const POWER_DIVISOR: f64 = 20.0;
pub const FRICTION: f64 = 0.98;
pub const WALL_DAMPING: f64 = 0.7;
pub const OBSTACLE_DAMPING: f64 = 0.5;
pub const REST_SPEED: f64 = 0.1;
pub const OBSTACLES: [Rect; 2] = [
    Rect::new(150.0, 200.0, 20.0, 100.0),
    Rect::new(250.0, 300.0, 100.0, 20.0),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GolfBall {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub moving: bool,
}

impl GolfBall {
    fn teed() -> Self {
        Self { x: BALL_START.0, y: BALL_START.1, vel_x: 0.0, vel_y: 0.0, moving: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hole {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

pub const HOLE: Hole = Hole { x: 350.0, y: 150.0, radius: 15.0 };

/// Score for sinking the ball after `strokes` shots.
pub fn hole_score(strokes: u32) -> i32 {
    let strokes = i32::try_from(strokes).unwrap_or(i32::MAX);
    100_i32.saturating_sub(strokes.saturating_mul(10)).max(0)
}

pub struct Golf {
    pub ball: GolfBall,
    pub hole: Hole,
    pub obstacles: [Rect; 2],
    pub strokes: u32,
    /// Current aim point while the pointer is held down.
    pub drag: Option<(f64, f64)>,
}

impl Golf {
    pub fn new() -> Self {
        Self {
            ball: GolfBall::teed(),
            hole: HOLE,
            obstacles: OBSTACLES,
            strokes: 0,
            drag: None,
        }
    }

    fn shoot(&mut self, (dx, dy): (f64, f64)) {
        self.ball.vel_x = -(dx - self.ball.x) / POWER_DIVISOR;
        self.ball.vel_y = -(dy - self.ball.y) / POWER_DIVISOR;
        self.ball.moving = true;
        self.strokes += 1;
        log::debug!("golf: stroke {} at ({:.2}, {:.2})", self.strokes, self.ball.vel_x, self.ball.vel_y);
    }

    fn bounce_walls(&mut self) {
        let b = &mut self.ball;
        let (max_x, max_y) = (CANVAS_WIDTH - BALL_RADIUS, CANVAS_HEIGHT - BALL_RADIUS);
        if b.x <= BALL_RADIUS || b.x >= max_x {
            b.vel_x = -b.vel_x * WALL_DAMPING;
            b.x = b.x.clamp(BALL_RADIUS, max_x);
        }
        if b.y <= BALL_RADIUS || b.y >= max_y {
            b.vel_y = -b.vel_y * WALL_DAMPING;
            b.y = b.y.clamp(BALL_RADIUS, max_y);
        }
    }

    fn in_hole(&self) -> bool {
        let (dx, dy) = (self.ball.x - self.hole.x, self.ball.y - self.hole.y);
        dx.hypot(dy) < self.hole.radius
    }
}

impl Default for Golf {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Golf {
    fn kind(&self) -> SessionKind {
        SessionKind::Golf
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } if !self.ball.moving => self.drag = Some((x, y)),
            InputEvent::PointerMove { x, y } if self.drag.is_some() => self.drag = Some((x, y)),
            InputEvent::PointerUp { .. } if !self.ball.moving => {
                if let Some(aim) = self.drag.take() {
                    self.shoot(aim);
                }
            }
            _ => {}
        }
    }

    fn draw(&self, s: &mut dyn Surface) {
        s.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, "#90EE90");
        s.fill_circle(self.hole.x, self.hole.y, self.hole.radius, "#000");
        for o in &self.obstacles {
            s.fill_rect(o.x, o.y, o.w, o.h, "#8B4513");
        }
        s.fill_circle(self.ball.x, self.ball.y, BALL_RADIUS, "white");
        s.stroke_circle(self.ball.x, self.ball.y, BALL_RADIUS, "#ccc");
        if let Some((ax, ay)) = self.drag.filter(|_| !self.ball.moving) {
            s.line(self.ball.x, self.ball.y, ax, ay, "#FF0000", 2.0);
        }
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) {
        if !self.ball.moving {
            return;
        }
        let b = &mut self.ball;
        b.x += b.vel_x;
        b.y += b.vel_y;
        b.vel_x *= FRICTION;
        b.vel_y *= FRICTION;

        self.bounce_walls();

        // no separation: the ball may sink into an obstacle before turning
        for o in &self.obstacles {
            if o.overlaps_circle(self.ball.x, self.ball.y, BALL_RADIUS) {
                self.ball.vel_x = -self.ball.vel_x * OBSTACLE_DAMPING;
                self.ball.vel_y = -self.ball.vel_y * OBSTACLE_DAMPING;
            }
        }

        if self.ball.vel_x.abs() < REST_SPEED && self.ball.vel_y.abs() < REST_SPEED {
            self.ball.vel_x = 0.0;
            self.ball.vel_y = 0.0;
            self.ball.moving = false;
        }

        if self.in_hole() {
            ctx.score.report(hole_score(self.strokes));
            ctx.notify(format!("Hole in {} strokes!", self.strokes));
            self.ball = GolfBall::teed();
            self.strokes = 0;
        }
    }

    fn frame(&mut self, s: &mut dyn Surface, ctx: &mut StepContext<'_>) {
        self.draw(s);
        self.step(ctx);
        s.text(&format!("Strokes: {}", self.strokes), 10.0, 30.0, "16px Arial", "#000");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Scoreboard;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn score_table() {
        assert_eq!(hole_score(0), 100);
        assert_eq!(hole_score(1), 90);
        assert_eq!(hole_score(10), 0);
        assert_eq!(hole_score(u32::MAX), 0);
    }

    #[test]
    fn pointer_down_ignored_while_rolling() {
        let mut g = Golf::new();
        g.ball.moving = true;
        g.handle_input(InputEvent::PointerDown { x: 10.0, y: 10.0 });
        assert_eq!(g.drag, None);
    }

    #[test]
    fn move_without_drag_does_nothing() {
        let mut g = Golf::new();
        g.handle_input(InputEvent::PointerMove { x: 10.0, y: 10.0 });
        g.handle_input(InputEvent::PointerUp { x: 10.0, y: 10.0 });
        assert_eq!(g.drag, None);
        assert_eq!(g.strokes, 0);
        assert!(!g.ball.moving);
    }

    #[test]
    fn friction_applies_every_tick() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut score = Scoreboard::default();
        let mut g = Golf::new();
        g.ball = GolfBall { x: 100.0, y: 500.0, vel_x: 5.0, vel_y: 0.0, moving: true };
        g.step(&mut StepContext::new(&mut score, &mut rng));
        assert!((g.ball.x - 105.0).abs() < 1e-9);
        assert!((g.ball.vel_x - 4.9).abs() < 1e-9);
        assert!(g.ball.moving);
    }

    #[test]
    fn wall_hit_reverses_damps_and_clamps() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut score = Scoreboard::default();
        let mut g = Golf::new();
        g.ball = GolfBall { x: 395.0, y: 500.0, vel_x: 10.0, vel_y: 0.0, moving: true };
        g.step(&mut StepContext::new(&mut score, &mut rng));
        assert_eq!(g.ball.x, 392.0);
        assert!((g.ball.vel_x - (-10.0 * 0.98 * 0.7)).abs() < 1e-9);
    }

    #[test]
    fn obstacle_hit_reverses_both_axes() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut score = Scoreboard::default();
        let mut g = Golf::new();
        g.ball = GolfBall { x: 140.0, y: 250.0, vel_x: 4.0, vel_y: 2.0, moving: true };
        g.step(&mut StepContext::new(&mut score, &mut rng));
        assert!((g.ball.vel_x - (-4.0 * 0.98 * 0.5)).abs() < 1e-9);
        assert!((g.ball.vel_y - (-2.0 * 0.98 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn aim_line_only_while_dragging() {
        let mut g = Golf::new();
        let mut rec = crate::render::Recorder::default();
        g.draw(&mut rec);
        assert!(!rec.ops.iter().any(|op| op.starts_with("line")));
        g.handle_input(InputEvent::PointerDown { x: 20.0, y: 320.0 });
        let mut rec = crate::render::Recorder::default();
        g.draw(&mut rec);
        assert!(rec.ops.contains(&"line 50,300->20,320 #FF0000".to_string()));
    }
}
