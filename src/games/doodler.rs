// Space Doodler: a falling square bounces off randomly placed platforms and
// collects stars. Falling off the bottom respawns without touching the score.

use rand::Rng;
use rand::rngs::SmallRng;

use super::{Game, SessionKind, StepContext};
use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::geom::Rect;
use crate::input::{InputEvent, Key};
use crate::render::Surface;

pub const PLAYER_SIZE: f64 = 40.0;
pub const START_X: f64 = 200.0;
pub const START_Y: f64 = 500.0;
pub const MOVE_SPEED: f64 = 5.0;
pub const CLICK_NUDGE: f64 = 20.0;
pub const GRAVITY: f64 = 0.8;
pub const JUMP_VELOCITY: f64 = -15.0;
pub const STAR_POINTS: i32 = 10;

const PLATFORM_COUNT: usize = 8;
const PLATFORM_SPACING: f64 = 75.0;
const STAR_COUNT: usize = 5;
const MAX_X: f64 = CANVAS_WIDTH - PLAYER_SIZE;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub vel_y: f64,
    pub jumping: bool,
}

impl Player {
    fn spawn() -> Self {
        Self {
            rect: Rect::new(START_X, START_Y, PLAYER_SIZE, PLAYER_SIZE),
            vel_y: 0.0,
            jumping: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    pub rect: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub rect: Rect,
    pub collected: bool,
}

pub struct Doodler {
    pub player: Player,
    /// Placed once per session, never regenerated.
    pub platforms: Vec<Platform>,
    pub stars: Vec<Star>,
    pub left_held: bool,
    pub right_held: bool,
}

impl Doodler {
    pub fn new(rng: &mut SmallRng) -> Self {
        let platforms = (0..PLATFORM_COUNT)
            .map(|i| Platform {
                rect: Rect::new(
                    rng.random::<f64>() * 320.0,
                    CANVAS_HEIGHT - i as f64 * PLATFORM_SPACING,
                    80.0,
                    15.0,
                ),
            })
            .collect();
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                rect: Rect::new(
                    rng.random::<f64>() * 380.0,
                    rng.random::<f64>() * CANVAS_HEIGHT,
                    20.0,
                    20.0,
                ),
                collected: false,
            })
            .collect();
        Self {
            player: Player::spawn(),
            platforms,
            stars,
            left_held: false,
            right_held: false,
        }
    }

    fn set_held(&mut self, key: Key, held: bool) {
        match key {
            Key::Left => self.left_held = held,
            Key::Right => self.right_held = held,
            Key::Up | Key::Down => {}
        }
    }
}

impl Game for Doodler {
    fn kind(&self) -> SessionKind {
        SessionKind::Doodler
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.set_held(key, true),
            InputEvent::KeyUp(key) => self.set_held(key, false),
            InputEvent::Click { x, .. } => {
                let p = &mut self.player.rect;
                if x < CANVAS_WIDTH / 2.0 {
                    p.x = (p.x - CLICK_NUDGE).max(0.0);
                } else {
                    p.x = (p.x + CLICK_NUDGE).min(MAX_X);
                }
            }
            _ => {}
        }
    }

    fn draw(&self, s: &mut dyn Surface) {
        s.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, "#000");

        for p in &self.platforms {
            s.fill_rect(p.rect.x, p.rect.y, p.rect.w, p.rect.h, "#FFB800");
        }
        for star in self.stars.iter().filter(|star| !star.collected) {
            s.fill_circle(star.rect.x + 10.0, star.rect.y + 10.0, 8.0, "#FFD24D");
        }

        let r = self.player.rect;
        s.fill_rect(r.x, r.y, r.w, r.h, "#00C29B");
        // face
        s.fill_rect(r.x + 10.0, r.y + 10.0, 5.0, 5.0, "white");
        s.fill_rect(r.x + 25.0, r.y + 10.0, 5.0, 5.0, "white");
        s.fill_rect(r.x + 15.0, r.y + 25.0, 10.0, 3.0, "white");
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) {
        let player = &mut self.player;

        if self.left_held {
            player.rect.x = (player.rect.x - MOVE_SPEED).max(0.0);
        }
        if self.right_held {
            player.rect.x = (player.rect.x + MOVE_SPEED).min(MAX_X);
        }

        player.vel_y += GRAVITY;
        player.rect.y += player.vel_y;

        for platform in &self.platforms {
            if player.vel_y > 0.0 && player.rect.overlaps(&platform.rect) {
                player.vel_y = JUMP_VELOCITY;
                player.jumping = true;
            }
        }

        for star in self.stars.iter_mut().filter(|star| !star.collected) {
            if player.rect.overlaps(&star.rect) {
                star.collected = true;
                ctx.score.report(ctx.score.get() + STAR_POINTS);
            }
        }

        if player.rect.y > CANVAS_HEIGHT {
            *player = Player::spawn();
        }
    }
}
