// Snake Remix: 20x20 grid, 150ms ticks, +10 per food, any collision restarts.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::SmallRng;

use super::{Game, SessionKind, StepContext};
use crate::config::CANVAS_WIDTH;
use crate::input::{InputEvent, Key};
use crate::render::Surface;

pub const GRID_SIZE: f64 = 20.0;
pub const TILE_COUNT: i32 = 20;
pub const START_CELL: Cell = Cell { x: 10, y: 10 };
pub const FOOD_POINTS: i32 = 10;
pub const TICK_MS: f64 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn in_grid(self) -> bool {
        (0..TILE_COUNT).contains(&self.x) && (0..TILE_COUNT).contains(&self.y)
    }
}

pub struct Snake {
    /// Head first.
    pub body: VecDeque<Cell>,
    pub food: Cell,
    pub dx: i32,
    pub dy: i32,
    pub score: i32,
}

impl Snake {
    pub fn new(rng: &mut SmallRng) -> Self {
        let mut snake = Self {
            body: VecDeque::from([START_CELL]),
            food: START_CELL,
            dx: 0,
            dy: 0,
            score: 0,
        };
        snake.place_food(rng);
        snake
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn is_idle(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Apply an arrow key unless it would reverse the current heading.
    pub fn steer(&mut self, key: Key) {
        let (dx, dy) = match key {
            Key::Up if self.dy != 1 => (0, -1),
            Key::Down if self.dy != -1 => (0, 1),
            Key::Left if self.dx != 1 => (-1, 0),
            Key::Right if self.dx != -1 => (1, 0),
            _ => return,
        };
        self.dx = dx;
        self.dy = dy;
    }

    /// Move food to a random cell not covered by the body.
    fn place_food(&mut self, rng: &mut SmallRng) {
        if self.body.len() >= (TILE_COUNT * TILE_COUNT) as usize {
            return;
        }
        loop {
            let cell = Cell::new(rng.random_range(0..TILE_COUNT), rng.random_range(0..TILE_COUNT));
            if !self.body.contains(&cell) {
                self.food = cell;
                return;
            }
        }
    }

    fn restart(&mut self, ctx: &mut StepContext<'_>) {
        log::debug!("snake: collision at length {}, restarting", self.body.len());
        self.body.clear();
        self.body.push_back(START_CELL);
        self.dx = 0;
        self.dy = 0;
        self.score = 0;
        ctx.score.report(self.score);
        self.place_food(ctx.rng);
    }
}

fn fill_cell(s: &mut dyn Surface, c: Cell, color: &str) {
    s.fill_rect(
        c.x as f64 * GRID_SIZE,
        c.y as f64 * GRID_SIZE,
        GRID_SIZE - 2.0,
        GRID_SIZE - 2.0,
        color,
    );
}

impl Game for Snake {
    fn kind(&self) -> SessionKind {
        SessionKind::Snake
    }

    fn handle_input(&mut self, event: InputEvent) {
        if let InputEvent::KeyDown(key) = event {
            self.steer(key);
        }
    }

    fn draw(&self, s: &mut dyn Surface) {
        s.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_WIDTH, "#000");
        for (i, &segment) in self.body.iter().enumerate() {
            fill_cell(s, segment, if i == 0 { "#FFB800" } else { "#00C29B" });
        }
        fill_cell(s, self.food, "#FF0000");
        s.text(&format!("Score: {}", self.score), 10.0, 450.0, "20px Arial", "#FFF");
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) {
        if self.is_idle() {
            return;
        }
        let head = self.head();
        let next = Cell::new(head.x + self.dx, head.y + self.dy);
        if !next.in_grid() || self.body.contains(&next) {
            self.restart(ctx);
            return;
        }

        self.body.push_front(next);
        if next == self.food {
            self.score += FOOD_POINTS;
            ctx.score.report(self.score);
            self.place_food(ctx.rng);
        } else {
            self.body.pop_back();
        }
    }

    fn tick_interval_ms(&self) -> Option<f64> {
        Some(TICK_MS)
    }

    fn frame(&mut self, s: &mut dyn Surface, ctx: &mut StepContext<'_>) {
        self.step(ctx);
        self.draw(s);
    }
}
