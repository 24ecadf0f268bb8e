//! Pixel Arcade core crate.
//!
//! Four small canvas games (Space Doodler, Mini Cricket, Pixel Golf, Snake
//! Remix) shown one at a time in the portfolio's game modal. The page calls
//! `open_game(kind)` from its game cards and `close_game()` from the modal's
//! close button; everything else (frame loop, input listeners, score display)
//! is handled here.
//!
//! The game rules and the session lifecycle (`host`, `games`) are plain Rust
//! and testable natively; only `web` touches the DOM.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod games;
pub mod geom;
pub mod host;
pub mod input;
pub mod render;
mod web;

pub use error::ArcadeError;
pub use games::{Game, SessionDescriptor, SessionKind};
pub use host::{FrameOutcome, GameHost};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // a second call (tests re-running start) keeps the first logger
    console_log::init_with_level(level).ok();
}

// -----------------------------------------------------------------------------
// Page-facing entrypoints. None of these throw: failures are logged and the
// call becomes a no-op.
// -----------------------------------------------------------------------------

/// Open the modal and start `kind` ("doodler", "cricket", "golf" or "snake").
#[wasm_bindgen]
pub fn open_game(kind: &str) {
    web::open_game(kind);
}

#[wasm_bindgen]
pub fn close_game() {
    web::close_game();
}

#[wasm_bindgen]
pub fn report_score(value: i32) {
    web::report_score(value);
}

/// Dismiss the golf "hole in N" notice and resume the frame loop.
#[wasm_bindgen]
pub fn acknowledge_notice() {
    web::acknowledge_notice();
}

#[wasm_bindgen]
pub fn current_score() -> i32 {
    web::current_score()
}

#[wasm_bindgen]
pub fn is_running() -> bool {
    web::is_running()
}

#[wasm_bindgen]
pub fn active_game() -> Option<String> {
    web::active_game()
}

/// Override the DOM element ids with a JSON object, e.g. `{"canvasId":"arcade"}`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let config = config::HostConfig::from_json(json)
        .map_err(|err| JsValue::from_str(&format!("invalid arcade config: {err}")))?;
    web::set_config(config);
    Ok(())
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
