//! Clear Points core crate.
//!
//! Click the numbered circles in ascending order. A correct click starts a short
//! countdown after which the circle disappears; a click out of order ends the game.
//! The state machine in [`game`] is plain Rust and runs natively; [`ui`] mounts it
//! into a browser page through `wasm-bindgen`.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod game;
pub mod route;
pub mod ui;
pub mod view;

pub use config::GameConfig;
pub use game::{Circle, ClickOutcome, Session, Status};

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
    // Already initialised when the module is instantiated twice.
    let _ = console_log::init_with_level(level);
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    ui::start(GameConfig::default())
}

/// Start with a JSON override of [`GameConfig`], e.g. `{"default_points": 10}`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(|e| {
        log::warn!("rejecting config override: {}", e);
        error::UiError::Config(e.to_string())
    })?;
    ui::start(config)
}
