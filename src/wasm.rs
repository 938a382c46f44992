//! Browser binding
//!
//! Exposes the world to the host page under the names its render loop calls.
//! Snake cells cross the boundary as a copied `Uint32Array` rather than a view
//! into linear memory.

use wasm_bindgen::prelude::*;

use crate::sim::{self, Direction, GameStatus};

/// Install the panic hook and route `log` to the browser console
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("Console logger was already installed");
    }
}

/// Uniform integer in `0..max`, for picking a spawn cell on the JS side
#[wasm_bindgen]
pub fn rnd(max: usize) -> usize {
    (js_sys::Math::random() * max as f64).floor() as usize
}

fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

#[wasm_bindgen]
pub struct World {
    inner: sim::World,
}

#[wasm_bindgen]
impl World {
    /// Throws if the width is below 2 or the spawn cell is off the grid
    pub fn new(width: usize, snake_spawn_idx: usize) -> Result<World, JsError> {
        let seed = random_seed();
        let inner = sim::World::with_seed(width, snake_spawn_idx, seed)?;
        log::info!("Created {}x{} world (seed {})", width, width, seed);
        Ok(World { inner })
    }

    pub fn width(&self) -> usize {
        self.inner.width()
    }

    pub fn snake_head_idx(&self) -> usize {
        self.inner.snake_head()
    }

    pub fn change_snake_dir(&mut self, direction: Direction) {
        self.inner.change_snake_dir(direction);
    }

    pub fn get_points(&self) -> usize {
        self.inner.points()
    }

    pub fn get_snake_length(&self) -> usize {
        self.inner.snake_len()
    }

    /// Head first
    pub fn get_snake_cells(&self) -> Vec<u32> {
        self.inner
            .snake_cells()
            .iter()
            .map(|&idx| idx as u32)
            .collect()
    }

    pub fn get_reward_cell(&self) -> Option<u32> {
        self.inner.reward_cell().map(|idx| idx as u32)
    }

    pub fn start_game(&mut self) {
        self.inner.start_game();
    }

    pub fn get_games_status(&self) -> GameStatus {
        self.inner.status()
    }

    pub fn get_games_status_text(&self) -> String {
        self.inner.status_text().to_string()
    }

    pub fn step(&mut self) {
        self.inner.step();
    }
}
