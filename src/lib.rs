//! Snake World - a Snake game on a wrapping square grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, rewards, step state machine)
//! - `settings`: Host configuration loaded from JSON
//! - `error`: Construction and configuration errors
//! - `wasm`: Browser binding (wasm32 only)

pub mod error;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{SettingsError, WorldError};
pub use settings::Settings;
pub use sim::{Direction, GameStatus, StepOutcome, World};

/// Game configuration constants
pub mod consts {
    /// Smallest grid that fits a one-cell snake plus a reward
    pub const MIN_WORLD_WIDTH: usize = 2;
    /// Grid side used by the browser host
    pub const DEFAULT_WORLD_WIDTH: usize = 8;
    /// Step limit for headless runs
    pub const DEFAULT_MAX_STEPS: u64 = 10_000;
}
