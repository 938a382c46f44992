//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per call, no wall-clock time
//! - Seeded or injected RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod grid;
pub mod reward;
pub mod state;
pub mod tick;

pub use autopilot::{choose_direction, drive};
pub use grid::Grid;
pub use reward::place_reward;
pub use state::{DEFAULT_DIRECTION, Direction, GameStatus, Snake, Snapshot, World};
pub use tick::StepOutcome;
