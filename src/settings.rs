//! Game settings
//!
//! Read from JSON by the native runner; every field has a default so partial
//! files are fine.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_STEPS, DEFAULT_WORLD_WIDTH};
use crate::error::{SettingsError, WorldError};
use crate::sim::{Grid, World};

/// Host-facing configuration for building a world
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid side length
    pub world_width: usize,
    /// Reward RNG seed; `None` draws one from entropy
    pub seed: Option<u64>,
    /// Spawn cell; `None` picks a random cell like the browser host
    pub snake_spawn: Option<usize>,
    /// Upper bound on headless steps
    pub max_steps: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            seed: None,
            snake_spawn: None,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check the grid and spawn cell are usable
    pub fn validate(&self) -> Result<(), WorldError> {
        let grid = Grid::new(self.world_width)?;
        match self.snake_spawn {
            Some(index) if !grid.contains(index) => Err(WorldError::SpawnOutOfRange {
                index,
                size: grid.size(),
            }),
            _ => Ok(()),
        }
    }

    /// Configured spawn cell, or a uniformly random one
    pub fn spawn_index<R: Rng>(&self, rng: &mut R) -> Result<usize, WorldError> {
        let grid = Grid::new(self.world_width)?;
        match self.snake_spawn {
            Some(index) if !grid.contains(index) => Err(WorldError::SpawnOutOfRange {
                index,
                size: grid.size(),
            }),
            Some(index) => Ok(index),
            None => Ok(rng.random_range(grid.cells())),
        }
    }

    /// Build the configured world.
    ///
    /// The seed drives both the random spawn and reward placement, so a fixed
    /// seed reproduces the whole game.
    pub fn build_world(&self) -> Result<World, WorldError> {
        self.validate()?;
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn = self.spawn_index(&mut rng)?;
        log::info!(
            "Building {}x{} world, spawn {}, seed {}",
            self.world_width,
            self.world_width,
            spawn,
            seed
        );
        World::with_rng(self.world_width, spawn, rng)
    }
}
