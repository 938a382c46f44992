//! Snake World headless runner
//!
//! Builds a world from settings, lets the autopilot play it and reports the
//! result. The browser build uses the library's wasm binding instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use snake_world::Settings;
    use snake_world::sim::drive;

    #[derive(Parser)]
    #[command(name = "snake-world")]
    #[command(version, about = "Run a Snake world headless under the autopilot")]
    struct Cli {
        /// JSON settings file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Grid width (overrides the settings file)
        #[arg(long)]
        width: Option<usize>,

        /// Reward RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Snake spawn cell
        #[arg(long)]
        spawn: Option<usize>,

        /// Maximum number of steps to run
        #[arg(long)]
        max_steps: Option<u64>,

        /// Print the final snapshot as JSON instead of a text board
        #[arg(long)]
        json: bool,
    }

    impl Cli {
        fn settings(&self) -> Result<Settings> {
            let mut settings = match &self.config {
                Some(path) => Settings::load(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => Settings::default(),
            };
            if let Some(width) = self.width {
                settings.world_width = width;
            }
            if self.seed.is_some() {
                settings.seed = self.seed;
            }
            if self.spawn.is_some() {
                settings.snake_spawn = self.spawn;
            }
            if let Some(max_steps) = self.max_steps {
                settings.max_steps = max_steps;
            }
            settings.validate().context("invalid settings")?;
            Ok(settings)
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();
        let settings = cli.settings()?;

        let mut world = settings.build_world()?;
        world.start_game();
        let outcome = drive(&mut world, settings.max_steps);
        log::info!(
            "Stopped after {} ticks: {:?}, status {}",
            world.ticks(),
            outcome,
            world.status()
        );

        let snapshot = world.snapshot();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            println!("{snapshot}");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `snake_world::wasm::start`, this is just to satisfy the compiler
}
