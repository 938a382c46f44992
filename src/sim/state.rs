//! Game state and core simulation types
//!
//! Everything a host needs to draw a frame is readable from [`World`] or copied
//! out through [`Snapshot`]. Mutation happens only in `tick.rs`.

use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use super::grid::Grid;
use super::reward::place_reward;
use crate::error::WorldError;

/// Direction the snake can move
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed iteration order used wherever directions are scanned
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Direction a freshly spawned snake faces
pub const DEFAULT_DIRECTION: Direction = Direction::Right;

/// Current phase of the game
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Created, waiting for `start_game`
    #[default]
    Paused,
    /// Active gameplay
    Played,
    /// Snake covers the whole grid
    Won,
    /// Snake ran into itself
    Lost,
}

impl GameStatus {
    /// Display text shown by the host
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Paused => "Paused",
            GameStatus::Played => "Playing",
            GameStatus::Won => "Won",
            GameStatus::Lost => "Lost",
        }
    }

    /// Won and Lost never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The snake: grid indices with the head at index 0.
///
/// Only built by [`World`], so the body always has at least one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub(crate) body: Vec<usize>,
    pub(crate) direction: Direction,
}

impl Snake {
    pub fn new(spawn: usize, direction: Direction) -> Self {
        Self {
            body: vec![spawn],
            direction,
        }
    }

    pub fn head(&self) -> usize {
        self.body[0]
    }

    /// Segments, head first
    pub fn body(&self) -> &[usize] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Last segment, the one vacated by a non-growing move
    pub fn tail(&self) -> usize {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true for a constructed world
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.body.contains(&idx)
    }

    /// Whether moving the head onto `next` hits the body.
    ///
    /// On a non-growing move the tail leaves its cell in the same step, so it
    /// does not count.
    pub fn collides(&self, next: usize, grows: bool) -> bool {
        let body = if grows {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        body.contains(&next)
    }

    /// Whether `direction` would turn straight back into the neck
    pub fn is_reversal(&self, direction: Direction) -> bool {
        self.body.len() > 1 && self.direction.is_opposite(direction)
    }

    /// Prepend a new head, dropping the tail unless growing
    pub fn advance(&mut self, next: usize, grows: bool) {
        self.body.insert(0, next);
        if !grows {
            self.body.pop();
        }
    }
}

/// Read-only copy of a world, for rendering, logging and restoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: usize,
    /// Head first
    pub snake: Vec<usize>,
    pub direction: Direction,
    #[serde(default)]
    pub pending_direction: Option<Direction>,
    pub reward_cell: Option<usize>,
    pub status: GameStatus,
    pub points: usize,
    #[serde(default)]
    pub ticks: u64,
}

impl fmt::Display for Snapshot {
    /// Text board: `H` head, `o` body, `*` reward, `.` empty
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.width * self.width;
        let mut cells = vec!['.'; size];
        if let Some(reward) = self.reward_cell.filter(|&r| r < size) {
            cells[reward] = '*';
        }
        for (i, &idx) in self.snake.iter().enumerate() {
            if idx < size {
                cells[idx] = if i == 0 { 'H' } else { 'o' };
            }
        }
        for row in cells.chunks(self.width.max(1)) {
            let line: String = row.iter().collect();
            writeln!(f, "{line}")?;
        }
        write!(
            f,
            "status: {}  points: {}  length: {}",
            self.status,
            self.points,
            self.snake.len()
        )
    }
}

/// Complete game state. Generic over the reward RNG so tests can inject one.
#[derive(Debug, Clone)]
pub struct World<R = Pcg32> {
    pub(super) grid: Grid,
    pub(super) snake: Snake,
    /// Direction requested since the last step (last write wins)
    pub(super) pending_direction: Option<Direction>,
    pub(super) reward_cell: Option<usize>,
    pub(super) status: GameStatus,
    pub(super) points: usize,
    pub(super) ticks: u64,
    pub(super) rng: R,
}

impl World<Pcg32> {
    /// Create a world with an entropy-seeded RNG
    pub fn new(width: usize, snake_spawn_idx: usize) -> Result<Self, WorldError> {
        let seed: u64 = rand::random();
        log::debug!("Seeding reward RNG with {}", seed);
        Self::with_seed(width, snake_spawn_idx, seed)
    }

    /// Create a world whose reward placement is fully determined by `seed`
    pub fn with_seed(width: usize, snake_spawn_idx: usize, seed: u64) -> Result<Self, WorldError> {
        Self::with_rng(width, snake_spawn_idx, Pcg32::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> World<R> {
    /// Create a world that draws reward cells from `rng`
    pub fn with_rng(width: usize, snake_spawn_idx: usize, mut rng: R) -> Result<Self, WorldError> {
        let grid = Grid::new(width)?;
        if !grid.contains(snake_spawn_idx) {
            return Err(WorldError::SpawnOutOfRange {
                index: snake_spawn_idx,
                size: grid.size(),
            });
        }

        let snake = Snake::new(snake_spawn_idx, DEFAULT_DIRECTION);
        let reward_cell = place_reward(&grid, &snake.body, &mut rng);

        Ok(Self {
            grid,
            snake,
            pending_direction: None,
            reward_cell,
            status: GameStatus::Paused,
            points: 0,
            ticks: 0,
            rng,
        })
    }

    /// Rebuild a world from a snapshot, checking every body invariant
    pub fn restore(snapshot: &Snapshot, rng: R) -> Result<Self, WorldError> {
        let grid = Grid::new(snapshot.width)?;
        let body = &snapshot.snake;
        if body.is_empty() {
            return Err(WorldError::EmptySnake);
        }

        let mut occupied = vec![false; grid.size()];
        for &idx in body {
            if !grid.contains(idx) {
                return Err(WorldError::CellOutOfRange {
                    index: idx,
                    size: grid.size(),
                });
            }
            if occupied[idx] {
                return Err(WorldError::OverlappingSnake { index: idx });
            }
            occupied[idx] = true;
        }
        for pair in body.windows(2) {
            if !grid.is_adjacent(pair[0], pair[1]) {
                return Err(WorldError::DetachedSegment {
                    from: pair[0],
                    to: pair[1],
                });
            }
        }

        match snapshot.reward_cell {
            Some(idx) if !grid.contains(idx) || occupied[idx] => {
                return Err(WorldError::InvalidReward { index: idx });
            }
            None if body.len() < grid.size() => return Err(WorldError::MissingReward),
            _ => {}
        }

        // A grown snake moved onto its head from the neck, unless a fatal turn
        // was applied without moving
        if body.len() > 1
            && snapshot.status != GameStatus::Lost
            && grid.neighbor(body[0], snapshot.direction.opposite()) != body[1]
        {
            return Err(WorldError::HeadingMismatch {
                direction: snapshot.direction,
            });
        }

        let full = body.len() == grid.size();
        match snapshot.status {
            GameStatus::Won if !full => return Err(WorldError::WonWithFreeCells),
            status if full && status != GameStatus::Won => {
                return Err(WorldError::FullBoardNotWon { status });
            }
            _ => {}
        }

        Ok(Self {
            grid,
            snake: Snake {
                body: body.clone(),
                direction: snapshot.direction,
            },
            pending_direction: snapshot.pending_direction,
            reward_cell: snapshot.reward_cell,
            status: snapshot.status,
            points: snapshot.points,
            ticks: snapshot.ticks,
            rng,
        })
    }
}

impl<R> World<R> {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn status_text(&self) -> &'static str {
        self.status.as_str()
    }

    /// Rewards eaten so far
    pub fn points(&self) -> usize {
        self.points
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// Snake cells, head first
    pub fn snake_cells(&self) -> &[usize] {
        &self.snake.body
    }

    pub fn snake_head(&self) -> usize {
        self.snake.head()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current movement direction (pending requests not yet applied)
    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// `None` only once the snake fills the grid
    pub fn reward_cell(&self) -> Option<usize> {
        self.reward_cell
    }

    /// Number of steps applied while playing
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.grid.width(),
            snake: self.snake.body.clone(),
            direction: self.snake.direction,
            pending_direction: self.pending_direction,
            reward_cell: self.reward_cell,
            status: self.status,
            points: self.points,
            ticks: self.ticks,
        }
    }
}
