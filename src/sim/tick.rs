//! Discrete simulation step
//!
//! The host calls [`World::step`] at its own cadence. Direction requests that
//! arrive between steps are buffered and applied at the start of the next one.

use rand::Rng;

use super::reward::place_reward;
use super::state::{Direction, GameStatus, World};

/// What a single call to [`World::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Game not in progress; nothing changed
    Idle,
    /// Head advanced, tail followed
    Moved,
    /// Head landed on the reward and the snake grew
    Ate,
    /// Head ran into the body; game lost
    Collided,
    /// Snake grew to cover every cell; game won
    Won,
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepOutcome::Collided | StepOutcome::Won)
    }
}

impl<R: Rng> World<R> {
    /// Paused -> Played. Ignored in any other status.
    pub fn start_game(&mut self) {
        if self.status != GameStatus::Paused {
            log::debug!("start_game ignored in status {}", self.status);
            return;
        }
        self.status = GameStatus::Played;
        log::info!(
            "Game started on a {}x{} grid at cell {}",
            self.grid.width(),
            self.grid.width(),
            self.snake.head()
        );
    }

    /// Request a direction for the next step (last request wins).
    ///
    /// Turning straight back into the neck is ignored, as is any request once
    /// the game is over.
    pub fn change_snake_dir(&mut self, direction: Direction) {
        if self.status.is_terminal() {
            log::trace!("Direction {:?} ignored, game is over", direction);
            return;
        }
        if self.snake.is_reversal(direction) {
            log::debug!(
                "Rejected reversal from {:?} to {:?}",
                self.snake.direction,
                direction
            );
            return;
        }
        self.pending_direction = Some(direction);
    }

    /// Advance the game by one tick
    pub fn step(&mut self) -> StepOutcome {
        if self.status != GameStatus::Played {
            return StepOutcome::Idle;
        }

        if let Some(direction) = self.pending_direction.take() {
            if !self.snake.is_reversal(direction) {
                self.snake.direction = direction;
            }
        }

        self.ticks += 1;
        let next = self.grid.neighbor(self.snake.head(), self.snake.direction);
        let grows = self.reward_cell == Some(next);

        if self.snake.collides(next, grows) {
            self.status = GameStatus::Lost;
            log::info!(
                "Lost after {} ticks: head hit cell {} (points: {})",
                self.ticks,
                next,
                self.points
            );
            return StepOutcome::Collided;
        }

        self.snake.advance(next, grows);
        log::trace!("Head moved to {} heading {:?}", next, self.snake.direction);

        if !grows {
            return StepOutcome::Moved;
        }

        self.points += 1;
        self.reward_cell = place_reward(&self.grid, &self.snake.body, &mut self.rng);
        if self.reward_cell.is_none() {
            self.status = GameStatus::Won;
            log::info!("Won after {} ticks with {} points", self.ticks, self.points);
            return StepOutcome::Won;
        }
        StepOutcome::Ate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Snapshot;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn restored(snapshot: Snapshot) -> World {
        World::restore(&snapshot, Pcg32::seed_from_u64(3)).unwrap()
    }

    fn playing(width: usize, snake: Vec<usize>, direction: Direction, reward: usize) -> World {
        restored(Snapshot {
            width,
            snake,
            direction,
            pending_direction: None,
            reward_cell: Some(reward),
            status: GameStatus::Played,
            points: 0,
            ticks: 0,
        })
    }

    #[test]
    fn test_step_requires_start() {
        let mut world = World::with_seed(4, 5, 1).unwrap();
        assert_eq!(world.step(), StepOutcome::Idle);
        assert_eq!(world.snake_cells(), &[5]);
        assert_eq!(world.ticks(), 0);

        world.start_game();
        assert_eq!(world.status(), GameStatus::Played);
        assert_ne!(world.step(), StepOutcome::Idle);
    }

    #[test]
    fn test_start_game_only_from_paused() {
        let mut world = playing(4, vec![5], Direction::Right, 0);
        world.status = GameStatus::Lost;
        world.start_game();
        assert_eq!(world.status(), GameStatus::Lost);
    }

    #[test]
    fn test_first_step_moves_right() {
        // Pick a seed whose reward is not on cell 6
        let mut world = (0..)
            .map(|seed| World::with_seed(4, 5, seed).unwrap())
            .find(|w| w.reward_cell() != Some(6))
            .unwrap();
        world.start_game();
        assert_eq!(world.step(), StepOutcome::Moved);
        assert_eq!(world.snake_head(), 6);
        assert_eq!(world.snake_len(), 1);
    }

    #[test]
    fn test_wraps_right_edge() {
        let mut world = playing(4, vec![7], Direction::Right, 0);
        assert_eq!(world.step(), StepOutcome::Moved);
        assert_eq!(world.snake_head(), 4);
        assert_eq!(world.status(), GameStatus::Played);
    }

    #[test]
    fn test_wraps_top_edge() {
        let mut world = playing(4, vec![2, 6], Direction::Up, 0);
        assert_eq!(world.step(), StepOutcome::Moved);
        assert_eq!(world.snake_cells(), &[14, 2]);
    }

    #[test]
    fn test_eating_grows_and_keeps_tail() {
        let mut world = playing(4, vec![5, 4], Direction::Right, 6);
        assert_eq!(world.step(), StepOutcome::Ate);
        assert_eq!(world.snake_cells(), &[6, 5, 4]);
        assert_eq!(world.points(), 1);

        let reward = world.reward_cell().unwrap();
        assert!(!world.snake_cells().contains(&reward));
    }

    #[test]
    fn test_direction_applies_on_next_step() {
        let mut world = playing(4, vec![5], Direction::Right, 15);
        world.change_snake_dir(Direction::Down);
        assert_eq!(world.direction(), Direction::Right);
        assert_eq!(world.pending_direction(), Some(Direction::Down));

        world.step();
        assert_eq!(world.direction(), Direction::Down);
        assert_eq!(world.snake_head(), 9);
        assert_eq!(world.pending_direction(), None);
    }

    #[test]
    fn test_last_direction_request_wins() {
        let mut world = playing(4, vec![5], Direction::Right, 15);
        world.change_snake_dir(Direction::Up);
        world.change_snake_dir(Direction::Down);
        world.step();
        assert_eq!(world.snake_head(), 9);
    }

    #[test]
    fn test_reversal_rejected_for_long_snake() {
        let mut world = playing(4, vec![5, 4], Direction::Right, 15);
        world.change_snake_dir(Direction::Left);
        assert_eq!(world.pending_direction(), None);
        assert_eq!(world.step(), StepOutcome::Moved);
        assert_eq!(world.snake_cells(), &[6, 5]);
    }

    #[test]
    fn test_rejected_reversal_keeps_earlier_request() {
        let mut world = playing(4, vec![5, 4], Direction::Right, 15);
        world.change_snake_dir(Direction::Up);
        world.change_snake_dir(Direction::Left);
        assert_eq!(world.pending_direction(), Some(Direction::Up));
    }

    #[test]
    fn test_single_cell_snake_may_reverse() {
        let mut world = playing(4, vec![5], Direction::Right, 15);
        world.step();
        world.change_snake_dir(Direction::Left);
        assert_eq!(world.step(), StepOutcome::Moved);
        assert_eq!(world.snake_head(), 5);
        assert_eq!(world.status(), GameStatus::Played);
    }

    #[test]
    fn test_self_collision() {
        // Body curls around so turning Right hits segment 3
        //   row0: . o o .
        //   row1: . H o .
        //   row2: . . o .
        let mut world = playing(4, vec![5, 1, 2, 6, 10], Direction::Down, 15);
        let before = world.snapshot();
        world.change_snake_dir(Direction::Up);
        // Up from a head moving Down is a reversal and is ignored; go Right instead
        assert_eq!(world.pending_direction(), None);
        world.change_snake_dir(Direction::Right);
        assert_eq!(world.step(), StepOutcome::Collided);
        assert_eq!(world.status(), GameStatus::Lost);
        // No mutation besides status and tick
        assert_eq!(world.snake_cells(), before.snake.as_slice());
        assert_eq!(world.points(), before.points);
    }

    #[test]
    fn test_moving_into_vacated_tail_is_safe() {
        // Square loop: head chases its own tail
        let mut world = playing(4, vec![5, 1, 0, 4], Direction::Down, 15);
        world.change_snake_dir(Direction::Left);
        assert_eq!(world.step(), StepOutcome::Moved);
        assert_eq!(world.snake_cells(), &[4, 5, 1, 0]);
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let mut world = playing(4, vec![5, 1, 2, 6, 10], Direction::Down, 15);
        world.change_snake_dir(Direction::Right);
        assert_eq!(world.step(), StepOutcome::Collided);

        let frozen = world.snapshot();
        world.change_snake_dir(Direction::Left);
        world.start_game();
        assert_eq!(world.step(), StepOutcome::Idle);
        assert_eq!(world.snapshot(), frozen);
    }

    #[test]
    fn test_lost_snapshot_restores() {
        // 4x4 grid, head 5 turns Down into its own body at 9
        let mut world = playing(4, vec![5, 4, 8, 9, 10], Direction::Right, 15);
        world.change_snake_dir(Direction::Down);
        assert_eq!(world.step(), StepOutcome::Collided);

        let snapshot = world.snapshot();
        assert_eq!(snapshot.direction, Direction::Down);
        let restored = World::restore(&snapshot, Pcg32::seed_from_u64(3)).unwrap();
        assert_eq!(restored.snapshot(), snapshot);
    }

    #[test]
    fn test_filling_grid_wins() {
        // 2x2 grid: cells 0 1 / 2 3. Head 2 turns Right onto the last free cell.
        let mut world = playing(2, vec![2, 0, 1], Direction::Down, 3);
        world.change_snake_dir(Direction::Right);
        assert_eq!(world.step(), StepOutcome::Won);
        assert_eq!(world.status(), GameStatus::Won);
        assert_eq!(world.status_text(), "Won");
        assert_eq!(world.reward_cell(), None);
        assert_eq!(world.snake_len(), 4);
        assert_eq!(world.points(), 1);
        assert_eq!(world.step(), StepOutcome::Idle);
    }

    #[test]
    fn test_determinism() {
        // Two worlds with the same seed and inputs stay identical
        let mut a = World::with_seed(6, 8, 99999).unwrap();
        let mut b = World::with_seed(6, 8, 99999).unwrap();
        a.start_game();
        b.start_game();

        let turns = [
            Some(Direction::Down),
            None,
            Some(Direction::Left),
            None,
            Some(Direction::Up),
            Some(Direction::Right),
            None,
        ];
        for _ in 0..10 {
            for turn in turns {
                if let Some(direction) = turn {
                    a.change_snake_dir(direction);
                    b.change_snake_dir(direction);
                }
                assert_eq!(a.step(), b.step());
                assert_eq!(a.snapshot(), b.snapshot());
            }
        }
    }
}
