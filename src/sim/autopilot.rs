//! Demo controller
//!
//! Greedy one-step lookahead: avoid cells that end the game, then head for the
//! reward along the shorter way round the torus. Good enough to drive a demo or
//! push a small board into a terminal state; not a solver.

use rand::Rng;

use super::state::{Direction, GameStatus, World};
use super::tick::StepOutcome;

/// Pick the direction to request before the next step.
///
/// Returns `None` when the game is not being played. Ties are broken in
/// [`Direction::ALL`] order.
pub fn choose_direction<R>(world: &World<R>) -> Option<Direction> {
    if world.status() != GameStatus::Played {
        return None;
    }

    let grid = world.grid();
    let snake = world.snake();
    let reward = world.reward_cell();

    Direction::ALL
        .into_iter()
        .filter(|&d| !snake.is_reversal(d))
        .min_by_key(|&d| {
            let next = grid.neighbor(snake.head(), d);
            let grows = reward == Some(next);
            let unsafe_move = snake.collides(next, grows);
            let distance = reward.map_or(0, |r| grid.distance(next, r));
            (unsafe_move, distance)
        })
}

/// Steer and step until the game ends or `max_steps` steps have run.
///
/// Returns the outcome of the last step taken.
pub fn drive<R: Rng>(world: &mut World<R>, max_steps: u64) -> StepOutcome {
    let mut last = StepOutcome::Idle;
    for _ in 0..max_steps {
        if let Some(direction) = choose_direction(world) {
            world.change_snake_dir(direction);
        }
        last = world.step();
        if last.is_terminal() || last == StepOutcome::Idle {
            break;
        }
    }
    last
}
