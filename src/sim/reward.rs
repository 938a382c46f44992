//! Reward placement
//!
//! The reward goes on a cell chosen uniformly among those the snake does not
//! cover. Selection is a single pass over the grid with `IteratorRandom::choose`,
//! so the result depends only on the free-cell set and the RNG stream.

use rand::Rng;
use rand::seq::IteratorRandom;

use super::grid::Grid;

/// Pick a free cell for the reward, or `None` when the snake fills the grid
pub fn place_reward<R: Rng + ?Sized>(grid: &Grid, snake: &[usize], rng: &mut R) -> Option<usize> {
    let mut occupied = vec![false; grid.size()];
    for &idx in snake {
        if let Some(cell) = occupied.get_mut(idx) {
            *cell = true;
        }
    }

    let reward = grid.cells().filter(|&idx| !occupied[idx]).choose(rng);
    match reward {
        Some(idx) => log::debug!("Placed reward at {}", idx),
        None => log::debug!("No free cell left for a reward"),
    }
    reward
}
