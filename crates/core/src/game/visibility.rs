//! Straight-line sight checks for ranged attackers.

use crate::state::Grid;
use crate::types::Pos;

/// Samples the cells strictly between `from` and `to` on a stepped line, using
/// floor division for the intermediate coordinates. Any wall blocks the line.
pub fn has_line_of_sight(grid: &Grid, from: Pos, to: Pos) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = dx.abs().max(dy.abs());
    (1..steps).all(|i| {
        let sample =
            Pos { y: from.y + (dy * i).div_euclid(steps), x: from.x + (dx * i).div_euclid(steps) };
        grid.is_passable(sample)
    })
}
