//! Projectile flight and enemy attack resolution.
//! This module exists to keep damage and cooldown rules apart from movement decisions.
//! It does not own the per-tick ordering or the experience bookkeeping of kills.

use super::visibility::has_line_of_sight;
use crate::config::Tuning;
use crate::state::{Enemy, Grid, Projectile};
use crate::types::*;

/// Pixel centre of a cell.
pub(super) fn cell_center(pos: Pos, cell_size: f32) -> (f32, f32) {
    let half = cell_size / 2.0;
    (pos.x as f32 * cell_size + half, pos.y as f32 * cell_size + half)
}

pub(super) fn player_shot(from: Pos, direction: Direction, tuning: &Tuning) -> Projectile {
    let (x, y) = cell_center(from, tuning.cell_size);
    let (dx, dy) = direction.delta();
    Projectile {
        x,
        y,
        dx: dx as f32,
        dy: dy as f32,
        speed: tuning.player_projectile_speed,
        active: true,
        owner: None,
    }
}

/// A unit-length shot from `from` towards `target`. A zero-length aim yields a
/// shot that never moves.
pub(super) fn enemy_shot(owner: EnemyId, from: Pos, target: Pos, tuning: &Tuning) -> Projectile {
    let (x, y) = cell_center(from, tuning.cell_size);
    let mut dx = (target.x - from.x) as f32;
    let mut dy = (target.y - from.y) as f32;
    let length = dx.hypot(dy);
    if length > 0.0 {
        dx /= length;
        dy /= length;
    } else {
        dx = 0.0;
        dy = 0.0;
    }
    Projectile { x, y, dx, dy, speed: tuning.enemy_projectile_speed, active: true, owner: Some(owner) }
}

/// Moves a projectile one step and deactivates it when it leaves the pixel
/// bounds of the grid or enters a wall cell.
pub(super) fn advance_projectile(projectile: &mut Projectile, grid: &Grid, cell_size: f32) {
    if !projectile.active {
        return;
    }
    projectile.x += projectile.dx * projectile.speed;
    projectile.y += projectile.dy * projectile.speed;

    let pixel_width = grid.width() as f32 * cell_size;
    let pixel_height = grid.height() as f32 * cell_size;
    if projectile.x < 0.0
        || projectile.x >= pixel_width
        || projectile.y < 0.0
        || projectile.y >= pixel_height
    {
        projectile.active = false;
        return;
    }
    if grid.cell(projectile.cell(cell_size)) == CellKind::Wall {
        projectile.active = false;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(super) enum AttackOutcome {
    Idle,
    Struck { damage: i32 },
    Fired(Projectile),
}

/// Runs the attack half of an enemy's turn against a player standing at `target`.
pub(super) fn resolve_attack(
    id: EnemyId,
    enemy: &mut Enemy,
    target: Pos,
    grid: &Grid,
    tuning: &Tuning,
) -> AttackOutcome {
    let distance = manhattan(enemy.pos, target);
    if distance > enemy.attack_range {
        enemy.attack_timer = 0;
        return AttackOutcome::Idle;
    }
    if enemy.attack_timer > 0 {
        enemy.attack_timer -= 1;
        return AttackOutcome::Idle;
    }

    if enemy.ranged {
        if !has_line_of_sight(grid, enemy.pos, target) {
            return AttackOutcome::Idle;
        }
        enemy.attack_timer = tuning.ranged_cooldown;
        return AttackOutcome::Fired(enemy_shot(id, enemy.pos, target, tuning));
    }
    if distance == 1 {
        enemy.attack_timer = tuning.melee_cooldown;
        return AttackOutcome::Struck { damage: enemy.damage };
    }
    AttackOutcome::Idle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::enemy_at;

    fn steps_until_inactive(projectile: &mut Projectile, grid: &Grid) -> u32 {
        let mut steps = 0;
        while projectile.active {
            advance_projectile(projectile, grid, 25.0);
            steps += 1;
            assert!(steps < 1_000, "projectile never stopped");
        }
        steps
    }

    #[test]
    fn shots_start_at_the_cell_centre() {
        let shot = player_shot(Pos { y: 2, x: 3 }, Direction::Left, &Tuning::default());
        assert_eq!((shot.x, shot.y), (87.5, 62.5));
        assert_eq!((shot.dx, shot.dy), (-1.0, 0.0));
        assert_eq!(shot.speed, 5.0);
        assert!(!shot.is_enemy_projectile());
    }

    #[test]
    fn projectile_leaves_the_grid_at_the_first_step_past_its_pixel_edge() {
        // 12.5 + 5k first reaches 100 at k = 18.
        let grid = Grid::filled(4, 1, CellKind::Empty);
        let mut shot = player_shot(Pos { y: 0, x: 0 }, Direction::Right, &Tuning::default());
        assert_eq!(steps_until_inactive(&mut shot, &grid), 18);
        assert_eq!(shot.x, 102.5);
    }

    #[test]
    fn projectile_stops_on_entering_a_wall_cell() {
        // The wall cell starts at x = 75, first reached at k = 13.
        let grid = Grid::from_rows(&["...#"]);
        let mut shot = player_shot(Pos { y: 0, x: 0 }, Direction::Right, &Tuning::default());
        assert_eq!(steps_until_inactive(&mut shot, &grid), 13);
        assert_eq!(shot.cell(25.0), Pos { y: 0, x: 3 });
    }

    #[test]
    fn enemy_shots_are_normalised_and_zero_aim_stays_put() {
        let tuning = Tuning::default();
        let shot = enemy_shot(EnemyId::default(), Pos { y: 0, x: 0 }, Pos { y: 4, x: 3 }, &tuning);
        assert!((shot.dx - 0.6).abs() < 1e-6);
        assert!((shot.dy - 0.8).abs() < 1e-6);
        assert_eq!(shot.speed, 3.0);
        assert!(shot.is_enemy_projectile());

        let grid = Grid::filled(3, 3, CellKind::Empty);
        let mut still = enemy_shot(EnemyId::default(), Pos { y: 1, x: 1 }, Pos { y: 1, x: 1 }, &tuning);
        advance_projectile(&mut still, &grid, tuning.cell_size);
        assert!(still.active);
        assert_eq!((still.x, still.y), (37.5, 37.5));
    }

    #[test]
    fn melee_strikes_when_adjacent_then_waits_out_its_cooldown() {
        let tuning = Tuning::default();
        let grid = Grid::filled(5, 5, CellKind::Empty);
        let mut goblin = enemy_at(EnemyKind::Goblin, Pos { y: 1, x: 1 });
        let player = Pos { y: 2, x: 1 };

        let first = resolve_attack(EnemyId::default(), &mut goblin, player, &grid, &tuning);
        assert_eq!(first, AttackOutcome::Struck { damage: goblin.damage });
        assert_eq!(goblin.attack_timer, 30);
        for _ in 0..30 {
            assert_eq!(
                resolve_attack(EnemyId::default(), &mut goblin, player, &grid, &tuning),
                AttackOutcome::Idle
            );
        }
        assert_eq!(goblin.attack_timer, 0);
        assert!(matches!(
            resolve_attack(EnemyId::default(), &mut goblin, player, &grid, &tuning),
            AttackOutcome::Struck { .. }
        ));
    }

    #[test]
    fn leaving_attack_range_resets_the_cooldown() {
        let tuning = Tuning::default();
        let grid = Grid::filled(8, 8, CellKind::Empty);
        let mut goblin = enemy_at(EnemyKind::Goblin, Pos { y: 1, x: 1 });
        resolve_attack(EnemyId::default(), &mut goblin, Pos { y: 1, x: 2 }, &grid, &tuning);
        assert_eq!(goblin.attack_timer, 30);
        let outcome = resolve_attack(EnemyId::default(), &mut goblin, Pos { y: 6, x: 6 }, &grid, &tuning);
        assert_eq!(outcome, AttackOutcome::Idle);
        assert_eq!(goblin.attack_timer, 0);
    }

    #[test]
    fn ranged_attack_needs_line_of_sight() {
        let tuning = Tuning::default();
        let open = Grid::from_rows(&["#######", "#.....#", "#######"]);
        let mut walled = open.clone();
        walled.set_cell(Pos { y: 1, x: 3 }, CellKind::Wall);
        let player = Pos { y: 1, x: 5 };

        let mut archer = enemy_at(EnemyKind::Archer, Pos { y: 1, x: 1 });
        assert_eq!(
            resolve_attack(EnemyId::default(), &mut archer, player, &walled, &tuning),
            AttackOutcome::Idle
        );
        assert_eq!(archer.attack_timer, 0);

        let AttackOutcome::Fired(shot) =
            resolve_attack(EnemyId::default(), &mut archer, player, &open, &tuning)
        else {
            panic!("archer with a clear line should fire");
        };
        assert_eq!(shot.owner, Some(EnemyId::default()));
        assert_eq!((shot.dx, shot.dy), (1.0, 0.0));
        assert_eq!(archer.attack_timer, 60);
    }
}
