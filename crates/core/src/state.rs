use rand_chacha::rand_core::Rng;

use crate::config::Tuning;
use crate::content::enemy_profile;
use crate::dag::ProgressionDag;
use crate::roll::{choose, roll_range};
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    pub fn filled(width: usize, height: usize, cell: CellKind) -> Self {
        Self { width, height, cells: vec![cell; width * height] }
    }

    /// Parses `#` walls, `.` floor, `T` treasure and `X` exit. Anything else is a wall.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Self::filled(width, height, CellKind::Wall);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let cell = match glyph {
                    '.' => CellKind::Empty,
                    'T' => CellKind::Treasure,
                    'X' => CellKind::Exit,
                    _ => CellKind::Wall,
                };
                grid.set_cell(Pos { y: y as i32, x: x as i32 }, cell);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell(&self, pos: Pos) -> CellKind {
        if !self.in_bounds(pos) {
            return CellKind::Wall;
        }
        self.cells[self.index(pos)]
    }

    pub fn is_passable(&self, pos: Pos) -> bool {
        self.cell(pos) != CellKind::Wall
    }

    pub fn set_cell(&mut self, pos: Pos, cell: CellKind) {
        debug_assert!(!matches!(cell, CellKind::PlayerMarker | CellKind::EnemyMarker));
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    /// Clears a treasure cell, returning whether there was one.
    pub fn take_treasure(&mut self, pos: Pos) -> bool {
        if self.cell(pos) != CellKind::Treasure {
            return false;
        }
        self.set_cell(pos, CellKind::Empty);
        true
    }

    pub fn count(&self, cell: CellKind) -> usize {
        self.cells.iter().filter(|candidate| **candidate == cell).count()
    }

    /// Every coordinate in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Pos { y: y as i32, x: x as i32 })
        })
    }

    pub fn first_empty(&self) -> Option<Pos> {
        self.positions().find(|pos| self.cell(*pos) == CellKind::Empty)
    }

    pub fn empty_neighbor_count(&self, pos: Pos) -> usize {
        Direction::ALL.iter().filter(|dir| self.cell(pos.step(**dir)) == CellKind::Empty).count()
    }

    /// Copies the cells and stamps actor markers on top, enemies first.
    pub fn overlay(&self, player: Option<Pos>, enemies: &[Pos]) -> Vec<CellKind> {
        let mut cells = self.cells.clone();
        for pos in enemies.iter().copied().chain(player) {
            if self.in_bounds(pos) {
                let marker =
                    if Some(pos) == player { CellKind::PlayerMarker } else { CellKind::EnemyMarker };
                cells[self.index(pos)] = marker;
            }
        }
        cells
    }

    pub fn draw_diag(&self, player: Option<Pos>, enemies: &[Pos]) -> String {
        let cells = self.overlay(player, enemies);
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in cells.chunks(self.width.max(1)) {
            for cell in row {
                out.push(match cell {
                    CellKind::Empty => '.',
                    CellKind::Wall => '#',
                    CellKind::Treasure => 'T',
                    CellKind::Exit => 'X',
                    CellKind::PlayerMarker => '@',
                    CellKind::EnemyMarker => 'e',
                });
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub health: i32,
    pub max_health: i32,
    pub level: u32,
    pub experience: u32,
}

impl Player {
    pub fn new(pos: Pos, max_health: i32) -> Self {
        Self { pos, health: max_health, max_health, level: 1, experience: 0 }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Returns true when this hit left the player at zero health.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = (self.health - amount).max(0);
        self.health == 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Adds experience and applies every level-up it pays for. Surplus past a
    /// threshold carries into the next level. Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u32, tuning: &Tuning) -> u32 {
        self.experience += amount;
        let mut gained = 0;
        while self.experience >= self.level * tuning.experience_per_level {
            self.experience -= self.level * tuning.experience_per_level;
            self.level += 1;
            self.max_health += tuning.level_up_health_bonus;
            self.health = self.max_health;
            gained += 1;
        }
        gained
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatrolState {
    pub origin: Pos,
    pub heading: Direction,
    pub steps_taken: u32,
    pub step_budget: u32,
}

impl PatrolState {
    pub fn new<R: Rng + ?Sized>(origin: Pos, tuning: &Tuning, rng: &mut R) -> Self {
        let mut patrol =
            Self { origin, heading: Direction::Down, steps_taken: 0, step_budget: 0 };
        patrol.reroll(tuning, rng);
        patrol
    }

    pub fn reroll<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) {
        self.heading = choose(rng, &Direction::ALL);
        self.steps_taken = 0;
        self.step_budget = roll_range(rng, tuning.patrol_min_steps, tuning.patrol_max_steps);
    }

    /// Picks a new heading without touching the step budget.
    pub fn turn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.heading = choose(rng, &Direction::ALL);
        self.steps_taken = 0;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub level: u8,
    pub pos: Pos,
    pub health: i32,
    pub max_health: i32,
    pub damage: i32,
    pub alive: bool,
    pub ranged: bool,
    pub attack_range: u32,
    pub move_timer: u32,
    pub attack_timer: u32,
    pub patrol: PatrolState,
}

impl Enemy {
    pub fn spawn<R: Rng + ?Sized>(
        kind: EnemyKind,
        level: u8,
        pos: Pos,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let profile = enemy_profile(kind);
        let health = roll_range(rng, profile.health.0, profile.health.1) as i32;
        let damage = roll_range(rng, profile.damage.0, profile.damage.1) as i32;
        let patrol = PatrolState::new(pos, tuning, rng);
        Self {
            kind,
            level,
            pos,
            health,
            max_health: health,
            damage,
            alive: true,
            ranged: profile.ranged,
            attack_range: profile.attack_range,
            move_timer: 0,
            attack_timer: 0,
            patrol,
        }
    }

    /// Returns true when this hit killed the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// A shot in flight, positioned in pixels on a `cell_size` lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub speed: f32,
    pub active: bool,
    pub owner: Option<EnemyId>,
}

impl Projectile {
    pub fn is_enemy_projectile(&self) -> bool {
        self.owner.is_some()
    }

    pub fn cell(&self, cell_size: f32) -> Pos {
        Pos { y: (self.y / cell_size).floor() as i32, x: (self.x / cell_size).floor() as i32 }
    }
}

/// Transient state of one stay inside a node.
#[derive(Clone, Debug, PartialEq)]
pub struct Visit {
    pub node: String,
    pub facing: Direction,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
}

impl Visit {
    pub fn new(node: &str) -> Self {
        Self {
            node: node.to_string(),
            facing: Direction::Up,
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
        }
    }
}

pub struct GameState {
    pub phase: RunPhase,
    pub dag: ProgressionDag,
    pub player: Option<Player>,
    pub visit: Option<Visit>,
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn out_of_bounds_cells_read_as_walls() {
        let grid = Grid::filled(3, 3, CellKind::Empty);
        assert_eq!(grid.cell(Pos { y: -1, x: 0 }), CellKind::Wall);
        assert_eq!(grid.cell(Pos { y: 0, x: 3 }), CellKind::Wall);
        assert_eq!(grid.cell(Pos { y: 1, x: 1 }), CellKind::Empty);
    }

    #[test]
    fn treasure_is_taken_once() {
        let mut grid = Grid::from_rows(&["#####", "#.T.#", "#####"]);
        let treasure = Pos { y: 1, x: 2 };
        assert!(grid.take_treasure(treasure));
        assert!(!grid.take_treasure(treasure));
        assert_eq!(grid.cell(treasure), CellKind::Empty);
    }

    #[test]
    fn first_empty_scans_row_major() {
        let grid = Grid::from_rows(&["####", "#T.#", "#..#", "####"]);
        assert_eq!(grid.first_empty(), Some(Pos { y: 1, x: 2 }));
    }

    #[test]
    fn overlay_marks_actors_without_touching_the_grid() {
        let grid = Grid::from_rows(&["###", "#.#", "#.#", "###"]);
        let drawn = grid.draw_diag(Some(Pos { y: 1, x: 1 }), &[Pos { y: 2, x: 1 }]);
        assert_eq!(drawn, "###\n#@#\n#e#\n###\n");
        assert_eq!(grid.count(CellKind::Empty), 2);
    }

    #[test]
    fn player_damage_and_heal_clamp_to_bounds() {
        let mut player = Player::new(Pos { y: 0, x: 0 }, 100);
        assert!(!player.take_damage(30));
        player.heal(50);
        assert_eq!(player.health, 100);
        assert!(player.take_damage(250));
        assert_eq!(player.health, 0);
    }

    #[test]
    fn reaching_the_threshold_levels_up_with_full_heal() {
        let tuning = Tuning::default();
        let mut player = Player::new(Pos { y: 0, x: 0 }, 100);
        player.take_damage(40);
        assert_eq!(player.gain_experience(100, &tuning), 1);
        assert_eq!(player.level, 2);
        assert_eq!(player.max_health, 115);
        assert_eq!(player.health, 115);
        assert_eq!(player.experience, 0);
    }

    #[test]
    fn large_experience_gain_carries_surplus_across_levels() {
        let tuning = Tuning::default();
        let mut player = Player::new(Pos { y: 0, x: 0 }, 100);
        assert_eq!(player.gain_experience(350, &tuning), 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.experience, 50);
        assert_eq!(player.max_health, 130);
    }

    #[test]
    fn enemy_dies_once_and_ignores_further_hits() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut enemy =
            Enemy::spawn(EnemyKind::Archer, 3, Pos { y: 2, x: 2 }, &Tuning::default(), &mut rng);
        assert_eq!(enemy.health, 20);
        assert!(!enemy.take_damage(10));
        assert!(enemy.take_damage(10));
        assert!(!enemy.alive);
        assert!(!enemy.take_damage(10));
    }
}
