//! Player actions decoded by the input layer.
//! This module exists to apply moves, shots and leaving to the active visit.
//! It does not own key bindings or any per-tick simulation.

use super::combat::player_shot;
use super::*;

impl Game {
    /// Applies one player action to the active visit.
    pub fn apply_command(&mut self, command: PlayerCommand) -> Result<(), GameError> {
        match command {
            PlayerCommand::Move(direction) => self.move_player(direction),
            PlayerCommand::Shoot(direction) => self.shoot(direction),
            PlayerCommand::Leave => self.leave_visit(),
        }
    }

    /// Steps one cell unless a wall, the grid edge or a living enemy is in the
    /// way. The facing changes either way.
    fn move_player(&mut self, direction: Direction) -> Result<(), GameError> {
        let state = &mut self.state;
        let (Some(visit), Some(player)) = (state.visit.as_mut(), state.player.as_mut()) else {
            return Err(GameError::NotInDungeon);
        };
        let node =
            state.dag.node(&visit.node).ok_or_else(|| GameError::UnknownNode(visit.node.clone()))?;
        let Some(grid) = node.grid.as_ref() else {
            return Err(GameError::NotInDungeon);
        };

        visit.facing = direction;
        let next = player.pos.step(direction);
        let enemy_in_way = node.enemies.values().any(|enemy| enemy.alive && enemy.pos == next);
        if grid.is_passable(next) && !enemy_in_way {
            player.pos = next;
        }
        Ok(())
    }

    fn shoot(&mut self, direction: Option<Direction>) -> Result<(), GameError> {
        let (Some(visit), Some(player)) = (self.state.visit.as_mut(), self.state.player.as_ref())
        else {
            return Err(GameError::NotInDungeon);
        };
        let direction = direction.unwrap_or(visit.facing);
        visit.facing = direction;
        visit.player_projectiles.push(player_shot(player.pos, direction, &self.tuning));
        self.log.push(LogEvent::ProjectileFired { from: player.pos, enemy: None });
        Ok(())
    }
}
