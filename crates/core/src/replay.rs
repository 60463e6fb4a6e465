use crate::{
    GameError, RunPhase,
    game::Game,
    journal::{InputJournal, InputPayload},
};

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    InputRejected { tick: u64, error: GameError },
    InputInPast { tick: u64 },
    StalledBeforeInput { tick: u64 },
    InvalidTuning(String),
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub final_phase: RunPhase,
    pub final_snapshot_hash: u64,
    pub final_tick: u64,
}

pub fn apply_input(game: &mut Game, payload: &InputPayload) -> Result<(), GameError> {
    match payload {
        InputPayload::EnterNode { node } => game.enter_node(node),
        InputPayload::Command(command) => game.apply_command(*command),
        InputPayload::ReturnToMap => game.return_to_map(),
        InputPayload::Restart => {
            game.restart();
            Ok(())
        }
    }
}

/// Re-runs a journal from its seed. Each input is applied once the simulation
/// reaches its tick; after the last one at most `trailing_ticks` more are simulated.
pub fn replay_to_end(journal: &InputJournal, trailing_ticks: u32) -> Result<ReplayResult, ReplayError> {
    journal.tuning.validate().map_err(|err| ReplayError::InvalidTuning(err.to_string()))?;
    let mut game = Game::new(journal.seed, journal.tuning.clone());

    for record in &journal.inputs {
        while game.current_tick() < record.tick {
            let gap = u32::try_from(record.tick - game.current_tick()).unwrap_or(u32::MAX);
            if game.advance(gap).simulated_ticks == 0 {
                return Err(ReplayError::StalledBeforeInput { tick: record.tick });
            }
        }
        if game.current_tick() > record.tick {
            return Err(ReplayError::InputInPast { tick: record.tick });
        }
        apply_input(&mut game, &record.payload)
            .map_err(|error| ReplayError::InputRejected { tick: record.tick, error })?;
    }
    game.advance(trailing_ticks);

    Ok(ReplayResult {
        final_phase: game.phase().clone(),
        final_snapshot_hash: game.snapshot_hash(),
        final_tick: game.current_tick(),
    })
}
