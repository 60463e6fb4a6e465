use serde::{Deserialize, Serialize};

use crate::config::Tuning;
use crate::types::PlayerCommand;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Everything needed to re-run a session: the seed, the tuning it ran with and
/// every accepted input stamped with the tick it was applied at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    pub tuning: Tuning,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub tick: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputPayload {
    EnterNode { node: String },
    Command(PlayerCommand),
    ReturnToMap,
    Restart,
}

impl InputJournal {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, seed, tuning, inputs: Vec::new() }
    }

    pub fn append(&mut self, tick: u64, payload: InputPayload) {
        debug_assert!(self.inputs.last().is_none_or(|last| last.tick <= tick));
        self.inputs.push(InputRecord { tick, payload });
    }
}
