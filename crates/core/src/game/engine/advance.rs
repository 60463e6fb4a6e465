//! Tick loop and stop-reason handling for the game engine.

use super::*;

impl Game {
    /// Runs dungeon ticks until the visit ends, the run finishes or `max_ticks`
    /// have been simulated. Nothing is simulated outside a dungeon visit.
    pub fn advance(&mut self, max_ticks: u32) -> AdvanceResult {
        let mut ticks = 0;
        while ticks < max_ticks {
            let node = match &self.state.phase {
                RunPhase::Dungeon { node } => node.clone(),
                RunPhase::Victory => return finished(ticks, RunOutcome::Victory),
                RunPhase::GameOver => return finished(ticks, RunOutcome::Defeat),
                RunPhase::MapView => {
                    return AdvanceResult {
                        simulated_ticks: ticks,
                        stop_reason: AdvanceStopReason::NotInDungeon,
                    };
                }
            };

            let Some(outcome) = self.run_frame(&node) else {
                log::warn!("dungeon phase for `{node}` has no active visit; returning to the map");
                self.state.visit = None;
                self.state.phase = RunPhase::MapView;
                return AdvanceResult {
                    simulated_ticks: ticks,
                    stop_reason: AdvanceStopReason::NotInDungeon,
                };
            };
            self.tick += 1;
            ticks += 1;

            let stop_reason = match outcome {
                FrameOutcome::Continue => continue,
                FrameOutcome::Defeat => self.record_defeat(),
                FrameOutcome::Completed => self.complete_visit(&node),
            };
            return AdvanceResult { simulated_ticks: ticks, stop_reason };
        }
        AdvanceResult { simulated_ticks: ticks, stop_reason: AdvanceStopReason::BudgetExhausted }
    }
}

fn finished(ticks: u32, outcome: RunOutcome) -> AdvanceResult {
    AdvanceResult { simulated_ticks: ticks, stop_reason: AdvanceStopReason::Finished(outcome) }
}
