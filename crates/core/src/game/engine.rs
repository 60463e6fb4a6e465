//! Simulation engine composition for tick advancement.
//! This file wires the advance loop and the per-tick frame together.

use super::*;

mod advance;
mod frame;

use frame::FrameOutcome;
