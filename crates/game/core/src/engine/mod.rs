//! Round lifecycle, planning input and resolution.
//!
//! [`BattleEngine`] is the only writer of [`BattleState`] outside the
//! resolver. A round runs as follows:
//!
//! 1. [`BattleEngine::start_round`] regenerates light, resets slots, draws and
//!    rolls priorities, then computes the action order
//! 2. planners feed [`BattleEngine::commit`] / [`BattleEngine::withdraw`]
//! 3. [`BattleEngine::begin_resolution`] freezes the pairing into a
//!    [`Resolver`], which is stepped until it reports
//!    [`StepOutcome::Drained`]

mod errors;
mod events;
mod planning;
mod resolver;
mod round;

pub use errors::CommitError;
pub use events::BattleEvent;
pub use resolver::{ResolvePhase, Resolver, ResolverPair, StepOutcome, StepPlan, StepResult};
pub use round::RoundReport;

use crate::combat::{self, ClashInfo};
use crate::config::BattleConfig;
use crate::state::{BattleState, Side};

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    /// Every unit of the other side is dead.
    Victory(Side),
    /// Both sides were wiped out.
    Draw,
}

impl core::fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Victory(side) => write!(f, "{side} victory"),
            Self::Draw => f.write_str("draw"),
        }
    }
}

/// Battle engine borrowing the state and configuration for one operation.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
    config: &'a BattleConfig,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState, config: &'a BattleConfig) -> Self {
        Self { state, config }
    }

    #[inline]
    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// Current pairing of committed slots. Side-effect free.
    pub fn evaluate_clashes(&self) -> Vec<ClashInfo> {
        combat::evaluate(self.state)
    }

    /// Freezes the current pairing into a resolver queue.
    pub fn begin_resolution(&self) -> Resolver {
        Resolver::new(&self.evaluate_clashes())
    }

    /// Decided outcome, or `None` while both sides still stand.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        outcome(self.state)
    }
}

/// Decided outcome of `state`, or `None` while both sides still stand.
pub fn outcome(state: &BattleState) -> Option<BattleOutcome> {
    match (state.side_alive(Side::Ally), state.side_alive(Side::Enemy)) {
        (true, true) => None,
        (true, false) => Some(BattleOutcome::Victory(Side::Ally)),
        (false, true) => Some(BattleOutcome::Victory(Side::Enemy)),
        (false, false) => Some(BattleOutcome::Draw),
    }
}
