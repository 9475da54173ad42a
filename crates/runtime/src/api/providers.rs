//! Abstraction for sourcing each side's round plan.
//!
//! Runtime users plug in [`PlanProvider`] implementations so a battle can run
//! with human input, scripted fixtures, or the enemy auto-planner.
use clash_core::{BattleState, CardId, Side, SlotId};

/// One planned commitment, fed to `BattleEngine::commit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Commitment {
    pub slot: SlotId,
    pub card: CardId,
    pub target: SlotId,
}

/// Trait for planning a side's commitments based on the current battle state.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Enemy auto-planning
/// - Scripted/replayed plans
/// - Testing fixtures
///
/// Plans are advisory: the session submits them one by one and skips any the
/// engine rejects.
pub trait PlanProvider: Send {
    /// Plan the commitments of `side` for the round that just started.
    fn plan(&mut self, side: Side, state: &BattleState) -> Vec<Commitment>;
}

impl<P: PlanProvider + ?Sized> PlanProvider for Box<P> {
    fn plan(&mut self, side: Side, state: &BattleState) -> Vec<Commitment> {
        (**self).plan(side, state)
    }
}

/// A provider that never commits anything.
/// Useful for testing or as a fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdlePlanner;

impl PlanProvider for IdlePlanner {
    fn plan(&mut self, _side: Side, _state: &BattleState) -> Vec<Commitment> {
        Vec::new()
    }
}
