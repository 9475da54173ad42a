//! Replays a fixed sequence of round plans.

use std::collections::VecDeque;

use clash_core::{BattleState, Side};

use crate::api::{Commitment, PlanProvider};

/// Returns one queued plan per call, then empty plans once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlanner {
    rounds: VecDeque<Vec<Commitment>>,
}

impl ScriptedPlanner {
    pub fn new(rounds: impl IntoIterator<Item = Vec<Commitment>>) -> Self {
        Self {
            rounds: rounds.into_iter().collect(),
        }
    }

    /// Appends a plan for a later round.
    pub fn push(&mut self, plan: Vec<Commitment>) {
        self.rounds.push_back(plan);
    }

    pub fn remaining(&self) -> usize {
        self.rounds.len()
    }
}

impl PlanProvider for ScriptedPlanner {
    fn plan(&mut self, _side: Side, _state: &BattleState) -> Vec<Commitment> {
        self.rounds.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clash_core::{CardId, SlotId};

    #[test]
    fn replays_in_order_then_idles() {
        let first = vec![Commitment {
            slot: SlotId(0),
            card: CardId(1),
            target: SlotId(1),
        }];
        let mut planner = ScriptedPlanner::new([first.clone(), Vec::new()]);
        let state = BattleState::new(0);

        assert_eq!(planner.plan(Side::Ally, &state), first);
        assert!(planner.plan(Side::Ally, &state).is_empty());
        assert_eq!(planner.remaining(), 0);
        assert!(planner.plan(Side::Ally, &state).is_empty());
    }
}
