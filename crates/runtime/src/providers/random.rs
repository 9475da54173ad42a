//! Enemy auto-planner: uniformly random cards and targets.

use std::collections::{HashMap, HashSet};

use clash_core::{BattleState, CardId, Side, SlotId, UnitId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::api::{Commitment, PlanProvider};

/// Random planner seeded for reproducible battles.
///
/// Walks the side's slots in action order and, for every rolled slot whose
/// owner can act, picks a random affordable card and a random opposing slot.
/// Light and cards already chosen earlier in the same plan are accounted for,
/// so every commitment of a plan is accepted by the engine.
#[derive(Debug, Clone)]
pub struct RandomPlanner {
    rng: StdRng,
}

impl RandomPlanner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PlanProvider for RandomPlanner {
    fn plan(&mut self, side: Side, state: &BattleState) -> Vec<Commitment> {
        let targets: Vec<SlotId> = state
            .slots
            .iter()
            .filter(|slot| {
                state
                    .unit(slot.owner)
                    .is_some_and(|owner| owner.side == side.opposing() && !owner.is_dead())
            })
            .map(|slot| slot.id)
            .collect();
        if targets.is_empty() {
            return Vec::new();
        }

        let mut light: HashMap<UnitId, u32> = HashMap::new();
        let mut chosen: HashSet<CardId> = HashSet::new();
        let mut plan = Vec::new();

        for slot in state.side_slots_in_order(side) {
            if slot.priority.is_none() || slot.card.is_some() {
                continue;
            }
            let Some(owner) = state.unit(slot.owner) else {
                continue;
            };
            if owner.is_dead() || owner.is_incapacitated() {
                continue;
            }

            let available = *light.entry(owner.id).or_insert(owner.light.current);
            let playable: Vec<(CardId, u32)> = owner
                .deck
                .hand()
                .iter()
                .filter(|card| card.cost <= available && !chosen.contains(&card.id))
                .map(|card| (card.id, card.cost))
                .collect();

            let Some(&(card, cost)) = playable.choose(&mut self.rng) else {
                tracing::debug!("{} has no playable card for {}", owner.name, slot.id);
                continue;
            };
            let Some(&target) = targets.choose(&mut self.rng) else {
                continue;
            };

            light.insert(owner.id, available - cost);
            chosen.insert(card);
            plan.push(Commitment {
                slot: slot.id,
                card,
                target,
            });
        }

        plan
    }
}
