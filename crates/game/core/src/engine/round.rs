use crate::env::{RngOracle, compute_seed, context};
use crate::state::{DrawReport, SlotId, UnitId};

use super::BattleEngine;

/// What happened during a battle or round start.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Round number after the call (0 for the battle start).
    pub round: u32,
    /// Draw result per unit, in roster order.
    pub draws: Vec<(UnitId, DrawReport)>,
    /// Action order, highest priority first.
    pub order: Vec<SlotId>,
}

/// Round lifecycle methods for BattleEngine.
impl<'a> BattleEngine<'a> {
    /// Shuffles every deck and draws the opening hands.
    pub fn start_battle(&mut self, rng: &(impl RngOracle + ?Sized)) -> RoundReport {
        let mut draws = Vec::with_capacity(self.state.units.len());

        for index in 0..self.state.units.len() {
            let shuffle_seed = self.shuffle_seed(index);
            let draw_seed = self.shuffle_seed(index);
            let unit = &mut self.state.units[index];
            unit.deck.shuffle(rng, shuffle_seed);
            let report = unit.deck.draw(self.config.opening_hand, rng, draw_seed);
            draws.push((unit.id, report));
        }

        RoundReport {
            round: self.state.round,
            draws,
            order: self.state.order.clone(),
        }
    }

    /// Starts the next round.
    ///
    /// Every unit's slots are reset (cards still in play are discarded). Then
    /// per living unit, in roster order: restore light, draw, and roll every
    /// slot's priority unless the unit is incapacitated. Then sorts all slots into the
    /// action order.
    pub fn start_round(&mut self, rng: &(impl RngOracle + ?Sized)) -> RoundReport {
        self.state.round += 1;
        let mut draws = Vec::with_capacity(self.state.units.len());

        for index in 0..self.state.units.len() {
            let slots = self.state.units[index].slots.clone();
            for slot in &slots {
                if let Some(slot) = self.state.slot_mut(*slot) {
                    slot.reset();
                }
            }

            if self.state.units[index].is_dead() {
                continue;
            }

            let seed = self.shuffle_seed(index);
            let unit = &mut self.state.units[index];
            unit.light.restore(self.config.light_regen);
            let report = unit.deck.draw(self.config.draw_per_round, rng, seed);
            draws.push((unit.id, report));

            if unit.is_incapacitated() {
                continue;
            }
            for slot in &slots {
                let battle_seed = self.state.seed;
                let nonce = self.state.next_nonce();
                if let Some(slot) = self.state.slot_mut(*slot) {
                    slot.roll(rng, battle_seed, nonce);
                }
            }
        }

        self.state.order = self.action_order();

        RoundReport {
            round: self.state.round,
            draws,
            order: self.state.order.clone(),
        }
    }

    /// All slots sorted by `(has priority, priority)` descending. Ties keep
    /// arena order.
    pub fn action_order(&self) -> Vec<SlotId> {
        let mut slots: Vec<_> = self
            .state
            .slots
            .iter()
            .map(|slot| (slot.id, slot.priority))
            .collect();
        slots.sort_by(|(_, a), (_, b)| (b.is_some(), *b).cmp(&(a.is_some(), *a)));
        slots.into_iter().map(|(id, _)| id).collect()
    }

    fn shuffle_seed(&mut self, unit_index: usize) -> u64 {
        let nonce = self.state.next_nonce();
        compute_seed(self.state.seed, nonce, unit_index as u32, context::SHUFFLE)
    }
}
