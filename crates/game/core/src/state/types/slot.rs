//! Velocity slots: one timed commitment per slot per round.

use super::{Card, SlotId, SpeedRange, UnitId};
use crate::env::{RngOracle, compute_seed, context};

/// One committed timed action of a unit.
///
/// `target` is a handle to another slot in the same arena. It is a plain
/// back-reference and carries no ownership.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VelocitySlot {
    pub id: SlotId,
    pub owner: UnitId,
    pub speed: SpeedRange,

    /// Rolled priority for the current round. `None` when the owner could not roll.
    pub priority: Option<u32>,
    /// Card checked out of the owner's hand.
    pub card: Option<Card>,
    pub target: Option<SlotId>,
    /// Monotonic stamp assigned at commit time. Used to break interception ties.
    pub selection_order: Option<u64>,
}

impl VelocitySlot {
    pub fn new(id: SlotId, owner: UnitId, speed: SpeedRange) -> Self {
        Self {
            id,
            owner,
            speed,
            priority: None,
            card: None,
            target: None,
            selection_order: None,
        }
    }

    /// Clears the round's commitment. Returns the card that was in play, if any.
    pub fn reset(&mut self) -> Option<Card> {
        self.priority = None;
        self.target = None;
        self.selection_order = None;
        self.card.take()
    }

    /// Rolls a fresh priority in the slot's speed range and stores it.
    pub fn roll(&mut self, rng: &(impl RngOracle + ?Sized), battle_seed: u64, nonce: u64) -> u32 {
        let seed = compute_seed(battle_seed, nonce, self.owner.0, context::VELOCITY_ROLL);
        let value = rng.range(seed, self.speed.min, self.speed.max);
        self.priority = Some(value);
        value
    }

    /// Slot has everything the clash evaluator needs.
    #[inline]
    pub fn is_committed(&self) -> bool {
        self.priority.is_some() && self.card.is_some() && self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::{Dice, DiceKind};

    #[test]
    fn roll_stays_in_speed_range() {
        let mut slot = VelocitySlot::new(SlotId(0), UnitId(0), SpeedRange::new(2, 4));
        for nonce in 0..40 {
            let value = slot.roll(&PcgRng, 5, nonce);
            assert!((2..=4).contains(&value));
            assert_eq!(slot.priority, Some(value));
        }
    }

    #[test]
    fn reset_hands_back_card() {
        let mut slot = VelocitySlot::new(SlotId(0), UnitId(0), SpeedRange::new(1, 6));
        slot.roll(&PcgRng, 1, 1);
        slot.card = Some(Card::new("Jab", 1, [Dice::new(DiceKind::Slash, 1, 2).unwrap()]).unwrap());
        slot.target = Some(SlotId(1));
        slot.selection_order = Some(0);
        assert!(slot.is_committed());

        let card = slot.reset();
        assert!(card.is_some());
        assert_eq!(slot.priority, None);
        assert_eq!(slot.target, None);
        assert_eq!(slot.selection_order, None);
        assert!(!slot.is_committed());
    }
}
