//! Authoritative battle state.
//!
//! Units and velocity slots live in flat arenas indexed by [`UnitId`] and
//! [`SlotId`]. Cross references (slot owner, slot target) are handles into
//! these arenas. Runtime layers read this state freely but mutate it through
//! the engine.
pub mod error;
pub mod types;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
pub use error::StateError;
pub use types::{
    Card, CardDice, CardError, CardId, Deck, Dice, DiceClass, DiceError, DiceKind, DrawReport,
    ResourceMeter, Side, SlotId, SpeedRange, Unit, UnitId, UnitSpec, VelocitySlot,
};

/// Canonical snapshot of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// RNG seed for the whole battle. Set once and never modified.
    pub seed: u64,

    /// Random event counter. Combined with `seed` for every roll and shuffle.
    nonce: u64,

    /// Current round, 0 before the first round starts.
    pub round: u32,

    pub units: Vec<Unit>,
    pub slots: Vec<VelocitySlot>,

    /// Action order computed at the last round start (highest priority first).
    pub order: Vec<SlotId>,

    /// Next selection stamp handed out to a committed slot.
    next_selection: u64,
}

impl BattleState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            nonce: 0,
            round: 0,
            units: Vec::new(),
            slots: Vec::new(),
            order: Vec::new(),
            next_selection: 0,
        }
    }

    /// Adds a unit built from `spec` together with its velocity slots.
    pub fn spawn(&mut self, spec: UnitSpec, config: &BattleConfig) -> Result<UnitId, StateError> {
        if spec.slot_count == 0 {
            return Err(StateError::NoSlots { name: spec.name });
        }
        if spec.slot_count > BattleConfig::MAX_SLOTS_PER_UNIT {
            return Err(StateError::TooManySlots {
                name: spec.name,
                requested: spec.slot_count,
                max: BattleConfig::MAX_SLOTS_PER_UNIT,
            });
        }
        if spec.speed.min > spec.speed.max {
            return Err(StateError::InvalidSpeed {
                name: spec.name,
                min: spec.speed.min,
                max: spec.speed.max,
            });
        }

        let id = UnitId(self.units.len() as u32);
        let mut slots = ArrayVec::new();
        for _ in 0..spec.slot_count {
            let slot_id = SlotId(self.slots.len() as u32);
            self.slots.push(VelocitySlot::new(slot_id, id, spec.speed));
            slots.push(slot_id);
        }

        self.units.push(Unit {
            id,
            name: spec.name,
            side: spec.side,
            hp: ResourceMeter::full(spec.max_hp),
            composure: ResourceMeter::full(spec.max_composure),
            light: ResourceMeter::full(spec.max_light),
            speed: spec.speed,
            resistances: spec.resistances,
            deck: Deck::new(spec.pool, config.hand_limit),
            slots,
            leftover: Vec::new(),
        });

        Ok(id)
    }

    #[inline]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0 as usize)
    }

    #[inline]
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id.0 as usize)
    }

    #[inline]
    pub fn slot(&self, id: SlotId) -> Option<&VelocitySlot> {
        self.slots.get(id.0 as usize)
    }

    #[inline]
    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut VelocitySlot> {
        self.slots.get_mut(id.0 as usize)
    }

    /// Owner of a slot.
    pub fn slot_owner(&self, id: SlotId) -> Option<&Unit> {
        self.slot(id).and_then(|slot| self.unit(slot.owner))
    }

    /// Units fighting for `side`, in roster order.
    pub fn side_units(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |unit| unit.side == side)
    }

    /// Slots of `side` in the current action order.
    pub fn side_slots_in_order(&self, side: Side) -> impl Iterator<Item = &VelocitySlot> {
        self.order
            .iter()
            .filter_map(|id| self.slot(*id))
            .filter(move |slot| self.unit(slot.owner).is_some_and(|owner| owner.side == side))
    }

    /// Whether at least one unit of `side` is still alive.
    pub fn side_alive(&self, side: Side) -> bool {
        self.side_units(side).any(|unit| !unit.is_dead())
    }

    #[inline]
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Returns the current nonce and advances it.
    pub fn next_nonce(&mut self) -> u64 {
        let nonce = self.nonce;
        self.nonce = self.nonce.wrapping_add(1);
        nonce
    }

    /// Returns the next selection stamp and advances it.
    pub(crate) fn next_selection(&mut self) -> u64 {
        let stamp = self.next_selection;
        self.next_selection += 1;
        stamp
    }

    /// One status line per unit, in roster order.
    pub fn summaries(&self) -> Vec<UnitSummary> {
        self.units
            .iter()
            .map(|unit| UnitSummary {
                id: unit.id,
                name: unit.name.clone(),
                side: unit.side,
                hp: unit.hp,
                composure: unit.composure,
                light: unit.light,
                hand: unit.deck.hand().len(),
                leftover: unit.leftover.len(),
                slots: unit
                    .slots
                    .iter()
                    .filter_map(|id| self.slot(*id))
                    .map(|slot| SlotSummary {
                        id: slot.id,
                        priority: slot.priority,
                        card: slot.card.as_ref().map(|card| card.name.clone()),
                        target: slot.target,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Read-only status of a unit, for logs and debugging.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSummary {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    pub hp: ResourceMeter,
    pub composure: ResourceMeter,
    pub light: ResourceMeter,
    pub hand: usize,
    pub leftover: usize,
    pub slots: Vec<SlotSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotSummary {
    pub id: SlotId,
    pub priority: Option<u32>,
    pub card: Option<String>,
    pub target: Option<SlotId>,
}

impl core::fmt::Display for UnitSummary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} {} [{}] hp {} composure {} light {} hand {}",
            self.id, self.name, self.side, self.hp, self.composure, self.light, self.hand
        )?;
        for slot in &self.slots {
            match (slot.priority, &slot.card, slot.target) {
                (Some(priority), Some(card), Some(target)) => {
                    write!(f, " | {} ({priority}) {card} -> {target}", slot.id)?
                }
                (Some(priority), _, _) => write!(f, " | {} ({priority})", slot.id)?,
                (None, _, _) => write!(f, " | {} (-)", slot.id)?,
            }
        }
        Ok(())
    }
}
