//! Combatants and their resource pools.

use arrayvec::ArrayVec;

use super::{Card, Deck, Dice, DiceKind, ResourceMeter, Side, SlotId, UnitId};
use crate::combat::Resistances;
use crate::config::BattleConfig;

/// Inclusive range a unit's velocity dice roll in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedRange {
    pub min: u32,
    pub max: u32,
}

impl SpeedRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// A combatant taking part in the battle.
///
/// # Invariants
///
/// - `hp`, `composure` and `light` never leave `[0, maximum]` ([`ResourceMeter`] clamps)
/// - `slots` lists the unit's velocity slots in creation order
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub side: Side,

    pub hp: ResourceMeter,
    /// Secondary pool. A unit at zero composure is incapacitated.
    pub composure: ResourceMeter,
    /// Activation pool spent to play cards.
    pub light: ResourceMeter,

    pub speed: SpeedRange,
    pub resistances: Resistances,

    pub deck: Deck,
    pub slots: ArrayVec<SlotId, { BattleConfig::MAX_SLOTS_PER_UNIT }>,

    /// Non-attack dice that went unopposed. Observable only; nothing consumes them yet.
    pub leftover: Vec<Dice>,
}

impl Unit {
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hp.is_empty()
    }

    /// Zero composure ("confused"): cannot commit cards or roll velocity.
    #[inline]
    pub fn is_incapacitated(&self) -> bool {
        self.composure.is_empty()
    }

    /// Whether the unit can currently afford and use `card`.
    pub fn can_play(&self, card: &Card) -> bool {
        !self.is_dead() && !self.is_incapacitated() && self.light.current >= card.cost
    }

    /// Applies HP damage from a die of `kind`. Returns the damage actually taken.
    pub fn take_hp_damage(&mut self, raw: u32, kind: DiceKind) -> u32 {
        let scaled = self.resistances.hp.scale(raw, kind);
        self.hp.drain(scaled)
    }

    /// Applies composure damage from a die of `kind`. Returns the damage actually taken.
    pub fn take_composure_damage(&mut self, raw: u32, kind: DiceKind) -> u32 {
        let scaled = self.resistances.composure.scale(raw, kind);
        self.composure.drain(scaled)
    }

    /// Restores composure. Returns the amount actually restored.
    pub fn heal_composure(&mut self, amount: u32) -> u32 {
        self.composure.restore(amount)
    }
}

/// Blueprint used to add a unit to a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub name: String,
    pub side: Side,
    pub max_hp: u32,
    pub max_composure: u32,
    pub max_light: u32,
    pub speed: SpeedRange,
    pub resistances: Resistances,
    pub pool: Vec<Card>,
    pub slot_count: usize,
}

impl UnitSpec {
    pub fn new(name: impl Into<String>, side: Side) -> Self {
        Self {
            name: name.into(),
            side,
            max_hp: 30,
            max_composure: 10,
            max_light: 3,
            speed: SpeedRange::new(1, 6),
            resistances: Resistances::default(),
            pool: Vec::new(),
            slot_count: 1,
        }
    }

    pub fn hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self
    }

    pub fn composure(mut self, max_composure: u32) -> Self {
        self.max_composure = max_composure;
        self
    }

    pub fn light(mut self, max_light: u32) -> Self {
        self.max_light = max_light;
        self
    }

    pub fn speed(mut self, min: u32, max: u32) -> Self {
        self.speed = SpeedRange::new(min, max);
        self
    }

    pub fn resistances(mut self, resistances: Resistances) -> Self {
        self.resistances = resistances;
        self
    }

    pub fn pool(mut self, pool: Vec<Card>) -> Self {
        self.pool = pool;
        self
    }

    pub fn slots(mut self, slot_count: usize) -> Self {
        self.slot_count = slot_count;
        self
    }
}
