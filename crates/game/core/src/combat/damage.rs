//! Resistance scaling and damage application.

use crate::state::DiceKind;

// ============================================================================
// Resistance
// ============================================================================

/// Damage multiplier a unit applies to one kind of incoming die.
///
/// Multipliers are stored as integer quarters so scaling stays exact and
/// deterministic (no floating point).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Resistance {
    /// x2.0
    Vulnerable,
    /// x1.5
    Weak,
    /// x1.0
    #[default]
    Normal,
    /// x0.5
    Resist,
    /// x0.25
    Strong,
    /// x0.0
    Immune,
}

impl Resistance {
    /// Multiplier expressed in quarters (`Normal` = 4).
    pub const fn quarters(self) -> u32 {
        match self {
            Self::Vulnerable => 8,
            Self::Weak => 6,
            Self::Normal => 4,
            Self::Resist => 2,
            Self::Strong => 1,
            Self::Immune => 0,
        }
    }

    /// Applies the multiplier: `floor(raw * multiplier)`, saturating at `u32::MAX`.
    pub fn scale(self, raw: u32) -> u32 {
        let scaled = u64::from(raw) * u64::from(self.quarters()) / 4;
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

/// Resistances of one resource pool against the three attack kinds.
///
/// Guard and evade dice are never resisted: they look up [`Resistance::Normal`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResistanceTable {
    pub slash: Resistance,
    pub pierce: Resistance,
    pub blunt: Resistance,
}

impl ResistanceTable {
    /// Table with the same resistance against every attack kind.
    pub const fn uniform(resistance: Resistance) -> Self {
        Self {
            slash: resistance,
            pierce: resistance,
            blunt: resistance,
        }
    }

    pub const fn get(&self, kind: DiceKind) -> Resistance {
        match kind {
            DiceKind::Slash => self.slash,
            DiceKind::Pierce => self.pierce,
            DiceKind::Blunt => self.blunt,
            DiceKind::Guard | DiceKind::Evade => Resistance::Normal,
        }
    }

    /// Scales `raw` damage coming from a die of the given kind.
    pub fn scale(&self, raw: u32, kind: DiceKind) -> u32 {
        self.get(kind).scale(raw)
    }
}

/// Per-pool resistance tables of a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Resistances {
    /// Applied to health damage.
    pub hp: ResistanceTable,
    /// Applied to composure damage.
    pub composure: ResistanceTable,
}

// ============================================================================
// Damage Pools
// ============================================================================

/// Resource pool a damage or heal effect targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Pool {
    Hp,
    Composure,
}
