//! Notifications emitted while dice are applied.
//!
//! Events are pure notifications for presentation layers. They are not part of
//! the battle state and can be dropped without affecting the outcome.

use core::fmt;

use crate::combat::Pool;
use crate::state::{DiceKind, UnitId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum BattleEvent {
    /// `amount` is what was actually removed, after resistances and clamping.
    Damaged {
        unit: UnitId,
        pool: Pool,
        amount: u32,
        source: DiceKind,
    },
    /// `amount` is what was actually restored, after clamping.
    Healed { unit: UnitId, pool: Pool, amount: u32 },
    /// Health reached zero.
    Died { unit: UnitId },
    /// Composure reached zero.
    Incapacitated { unit: UnitId },
    /// An unopposed non-attack die was kept in the unit's leftover list.
    SubactionStored {
        unit: UnitId,
        kind: DiceKind,
        value: u32,
    },
}

impl BattleEvent {
    /// Unit the event is about.
    pub fn unit(&self) -> UnitId {
        match self {
            Self::Damaged { unit, .. }
            | Self::Healed { unit, .. }
            | Self::Died { unit }
            | Self::Incapacitated { unit }
            | Self::SubactionStored { unit, .. } => *unit,
        }
    }

    /// Short tag for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Damaged { .. } => "damaged",
            Self::Healed { .. } => "healed",
            Self::Died { .. } => "died",
            Self::Incapacitated { .. } => "incapacitated",
            Self::SubactionStored { .. } => "subaction_stored",
        }
    }
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Damaged {
                unit,
                pool,
                amount,
                source,
            } => write!(f, "{unit} takes {amount} {pool} damage ({source})"),
            Self::Healed { unit, pool, amount } => write!(f, "{unit} recovers {amount} {pool}"),
            Self::Died { unit } => write!(f, "{unit} dies"),
            Self::Incapacitated { unit } => write!(f, "{unit} is incapacitated"),
            Self::SubactionStored { unit, kind, value } => {
                write!(f, "{unit} keeps an unused {kind} die ({value})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_unit_and_pool() {
        let event = BattleEvent::Damaged {
            unit: UnitId(2),
            pool: Pool::Composure,
            amount: 3,
            source: DiceKind::Guard,
        };
        assert_eq!(event.to_string(), "#2 takes 3 composure damage (guard)");
        assert_eq!(event.unit(), UnitId(2));
        assert_eq!(event.as_str(), "damaged");
    }
}
