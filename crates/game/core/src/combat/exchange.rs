//! Dice-versus-dice interaction matrix.
//!
//! A true clash compares one rolled die from each side of a pair. The outcome
//! depends only on the two dice classes and on how the rolled values compare,
//! so the matrix is a single match over `(class, class, ordering)`.

use core::cmp::Ordering;

use super::Pool;
use crate::state::{DiceClass, DiceKind};

/// Side of a resolver pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PairSide {
    A,
    B,
}

impl PairSide {
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// A rolled die entering the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RolledDie {
    pub kind: DiceKind,
    pub value: u32,
}

impl RolledDie {
    pub const fn new(kind: DiceKind, value: u32) -> Self {
        Self { kind, value }
    }
}

/// Resource change produced by one exchange, before resistances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// `target` loses `amount` from `pool`, scaled by its resistance to `source`.
    Damage {
        target: PairSide,
        pool: Pool,
        amount: u32,
        source: DiceKind,
    },
    /// `target` regains `amount` composure.
    Heal { target: PairSide, amount: u32 },
}

impl Effect {
    fn mirrored(self) -> Self {
        match self {
            Self::Damage {
                target,
                pool,
                amount,
                source,
            } => Self::Damage {
                target: target.other(),
                pool,
                amount,
                source,
            },
            Self::Heal { target, amount } => Self::Heal {
                target: target.other(),
                amount,
            },
        }
    }
}

/// Which sides move on to their next die.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Advance {
    pub a: bool,
    pub b: bool,
}

impl Advance {
    pub const NONE: Self = Self { a: false, b: false };
    pub const BOTH: Self = Self { a: true, b: true };

    /// Only `side` advances.
    pub const fn only(side: PairSide) -> Self {
        match side {
            PairSide::A => Self { a: true, b: false },
            PairSide::B => Self { a: false, b: true },
        }
    }

    /// Number of index positions that move (0, 1 or 2).
    pub const fn count(self) -> u8 {
        self.a as u8 + self.b as u8
    }

    const fn mirrored(self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }
}

/// Outcome of comparing two dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exchange {
    pub effect: Option<Effect>,
    pub advance: Advance,
}

impl Exchange {
    const fn idle() -> Self {
        Self {
            effect: None,
            advance: Advance::BOTH,
        }
    }

    const fn damage(target: PairSide, pool: Pool, amount: u32, source: DiceKind) -> Self {
        Self {
            effect: Some(Effect::Damage {
                target,
                pool,
                amount,
                source,
            }),
            advance: Advance::BOTH,
        }
    }

    const fn heal(target: PairSide, amount: u32) -> Self {
        Self {
            effect: Some(Effect::Heal { target, amount }),
            advance: Advance::BOTH,
        }
    }

    const fn advancing(mut self, advance: Advance) -> Self {
        self.advance = advance;
        self
    }

    fn mirrored(self) -> Self {
        Self {
            effect: self.effect.map(Effect::mirrored),
            advance: self.advance.mirrored(),
        }
    }
}

/// Resolves one true-clash exchange between die `a` and die `b`.
pub fn resolve_exchange(a: RolledDie, b: RolledDie) -> Exchange {
    use DiceClass::{Attack, Evade, Guard};
    use Ordering::{Equal, Greater, Less};
    use PairSide::{A, B};

    match (a.kind.class(), b.kind.class(), a.value.cmp(&b.value)) {
        (Attack, Attack, Greater) => Exchange::damage(B, Pool::Hp, a.value, a.kind),
        (Attack, Attack, Less) => Exchange::damage(A, Pool::Hp, b.value, b.kind),
        (Attack, Attack, Equal) => Exchange::idle(),

        (Attack, Guard, Greater) => Exchange::damage(B, Pool::Hp, a.value - b.value, a.kind),
        (Attack, Guard, Less) => Exchange::damage(A, Pool::Composure, b.value, b.kind),
        (Attack, Guard, Equal) => Exchange::idle(),

        (Attack, Evade, Greater) => Exchange::damage(B, Pool::Hp, a.value, a.kind),
        // The evade die survives and can be used again.
        (Attack, Evade, Less) => Exchange::heal(B, b.value).advancing(Advance::only(A)),
        (Attack, Evade, Equal) => Exchange::idle(),

        (Guard, Guard, Greater) => Exchange::damage(B, Pool::Composure, a.value, a.kind),
        (Guard, Guard, Less) => Exchange::damage(A, Pool::Composure, b.value, b.kind),
        (Guard, Guard, Equal) => Exchange::idle(),

        (Guard, Evade, Greater) => Exchange::damage(B, Pool::Composure, a.value, a.kind),
        (Guard, Evade, Less) => Exchange::heal(B, b.value),
        (Guard, Evade, Equal) => Exchange::idle(),

        (Evade, Evade, _) => Exchange::idle(),

        (Guard, Attack, _) | (Evade, Attack, _) | (Evade, Guard, _) => {
            resolve_exchange(b, a).mirrored()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn die(kind: DiceKind, value: u32) -> RolledDie {
        RolledDie::new(kind, value)
    }

    fn damage(target: PairSide, pool: Pool, amount: u32, source: DiceKind) -> Option<Effect> {
        Some(Effect::Damage {
            target,
            pool,
            amount,
            source,
        })
    }

    #[test]
    fn attack_versus_attack() {
        let ex = resolve_exchange(die(DiceKind::Slash, 4), die(DiceKind::Blunt, 2));
        assert_eq!(ex.effect, damage(PairSide::B, Pool::Hp, 4, DiceKind::Slash));
        assert_eq!(ex.advance, Advance::BOTH);

        let ex = resolve_exchange(die(DiceKind::Slash, 1), die(DiceKind::Pierce, 3));
        assert_eq!(ex.effect, damage(PairSide::A, Pool::Hp, 3, DiceKind::Pierce));

        let ex = resolve_exchange(die(DiceKind::Slash, 2), die(DiceKind::Pierce, 2));
        assert_eq!(ex.effect, None);
        assert_eq!(ex.advance, Advance::BOTH);
    }

    #[test]
    fn attack_versus_guard() {
        let ex = resolve_exchange(die(DiceKind::Pierce, 4), die(DiceKind::Guard, 3));
        assert_eq!(ex.effect, damage(PairSide::B, Pool::Hp, 1, DiceKind::Pierce));

        let ex = resolve_exchange(die(DiceKind::Pierce, 2), die(DiceKind::Guard, 5));
        assert_eq!(ex.effect, damage(PairSide::A, Pool::Composure, 5, DiceKind::Guard));

        let ex = resolve_exchange(die(DiceKind::Pierce, 3), die(DiceKind::Guard, 3));
        assert_eq!(ex.effect, None);
        assert_eq!(ex.advance, Advance::BOTH);
    }

    #[test]
    fn attack_versus_evade() {
        let ex = resolve_exchange(die(DiceKind::Blunt, 5), die(DiceKind::Evade, 2));
        assert_eq!(ex.effect, damage(PairSide::B, Pool::Hp, 5, DiceKind::Blunt));
        assert_eq!(ex.advance, Advance::BOTH);

        let ex = resolve_exchange(die(DiceKind::Blunt, 2), die(DiceKind::Evade, 4));
        assert_eq!(
            ex.effect,
            Some(Effect::Heal {
                target: PairSide::B,
                amount: 4
            })
        );
        assert_eq!(ex.advance, Advance::only(PairSide::A));

        let ex = resolve_exchange(die(DiceKind::Blunt, 3), die(DiceKind::Evade, 3));
        assert_eq!(ex.effect, None);
        assert_eq!(ex.advance, Advance::BOTH);
    }

    #[test]
    fn guard_versus_guard() {
        let ex = resolve_exchange(die(DiceKind::Guard, 5), die(DiceKind::Guard, 1));
        assert_eq!(ex.effect, damage(PairSide::B, Pool::Composure, 5, DiceKind::Guard));

        let ex = resolve_exchange(die(DiceKind::Guard, 1), die(DiceKind::Guard, 4));
        assert_eq!(ex.effect, damage(PairSide::A, Pool::Composure, 4, DiceKind::Guard));

        assert_eq!(
            resolve_exchange(die(DiceKind::Guard, 2), die(DiceKind::Guard, 2)).effect,
            None
        );
    }

    #[test]
    fn guard_versus_evade() {
        let ex = resolve_exchange(die(DiceKind::Guard, 4), die(DiceKind::Evade, 1));
        assert_eq!(ex.effect, damage(PairSide::B, Pool::Composure, 4, DiceKind::Guard));

        let ex = resolve_exchange(die(DiceKind::Guard, 1), die(DiceKind::Evade, 3));
        assert_eq!(
            ex.effect,
            Some(Effect::Heal {
                target: PairSide::B,
                amount: 3
            })
        );
        assert_eq!(ex.advance, Advance::BOTH);

        assert_eq!(
            resolve_exchange(die(DiceKind::Guard, 2), die(DiceKind::Evade, 2)).effect,
            None
        );
    }

    #[test]
    fn evade_versus_evade_only_consumes() {
        for (a, b) in [(1, 4), (4, 1), (2, 2)] {
            let ex = resolve_exchange(die(DiceKind::Evade, a), die(DiceKind::Evade, b));
            assert_eq!(ex.effect, None);
            assert_eq!(ex.advance, Advance::BOTH);
        }
    }

    #[test]
    fn mirrored_rows_swap_sides() {
        let ex = resolve_exchange(die(DiceKind::Guard, 3), die(DiceKind::Slash, 4));
        assert_eq!(ex.effect, damage(PairSide::A, Pool::Hp, 1, DiceKind::Slash));

        let ex = resolve_exchange(die(DiceKind::Guard, 5), die(DiceKind::Slash, 2));
        assert_eq!(ex.effect, damage(PairSide::B, Pool::Composure, 5, DiceKind::Guard));

        let ex = resolve_exchange(die(DiceKind::Evade, 4), die(DiceKind::Slash, 2));
        assert_eq!(
            ex.effect,
            Some(Effect::Heal {
                target: PairSide::A,
                amount: 4
            })
        );
        assert_eq!(ex.advance, Advance::only(PairSide::B));

        let ex = resolve_exchange(die(DiceKind::Evade, 1), die(DiceKind::Guard, 3));
        assert_eq!(ex.effect, damage(PairSide::A, Pool::Composure, 3, DiceKind::Guard));
    }

    #[test]
    fn advance_count() {
        assert_eq!(Advance::NONE.count(), 0);
        assert_eq!(Advance::only(PairSide::B).count(), 1);
        assert_eq!(Advance::BOTH.count(), 2);
    }
}
