//! Built-in sample content, usable without any data files.

use clash_core::{Card, CardError, Dice, DiceKind, Side, UnitSpec};

/// Die ranges of the three-dice sample cards, in card order.
const LADDER: [(u32, u32); 3] = [(1, 4), (2, 5), (3, 6)];

fn card(name: &str, cost: u32, dice: &[(DiceKind, u32, u32)]) -> Result<Card, CardError> {
    let dice = dice
        .iter()
        .filter_map(|&(kind, min, max)| Dice::new(kind, min, max).ok());
    Card::new(name, cost, dice)
}

fn ladder(name: &str, kind: DiceKind) -> Result<Card, CardError> {
    let dice: Vec<_> = LADDER.iter().map(|&(min, max)| (kind, min, max)).collect();
    card(name, 2, &dice)
}

/// The nine sample cards.
///
/// Five three-dice cards (one per kind, cost 2), three single-die cards and
/// one mixed card.
pub fn sample_cards() -> Vec<Card> {
    let cards = [
        ladder("Triple Slash", DiceKind::Slash),
        ladder("Triple Pierce", DiceKind::Pierce),
        ladder("Triple Blunt", DiceKind::Blunt),
        ladder("Triple Evade", DiceKind::Evade),
        ladder("Triple Guard", DiceKind::Guard),
        card("Sidestep", 0, &[(DiceKind::Evade, 1, 6)]),
        card("Brace", 1, &[(DiceKind::Guard, 1, 6)]),
        card("Cut", 1, &[(DiceKind::Slash, 1, 6)]),
        card(
            "Feint",
            1,
            &[
                (DiceKind::Evade, 1, 4),
                (DiceKind::Guard, 2, 5),
                (DiceKind::Slash, 3, 6),
            ],
        ),
    ];
    cards.into_iter().filter_map(Result::ok).collect()
}

/// One ally against one enemy, both carrying the full sample pool.
pub fn duel_roster() -> Vec<UnitSpec> {
    vec![
        UnitSpec::new("Roland", Side::Ally).pool(sample_cards()),
        UnitSpec::new("Angelica", Side::Enemy).pool(sample_cards()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_pool_has_nine_cards() {
        let cards = sample_cards();
        assert_eq!(cards.len(), 9);
        assert_eq!(cards.iter().filter(|c| c.len() == 3).count(), 6);
        assert_eq!(cards.iter().filter(|c| c.cost == 2).count(), 5);
    }

    #[test]
    fn sample_cards_keep_every_die() {
        let lengths: Vec<_> = sample_cards().iter().map(|c| c.len()).collect();
        assert_eq!(lengths, [3, 3, 3, 3, 3, 1, 1, 1, 3]);
        let names: Vec<_> = sample_cards().into_iter().map(|c| c.name).collect();
        assert_eq!(names.last().map(String::as_str), Some("Feint"));
    }

    #[test]
    fn ladder_cards_step_up() {
        let cards = sample_cards();
        let slash = &cards[0];
        let ranges: Vec<_> = slash.dice().iter().map(|d| (d.min(), d.max())).collect();
        assert_eq!(ranges, LADDER.to_vec());
        assert!(slash.dice().iter().all(|d| d.kind() == DiceKind::Slash));
    }

    #[test]
    fn duel_roster_pits_one_against_one() {
        let roster = duel_roster();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].side, Side::Ally);
        assert_eq!(roster[1].side, Side::Enemy);
        assert_eq!(roster[0].max_hp, 30);
        assert_eq!(roster[0].max_composure, 10);
        assert_eq!(roster[0].max_light, 3);
        assert_eq!(roster[0].pool.len(), 9);
    }
}
