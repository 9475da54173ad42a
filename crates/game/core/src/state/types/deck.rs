//! Draw pile and hand management for a single unit.
//!
//! A card instance lives in exactly one place at a time: the draw pile, the
//! hand, or a velocity slot (in play). Moving between them is always a move of
//! the owned [`Card`], never a copy.

use super::{Card, CardId};
use crate::env::{RngOracle, compute_seed, context};

/// Result of a draw request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawReport {
    /// Cards that made it into the hand, in draw order.
    pub drawn: Vec<CardId>,
    /// Cards drawn while the hand was full (dropped).
    pub discarded: usize,
    /// Whether the draw pile had to be refilled from the card pool.
    pub reshuffled: bool,
}

/// A unit's deck: the card pool it was built from, a draw pile and a hand.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    /// Card templates. The draw pile is refilled with fresh copies of these.
    pool: Vec<Card>,
    /// Top of the pile is the end of the vector.
    draw_pile: Vec<Card>,
    hand: Vec<Card>,
    hand_limit: usize,
    next_card_id: u32,
}

impl Deck {
    /// Builds a deck whose draw pile holds one fresh copy of every pool card.
    pub fn new(pool: Vec<Card>, hand_limit: usize) -> Self {
        let mut deck = Self {
            pool,
            draw_pile: Vec::new(),
            hand: Vec::new(),
            hand_limit,
            next_card_id: 1,
        };
        deck.refill();
        deck
    }

    #[inline]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[inline]
    pub fn hand_limit(&self) -> usize {
        self.hand_limit
    }

    #[inline]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    #[inline]
    pub fn pool(&self) -> &[Card] {
        &self.pool
    }

    /// Returns the card in hand with the given id.
    pub fn find(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|card| card.id == id)
    }

    /// Shuffles the draw pile (Fisher-Yates driven by the oracle).
    pub fn shuffle(&mut self, rng: &(impl RngOracle + ?Sized), seed: u64) {
        for i in (1..self.draw_pile.len()).rev() {
            let swap_seed = compute_seed(seed, i as u64, 0, context::SHUFFLE);
            let j = rng.next_u32(swap_seed) as usize % (i + 1);
            self.draw_pile.swap(i, j);
        }
    }

    /// Draws `count` cards.
    ///
    /// An empty draw pile is refilled with fresh copies of the whole pool and
    /// reshuffled before the draw proceeds. Cards drawn while the hand is at
    /// its limit are discarded.
    pub fn draw(
        &mut self,
        count: usize,
        rng: &(impl RngOracle + ?Sized),
        seed: u64,
    ) -> DrawReport {
        let mut report = DrawReport::default();

        for n in 0..count {
            if self.draw_pile.is_empty() {
                self.refill();
                self.shuffle(rng, compute_seed(seed, n as u64, 1, context::SHUFFLE));
                report.reshuffled = true;
            }

            let Some(mut card) = self.draw_pile.pop() else {
                // Empty pool: nothing to draw from.
                break;
            };
            card.reset_dice();

            if self.hand.len() >= self.hand_limit {
                report.discarded += 1;
                continue;
            }
            report.drawn.push(card.id);
            self.hand.push(card);
        }

        report
    }

    /// Removes a card from the hand, transferring ownership to the caller.
    pub fn take(&mut self, id: CardId) -> Option<Card> {
        let index = self.hand.iter().position(|card| card.id == id)?;
        Some(self.hand.remove(index))
    }

    /// Puts a previously taken card back into the hand.
    ///
    /// Returns `false` (and drops the card) if the hand is already full.
    pub fn return_to_hand(&mut self, card: Card) -> bool {
        if self.hand.len() >= self.hand_limit {
            return false;
        }
        self.hand.push(card);
        true
    }

    fn refill(&mut self) {
        let mut fresh = Vec::with_capacity(self.pool.len());
        for template in &self.pool {
            fresh.push(template.instantiate(CardId(self.next_card_id)));
            self.next_card_id += 1;
        }
        self.draw_pile = fresh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::{Dice, DiceKind};

    fn pool(size: usize) -> Vec<Card> {
        (0..size)
            .map(|i| {
                let die = Dice::new(DiceKind::Slash, 1, 4).unwrap();
                Card::new(format!("Card {i}"), 1, [die]).unwrap()
            })
            .collect()
    }

    #[test]
    fn new_deck_fills_draw_pile_with_unique_ids() {
        let deck = Deck::new(pool(3), 5);
        assert_eq!(deck.draw_pile_len(), 3);
        assert!(deck.hand().is_empty());

        let mut ids: Vec<_> = deck.draw_pile.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn draw_moves_cards_into_hand() {
        let mut deck = Deck::new(pool(3), 5);
        let report = deck.draw(2, &PcgRng, 1);

        assert_eq!(report.drawn.len(), 2);
        assert_eq!(deck.hand().len(), 2);
        assert_eq!(deck.draw_pile_len(), 1);
        assert!(!report.reshuffled);
    }

    #[test]
    fn empty_pile_is_refilled_before_drawing() {
        let mut deck = Deck::new(pool(2), 10);
        deck.draw(2, &PcgRng, 1);
        assert_eq!(deck.draw_pile_len(), 0);

        let report = deck.draw(1, &PcgRng, 2);
        assert!(report.reshuffled);
        assert_eq!(report.drawn.len(), 1);
        assert_eq!(deck.hand().len(), 3);
        assert_eq!(deck.draw_pile_len(), 1);
    }

    #[test]
    fn refilled_copies_get_fresh_ids() {
        let mut deck = Deck::new(pool(1), 10);
        let first = deck.draw(1, &PcgRng, 1).drawn[0];
        let second = deck.draw(1, &PcgRng, 2).drawn[0];
        assert_ne!(first, second);
    }

    #[test]
    fn hand_never_exceeds_limit() {
        let mut deck = Deck::new(pool(4), 2);
        let report = deck.draw(4, &PcgRng, 1);

        assert_eq!(deck.hand().len(), 2);
        assert_eq!(report.drawn.len(), 2);
        assert_eq!(report.discarded, 2);

        for seed in 0..10 {
            deck.draw(3, &PcgRng, seed);
            assert!(deck.hand().len() <= deck.hand_limit());
        }
    }

    #[test]
    fn empty_pool_draws_nothing() {
        let mut deck = Deck::new(Vec::new(), 3);
        let report = deck.draw(2, &PcgRng, 1);
        assert!(report.drawn.is_empty());
        assert!(deck.hand().is_empty());
    }

    #[test]
    fn take_and_return_transfer_ownership() {
        let mut deck = Deck::new(pool(2), 2);
        deck.draw(2, &PcgRng, 1);
        let id = deck.hand()[0].id;

        let card = deck.take(id).unwrap();
        assert!(deck.find(id).is_none());
        assert!(deck.take(id).is_none());

        assert!(deck.return_to_hand(card));
        assert!(deck.find(id).is_some());
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let mut deck = Deck::new(pool(6), 10);
        let mut before: Vec<_> = deck.draw_pile.iter().map(|c| c.id).collect();
        deck.shuffle(&PcgRng, 77);
        let mut after: Vec<_> = deck.draw_pile.iter().map(|c| c.id).collect();

        before.sort();
        after.sort();
        assert_eq!(before, after);
    }
}
