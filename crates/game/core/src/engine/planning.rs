use crate::state::{CardId, SlotId};

use super::{BattleEngine, CommitError};

/// Planning input methods for BattleEngine.
impl<'a> BattleEngine<'a> {
    /// Commits `card` from the slot owner's hand against `target`.
    ///
    /// On success the card moves out of the hand into the slot, its cost is
    /// paid and the slot gets the next selection stamp. On error nothing
    /// changes.
    pub fn commit(
        &mut self,
        slot: SlotId,
        card: CardId,
        target: SlotId,
    ) -> Result<(), CommitError> {
        let velocity = self
            .state
            .slot(slot)
            .ok_or(CommitError::UnknownSlot { slot })?;
        if velocity.priority.is_none() {
            return Err(CommitError::NotRolled { slot });
        }
        if velocity.card.is_some() {
            return Err(CommitError::AlreadyCommitted { slot });
        }

        let owner_id = velocity.owner;
        let owner = self
            .state
            .unit(owner_id)
            .ok_or(CommitError::UnknownSlot { slot })?;
        if owner.is_dead() {
            return Err(CommitError::OwnerDead { unit: owner_id });
        }
        if owner.is_incapacitated() {
            return Err(CommitError::OwnerIncapacitated { unit: owner_id });
        }

        let cost = owner
            .deck
            .find(card)
            .ok_or(CommitError::CardNotInHand {
                unit: owner_id,
                card,
            })?
            .cost;
        if owner.light.current < cost {
            return Err(CommitError::NotEnoughLight {
                unit: owner_id,
                cost,
                available: owner.light.current,
            });
        }

        let target_side = self
            .state
            .slot_owner(target)
            .ok_or(CommitError::UnknownTarget { target })?
            .side;
        if target_side == owner.side {
            return Err(CommitError::SameSide { slot, target });
        }

        // Validated: from here on every lookup succeeds.
        let stamp = self.state.next_selection();
        let owner = self
            .state
            .unit_mut(owner_id)
            .ok_or(CommitError::UnknownSlot { slot })?;
        let played = owner.deck.take(card).ok_or(CommitError::CardNotInHand {
            unit: owner_id,
            card,
        })?;
        owner.light.spend(played.cost);

        let velocity = self
            .state
            .slot_mut(slot)
            .ok_or(CommitError::UnknownSlot { slot })?;
        velocity.card = Some(played);
        velocity.target = Some(target);
        velocity.selection_order = Some(stamp);
        Ok(())
    }

    /// Takes the card back out of `slot`, returning it to the hand and
    /// refunding its cost.
    pub fn withdraw(&mut self, slot: SlotId) -> Result<CardId, CommitError> {
        let velocity = self
            .state
            .slot(slot)
            .ok_or(CommitError::UnknownSlot { slot })?;
        let owner_id = velocity.owner;
        let Some(card) = velocity.card.as_ref() else {
            return Err(CommitError::NothingCommitted { slot });
        };
        let card_id = card.id;

        let owner = self
            .state
            .unit(owner_id)
            .ok_or(CommitError::UnknownSlot { slot })?;
        if owner.deck.hand().len() >= owner.deck.hand_limit() {
            return Err(CommitError::HandFull { unit: owner_id });
        }

        let velocity = self
            .state
            .slot_mut(slot)
            .ok_or(CommitError::UnknownSlot { slot })?;
        let card = velocity
            .card
            .take()
            .ok_or(CommitError::NothingCommitted { slot })?;
        velocity.target = None;
        velocity.selection_order = None;

        let owner = self
            .state
            .unit_mut(owner_id)
            .ok_or(CommitError::UnknownSlot { slot })?;
        owner.light.restore(card.cost);
        owner.deck.return_to_hand(card);
        Ok(card_id)
    }
}
