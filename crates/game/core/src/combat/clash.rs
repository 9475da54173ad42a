//! Clash evaluation: which commitments counter each other.
//!
//! [`evaluate`] is a pure function of the slot state. It can be called as
//! often as the commitments change and always yields the same pairing for the
//! same input.

use std::collections::{BTreeMap, BTreeSet};

use crate::state::{BattleState, Side, SlotId, VelocitySlot};

/// How a pairing entry is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ClashKind {
    /// Both slots trade dice against each other.
    Clash,
    /// Only the attacker's dice land.
    OneSided,
}

/// One entry of the pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClashInfo {
    pub attacker: SlotId,
    pub defender: SlotId,
    pub kind: ClashKind,
}

impl ClashInfo {
    #[inline]
    pub fn is_clash(&self) -> bool {
        self.kind == ClashKind::Clash
    }

    /// Whether the entry references `slot` on either side.
    #[inline]
    pub fn involves(&self, slot: SlotId) -> bool {
        self.attacker == slot || self.defender == slot
    }
}

/// Computes the authoritative pairing for the current commitments.
///
/// Output order: clashes in discovery order, then one-sided entries in action
/// order. Every participating slot appears in exactly one entry.
pub fn evaluate(state: &BattleState) -> Vec<ClashInfo> {
    let order = action_order(state);
    let participating: Vec<&VelocitySlot> = order
        .iter()
        .filter_map(|id| state.slot(*id))
        .filter(|slot| participates(state, slot))
        .collect();

    // targeted slot -> slots targeting it, in action order
    let mut incoming: BTreeMap<SlotId, Vec<&VelocitySlot>> = BTreeMap::new();
    let mut targeted: Vec<SlotId> = Vec::new();
    for slot in &participating {
        let Some(target) = slot.target else {
            continue;
        };
        let entry = incoming.entry(target).or_default();
        if entry.is_empty() {
            targeted.push(target);
        }
        entry.push(slot);
    }

    let mut consumed: BTreeSet<SlotId> = BTreeSet::new();
    let mut infos = Vec::new();

    // Pass 1: interception, for every defender before any mutual pairing.
    for &defender_id in &targeted {
        let Some(defender) = participating.iter().find(|s| s.id == defender_id) else {
            continue;
        };
        if consumed.contains(&defender_id) {
            continue;
        }
        let Some(defender_priority) = defender.priority else {
            continue;
        };

        let interceptor = incoming[&defender_id]
            .iter()
            .filter(|c| !consumed.contains(&c.id))
            .filter(|c| side_of(state, c) == Some(Side::Ally))
            .filter(|c| c.priority.is_some_and(|p| p > defender_priority))
            .max_by_key(|c| (c.selection_order, c.priority));

        if let Some(interceptor) = interceptor {
            consumed.insert(interceptor.id);
            consumed.insert(defender_id);
            infos.push(ClashInfo {
                attacker: interceptor.id,
                defender: defender_id,
                kind: ClashKind::Clash,
            });
        }
    }

    // Pass 2: mutual targeting.
    for &defender_id in &targeted {
        let Some(defender) = participating.iter().find(|s| s.id == defender_id) else {
            continue;
        };
        if consumed.contains(&defender_id) {
            continue;
        }

        let mutual = incoming[&defender_id]
            .iter()
            .filter(|c| !consumed.contains(&c.id))
            .find(|c| defender.target == Some(c.id));

        if let Some(partner) = mutual {
            consumed.insert(partner.id);
            consumed.insert(defender_id);
            infos.push(ClashInfo {
                attacker: defender_id,
                defender: partner.id,
                kind: ClashKind::Clash,
            });
        }
    }

    for slot in &participating {
        if consumed.contains(&slot.id) {
            continue;
        }
        if let Some(target) = slot.target {
            infos.push(ClashInfo {
                attacker: slot.id,
                defender: target,
                kind: ClashKind::OneSided,
            });
        }
    }

    infos
}

/// Slot ids in action order. Slots missing from `state.order` (no round has
/// started yet) follow in arena order.
fn action_order(state: &BattleState) -> Vec<SlotId> {
    let mut order: Vec<SlotId> = state
        .order
        .iter()
        .copied()
        .filter(|id| state.slot(*id).is_some())
        .collect();
    let listed: BTreeSet<SlotId> = order.iter().copied().collect();
    order.extend(
        state
            .slots
            .iter()
            .map(|slot| slot.id)
            .filter(|id| !listed.contains(id)),
    );
    order
}

fn participates(state: &BattleState, slot: &VelocitySlot) -> bool {
    slot.is_committed() && slot.target.is_some_and(|target| state.slot(target).is_some())
}

fn side_of(state: &BattleState, slot: &VelocitySlot) -> Option<Side> {
    state.unit(slot.owner).map(|unit| unit.side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::state::{Card, Dice, DiceKind, UnitSpec};

    fn jab() -> Card {
        Card::new("Jab", 0, [Dice::new(DiceKind::Slash, 1, 4).unwrap()]).unwrap()
    }

    /// Builds a state with the given sides; every unit has one slot with the
    /// given priority.
    fn state(units: &[(Side, u32)]) -> BattleState {
        let config = BattleConfig::default();
        let mut state = BattleState::new(0);
        for (i, (side, priority)) in units.iter().enumerate() {
            state
                .spawn(UnitSpec::new(format!("U{i}"), *side), &config)
                .unwrap();
            state.slots[i].priority = Some(*priority);
        }
        state
    }

    fn commit(state: &mut BattleState, slot: u32, target: u32, order: u64) {
        let slot = &mut state.slots[slot as usize];
        slot.card = Some(jab());
        slot.target = Some(SlotId(target));
        slot.selection_order = Some(order);
    }

    #[test]
    fn mutual_targets_clash_once() {
        let mut state = state(&[(Side::Ally, 3), (Side::Enemy, 2)]);
        commit(&mut state, 0, 1, 0);
        commit(&mut state, 1, 0, 1);

        let infos = evaluate(&state);
        assert_eq!(infos.len(), 1);
        assert!(infos[0].is_clash());
        assert!(infos[0].involves(SlotId(0)) && infos[0].involves(SlotId(1)));
    }

    #[test]
    fn unanswered_attack_is_one_sided() {
        let mut state = state(&[(Side::Ally, 3), (Side::Enemy, 5), (Side::Enemy, 1)]);
        // Enemy 1 attacks the ally, who attacks enemy 2 instead.
        commit(&mut state, 1, 0, 0);
        commit(&mut state, 0, 2, 1);

        let infos = evaluate(&state);
        assert_eq!(infos.len(), 2);
        assert!(infos.iter().all(|i| i.kind == ClashKind::OneSided));
        assert!(infos.contains(&ClashInfo {
            attacker: SlotId(1),
            defender: SlotId(0),
            kind: ClashKind::OneSided,
        }));
    }

    #[test]
    fn faster_ally_intercepts_mutual_pair() {
        // A (enemy) <-> B (ally) target each other; C (ally, faster than B's
        // opponent) also targets A.
        let mut state = state(&[(Side::Enemy, 2), (Side::Ally, 3), (Side::Ally, 5)]);
        commit(&mut state, 0, 1, 0);
        commit(&mut state, 1, 0, 1);
        commit(&mut state, 2, 0, 2);

        let infos = evaluate(&state);
        assert_eq!(
            infos,
            vec![
                ClashInfo {
                    attacker: SlotId(2),
                    defender: SlotId(0),
                    kind: ClashKind::Clash,
                },
                ClashInfo {
                    attacker: SlotId(1),
                    defender: SlotId(0),
                    kind: ClashKind::OneSided,
                },
            ]
        );
    }

    #[test]
    fn interception_does_not_depend_on_visit_order() {
        // Same scenario, but the interceptor is the slowest slot in arena order.
        let mut state = state(&[(Side::Ally, 4), (Side::Enemy, 2), (Side::Ally, 6)]);
        state.order = vec![SlotId(2), SlotId(0), SlotId(1)];
        commit(&mut state, 0, 1, 0);
        commit(&mut state, 1, 0, 1);
        commit(&mut state, 2, 1, 2);

        let infos = evaluate(&state);
        assert!(infos.contains(&ClashInfo {
            attacker: SlotId(2),
            defender: SlotId(1),
            kind: ClashKind::Clash,
        }));
        assert!(infos.contains(&ClashInfo {
            attacker: SlotId(0),
            defender: SlotId(1),
            kind: ClashKind::OneSided,
        }));
    }

    #[test]
    fn slower_ally_cannot_intercept() {
        let mut state = state(&[(Side::Enemy, 4), (Side::Ally, 5), (Side::Ally, 3)]);
        commit(&mut state, 0, 1, 0);
        commit(&mut state, 1, 0, 1);
        commit(&mut state, 2, 0, 2);

        let infos = evaluate(&state);
        let clash: Vec<_> = infos.iter().filter(|i| i.is_clash()).collect();
        assert_eq!(clash.len(), 1);
        assert!(clash[0].involves(SlotId(0)) && clash[0].involves(SlotId(1)));
    }

    #[test]
    fn latest_selection_wins_interceptor_tie() {
        let mut state = state(&[(Side::Enemy, 1), (Side::Ally, 4), (Side::Ally, 4)]);
        commit(&mut state, 0, 1, 0);
        commit(&mut state, 2, 0, 5);
        commit(&mut state, 1, 0, 3);

        let infos = evaluate(&state);
        assert_eq!(infos[0].attacker, SlotId(2));
        assert_eq!(infos[0].defender, SlotId(0));
        assert!(infos[0].is_clash());
    }

    #[test]
    fn enemy_side_does_not_intercept() {
        let mut state = state(&[(Side::Ally, 2), (Side::Enemy, 1), (Side::Enemy, 6)]);
        commit(&mut state, 0, 1, 0);
        commit(&mut state, 1, 0, 1);
        commit(&mut state, 2, 0, 2);

        let infos = evaluate(&state);
        assert!(infos.contains(&ClashInfo {
            attacker: SlotId(2),
            defender: SlotId(0),
            kind: ClashKind::OneSided,
        }));
        assert_eq!(infos.iter().filter(|i| i.is_clash()).count(), 1);
    }

    #[test]
    fn incomplete_slots_are_ignored() {
        let mut state = state(&[(Side::Ally, 3), (Side::Enemy, 2)]);
        commit(&mut state, 0, 1, 0);
        state.slots[1].target = Some(SlotId(0));
        // enemy has a target but no card
        let infos = evaluate(&state);
        assert_eq!(
            infos,
            vec![ClashInfo {
                attacker: SlotId(0),
                defender: SlotId(1),
                kind: ClashKind::OneSided,
            }]
        );

        state.slots[0].priority = None;
        assert!(evaluate(&state).is_empty());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let mut state = state(&[
            (Side::Ally, 6),
            (Side::Ally, 2),
            (Side::Enemy, 4),
            (Side::Enemy, 3),
        ]);
        commit(&mut state, 0, 2, 0);
        commit(&mut state, 1, 3, 1);
        commit(&mut state, 2, 1, 2);
        commit(&mut state, 3, 1, 3);

        let first = evaluate(&state);
        let second = evaluate(&state);
        assert_eq!(first, second);
    }
}
