//! Step-driven resolution of a frozen pairing.
//!
//! The resolver is an explicit state machine re-entered on every external
//! tick. Each [`Resolver::step`] call performs exactly one phase:
//!
//! ```text
//! Prepare ──► Roll ──► Apply ──► Hold ──► Prepare ...
//!    │
//!    └──► (pair done) next pair ──► ... ──► Drained
//! ```
//!
//! A driver may pace the calls however it likes (one per click, one per timer
//! tick, or all at once through [`Resolver::run_to_end`]). Dropping or
//! [`abandoning`](Resolver::abandon) a resolver mid-way is always valid;
//! resource changes already applied stay applied.

use std::collections::BTreeSet;

use super::BattleEvent;
use crate::combat::{
    Advance, ClashInfo, ClashKind, Effect, PairSide, Pool, RolledDie, resolve_exchange,
};
use crate::config::BattleConfig;
use crate::env::RngOracle;
use crate::state::{BattleState, DiceKind, SlotId, UnitId};

/// One resolution unit: a clash or a one-sided attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolverPair {
    pub kind: ClashKind,
    /// Attacker of a one-sided pair.
    pub a: SlotId,
    pub b: SlotId,
}

impl ResolverPair {
    #[inline]
    pub fn slot(&self, side: PairSide) -> SlotId {
        match side {
            PairSide::A => self.a,
            PairSide::B => self.b,
        }
    }
}

/// Which dice the next step consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepPlan {
    /// Both sides' current dice meet in the matrix.
    Clash { a_index: usize, b_index: usize },
    /// Only `attacker`'s current die is used.
    OneSided { attacker: PairSide, index: usize },
}

/// Rolled dice of the step in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepResult {
    Clash {
        a: RolledDie,
        b: RolledDie,
    },
    OneSided {
        attacker: PairSide,
        index: usize,
        die: RolledDie,
    },
}

/// Phase the next [`Resolver::step`] call will run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ResolvePhase {
    Prepare,
    Roll,
    Apply,
    Hold,
}

/// What one [`Resolver::step`] call did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepOutcome {
    /// Dice for the next step were selected.
    Prepared { pair: ResolverPair, plan: StepPlan },
    /// The current pair is exhausted; the next call moves on to the next pair.
    PairFinished { pair: ResolverPair },
    /// Queue is empty. Further calls are no-ops.
    Drained,
    Rolled(StepResult),
    Applied {
        result: StepResult,
        events: Vec<BattleEvent>,
    },
    /// Dice indices moved forward.
    Held { advance: Advance },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Phase {
    Prepare,
    Roll(StepPlan),
    Apply(StepResult),
    Hold(Advance),
}

/// Step-driven resolver over a frozen queue of pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolver {
    queue: Vec<ResolverPair>,
    cursor: usize,
    a_index: usize,
    b_index: usize,
    phase: Phase,
}

impl Resolver {
    /// Builds the queue from a pairing: one pair per clash (a mutual pair
    /// listed twice is kept once) and one per one-sided entry.
    pub fn new(infos: &[ClashInfo]) -> Self {
        let mut seen: BTreeSet<(SlotId, SlotId)> = BTreeSet::new();
        let mut queue = Vec::with_capacity(infos.len());

        for info in infos {
            if info.kind == ClashKind::Clash {
                let key = if info.attacker <= info.defender {
                    (info.attacker, info.defender)
                } else {
                    (info.defender, info.attacker)
                };
                if !seen.insert(key) {
                    continue;
                }
            }
            queue.push(ResolverPair {
                kind: info.kind,
                a: info.attacker,
                b: info.defender,
            });
        }

        Self {
            queue,
            cursor: 0,
            a_index: 0,
            b_index: 0,
            phase: Phase::Prepare,
        }
    }

    pub fn queue(&self) -> &[ResolverPair] {
        &self.queue
    }

    /// Pair currently being resolved.
    pub fn current_pair(&self) -> Option<ResolverPair> {
        self.queue.get(self.cursor).copied()
    }

    /// Dice positions reached on each side of the current pair.
    pub fn indices(&self) -> (usize, usize) {
        (self.a_index, self.b_index)
    }

    pub fn phase(&self) -> ResolvePhase {
        match self.phase {
            Phase::Prepare => ResolvePhase::Prepare,
            Phase::Roll(_) => ResolvePhase::Roll,
            Phase::Apply(_) => ResolvePhase::Apply,
            Phase::Hold(_) => ResolvePhase::Hold,
        }
    }

    pub fn is_drained(&self) -> bool {
        self.cursor >= self.queue.len()
    }

    /// Discards the remaining queue and any step in progress.
    pub fn abandon(&mut self) {
        self.queue.clear();
        self.cursor = 0;
        self.a_index = 0;
        self.b_index = 0;
        self.phase = Phase::Prepare;
    }

    /// Advances the state machine by exactly one phase.
    pub fn step(
        &mut self,
        state: &mut BattleState,
        config: &BattleConfig,
        rng: &(impl RngOracle + ?Sized),
    ) -> StepOutcome {
        let Some(pair) = self.current_pair() else {
            return StepOutcome::Drained;
        };

        match std::mem::replace(&mut self.phase, Phase::Prepare) {
            Phase::Prepare => match self.prepare(state, pair) {
                Some(plan) => {
                    self.phase = Phase::Roll(plan);
                    StepOutcome::Prepared { pair, plan }
                }
                None => self.finish_pair(pair),
            },
            Phase::Roll(plan) => match roll(state, rng, pair, plan) {
                Some(result) => {
                    self.phase = Phase::Apply(result);
                    StepOutcome::Rolled(result)
                }
                None => self.finish_pair(pair),
            },
            Phase::Apply(result) => {
                let (advance, events) = apply(state, config, pair, result);
                self.phase = Phase::Hold(advance);
                StepOutcome::Applied { result, events }
            }
            Phase::Hold(advance) => {
                self.a_index += usize::from(advance.a);
                self.b_index += usize::from(advance.b);
                StepOutcome::Held { advance }
            }
        }
    }

    /// Steps until the queue is drained and returns every emitted event.
    pub fn run_to_end(
        &mut self,
        state: &mut BattleState,
        config: &BattleConfig,
        rng: &(impl RngOracle + ?Sized),
    ) -> Vec<BattleEvent> {
        let mut all = Vec::new();
        loop {
            match self.step(state, config, rng) {
                StepOutcome::Drained => return all,
                StepOutcome::Applied { events, .. } => all.extend(events),
                _ => {}
            }
        }
    }

    fn finish_pair(&mut self, pair: ResolverPair) -> StepOutcome {
        self.cursor += 1;
        self.a_index = 0;
        self.b_index = 0;
        self.phase = Phase::Prepare;
        StepOutcome::PairFinished { pair }
    }

    /// Picks the dice for the next step, or `None` when the pair is done.
    fn prepare(&self, state: &BattleState, pair: ResolverPair) -> Option<StepPlan> {
        match pair.kind {
            ClashKind::OneSided => self.one_sided(state, pair, PairSide::A),
            ClashKind::Clash => {
                let a_left = self.a_index < dice_count(state, pair.a);
                let b_left = self.b_index < dice_count(state, pair.b);
                match (a_left, b_left) {
                    (false, false) => None,
                    (true, false) => self.one_sided(state, pair, PairSide::A),
                    (false, true) => self.one_sided(state, pair, PairSide::B),
                    (true, true) => {
                        let a = state.slot_owner(pair.a)?;
                        let b = state.slot_owner(pair.b)?;
                        if a.is_dead() || b.is_dead() {
                            return None;
                        }
                        match (a.is_incapacitated(), b.is_incapacitated()) {
                            (true, true) => None,
                            (true, false) => self.one_sided(state, pair, PairSide::B),
                            (false, true) => self.one_sided(state, pair, PairSide::A),
                            (false, false) => Some(StepPlan::Clash {
                                a_index: self.a_index,
                                b_index: self.b_index,
                            }),
                        }
                    }
                }
            }
        }
    }

    fn one_sided(
        &self,
        state: &BattleState,
        pair: ResolverPair,
        attacker: PairSide,
    ) -> Option<StepPlan> {
        let index = match attacker {
            PairSide::A => self.a_index,
            PairSide::B => self.b_index,
        };
        let attacker_slot = pair.slot(attacker);
        if index >= dice_count(state, attacker_slot) {
            return None;
        }

        let attacking = state.slot_owner(attacker_slot)?;
        let defending = state.slot_owner(pair.slot(attacker.other()))?;
        if attacking.is_incapacitated() || attacking.is_dead() || defending.is_dead() {
            return None;
        }
        Some(StepPlan::OneSided { attacker, index })
    }
}

fn dice_count(state: &BattleState, slot: SlotId) -> usize {
    state
        .slot(slot)
        .and_then(|slot| slot.card.as_ref())
        .map_or(0, |card| card.len())
}

/// Rolls a fresh value for every die the plan selected.
fn roll(
    state: &mut BattleState,
    rng: &(impl RngOracle + ?Sized),
    pair: ResolverPair,
    plan: StepPlan,
) -> Option<StepResult> {
    match plan {
        StepPlan::Clash { a_index, b_index } => Some(StepResult::Clash {
            a: roll_die(state, rng, pair.a, a_index)?,
            b: roll_die(state, rng, pair.b, b_index)?,
        }),
        StepPlan::OneSided { attacker, index } => Some(StepResult::OneSided {
            attacker,
            index,
            die: roll_die(state, rng, pair.slot(attacker), index)?,
        }),
    }
}

fn roll_die(
    state: &mut BattleState,
    rng: &(impl RngOracle + ?Sized),
    slot: SlotId,
    index: usize,
) -> Option<RolledDie> {
    let battle_seed = state.seed;
    let nonce = state.next_nonce();
    let slot = state.slot_mut(slot)?;
    let owner = slot.owner.0;
    let die = slot.card.as_mut()?.die_mut(index)?;
    let value = die.roll(rng, battle_seed, nonce, owner);
    Some(RolledDie::new(die.kind(), value))
}

/// Applies the rolled step to the units and reports how far each side advances.
fn apply(
    state: &mut BattleState,
    config: &BattleConfig,
    pair: ResolverPair,
    result: StepResult,
) -> (Advance, Vec<BattleEvent>) {
    let mut events = Vec::new();
    let owner = |state: &BattleState, side: PairSide| {
        state.slot(pair.slot(side)).map(|slot| slot.owner)
    };

    match result {
        StepResult::Clash { a, b } => {
            let exchange = resolve_exchange(a, b);
            match exchange.effect {
                Some(Effect::Damage {
                    target,
                    pool,
                    amount,
                    source,
                }) => {
                    if let Some(unit) = owner(state, target) {
                        damage(state, config, unit, pool, amount, source, &mut events);
                    }
                }
                Some(Effect::Heal { target, amount }) => {
                    if let Some(unit) = owner(state, target) {
                        heal(state, unit, amount, &mut events);
                    }
                }
                None => {}
            }
            (exchange.advance, events)
        }
        StepResult::OneSided {
            attacker,
            index,
            die,
        } => {
            if die.kind.is_attack() {
                if let Some(unit) = owner(state, attacker.other()) {
                    damage(state, config, unit, Pool::Hp, die.value, die.kind, &mut events);
                }
            } else if let Some(unit) = owner(state, attacker) {
                store_leftover(state, pair.slot(attacker), index, unit, &mut events);
            }
            (Advance::only(attacker), events)
        }
    }
}

fn damage(
    state: &mut BattleState,
    config: &BattleConfig,
    unit: UnitId,
    pool: Pool,
    amount: u32,
    source: DiceKind,
    events: &mut Vec<BattleEvent>,
) {
    let Some(target) = state.unit_mut(unit) else {
        return;
    };
    let was_alive = !target.is_dead();
    let was_composed = !target.is_incapacitated();

    let dealt = match pool {
        Pool::Hp => target.take_hp_damage(amount, source),
        Pool::Composure => target.take_composure_damage(amount, source),
    };
    events.push(BattleEvent::Damaged {
        unit,
        pool,
        amount: dealt,
        source,
    });

    if pool == Pool::Hp && config.attacks_stagger && source.is_attack() {
        let staggered = target.take_composure_damage(amount, source);
        events.push(BattleEvent::Damaged {
            unit,
            pool: Pool::Composure,
            amount: staggered,
            source,
        });
    }

    if was_alive && target.is_dead() {
        events.push(BattleEvent::Died { unit });
    }
    if was_composed && target.is_incapacitated() {
        events.push(BattleEvent::Incapacitated { unit });
    }
}

fn heal(state: &mut BattleState, unit: UnitId, amount: u32, events: &mut Vec<BattleEvent>) {
    let Some(target) = state.unit_mut(unit) else {
        return;
    };
    let healed = target.heal_composure(amount);
    events.push(BattleEvent::Healed {
        unit,
        pool: Pool::Composure,
        amount: healed,
    });
}

fn store_leftover(
    state: &mut BattleState,
    slot: SlotId,
    index: usize,
    unit: UnitId,
    events: &mut Vec<BattleEvent>,
) {
    let Some(kept) = state
        .slot(slot)
        .and_then(|slot| slot.card.as_ref())
        .and_then(|card| card.dice().get(index).cloned())
    else {
        return;
    };
    let Some(owner) = state.unit_mut(unit) else {
        return;
    };
    events.push(BattleEvent::SubactionStored {
        unit,
        kind: kept.kind(),
        value: kept.value().unwrap_or_default(),
    });
    owner.leftover.push(kept);
}
