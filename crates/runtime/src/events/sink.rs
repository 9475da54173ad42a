use std::collections::BTreeMap;

use clash_core::{BattleEvent, Pool, UnitId};

/// Receiver of battle events.
pub trait EventSink: Send {
    fn publish(&mut self, event: &BattleEvent);
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn publish(&mut self, event: &BattleEvent) {
        (**self).publish(event);
    }
}

/// Forwards to every sink in turn.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn publish(&mut self, event: &BattleEvent) {
        self.0.publish(event);
        self.1.publish(event);
    }
}

/// Per-unit aggregate of logged events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct EventTotals {
    pub hp_damage: u32,
    pub composure_damage: u32,
    pub composure_healed: u32,
    pub subactions_stored: u32,
}

/// In-memory event log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<BattleEvent>,
    totals: BTreeMap<UnitId, EventTotals>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Totals for `unit`; all zero if nothing was logged for it.
    pub fn totals(&self, unit: UnitId) -> EventTotals {
        self.totals.get(&unit).copied().unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.totals.clear();
    }
}

impl EventSink for EventLog {
    fn publish(&mut self, event: &BattleEvent) {
        let totals = self.totals.entry(event.unit()).or_default();
        match *event {
            BattleEvent::Damaged {
                pool: Pool::Hp,
                amount,
                ..
            } => totals.hp_damage += amount,
            BattleEvent::Damaged {
                pool: Pool::Composure,
                amount,
                ..
            } => totals.composure_damage += amount,
            BattleEvent::Healed { amount, .. } => totals.composure_healed += amount,
            BattleEvent::SubactionStored { .. } => totals.subactions_stored += 1,
            BattleEvent::Died { .. } | BattleEvent::Incapacitated { .. } => {}
        }
        self.events.push(event.clone());
    }
}

/// Writes every event to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&mut self, event: &BattleEvent) {
        match event {
            BattleEvent::Died { .. } | BattleEvent::Incapacitated { .. } => {
                tracing::info!(event = event.as_str(), unit = %event.unit(), "{}", event);
            }
            _ => tracing::debug!(event = event.as_str(), unit = %event.unit(), "{}", event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clash_core::DiceKind;

    fn damaged(unit: u32, pool: Pool, amount: u32) -> BattleEvent {
        BattleEvent::Damaged {
            unit: UnitId(unit),
            pool,
            amount,
            source: DiceKind::Slash,
        }
    }

    #[test]
    fn log_aggregates_per_unit() {
        let mut log = EventLog::new();
        log.publish(&damaged(0, Pool::Hp, 3));
        log.publish(&damaged(0, Pool::Hp, 2));
        log.publish(&damaged(0, Pool::Composure, 1));
        log.publish(&BattleEvent::Healed {
            unit: UnitId(1),
            pool: Pool::Composure,
            amount: 4,
        });
        log.publish(&BattleEvent::Died { unit: UnitId(0) });

        assert_eq!(log.len(), 5);
        assert_eq!(
            log.totals(UnitId(0)),
            EventTotals {
                hp_damage: 5,
                composure_damage: 1,
                composure_healed: 0,
                subactions_stored: 0,
            }
        );
        assert_eq!(log.totals(UnitId(1)).composure_healed, 4);
        assert_eq!(log.totals(UnitId(7)), EventTotals::default());
    }

    #[test]
    fn pair_fans_out() {
        let mut sinks = (EventLog::new(), EventLog::new());
        sinks.publish(&damaged(0, Pool::Hp, 1));
        assert_eq!(sinks.0.len(), 1);
        assert_eq!(sinks.1.len(), 1);
    }
}
