//! Battle session driver.
//!
//! The session owns the battle state and walks the round phases one
//! [`BattleSession::advance`] call at a time:
//!
//! ```text
//! BattleStart ──► RoundStart ──► EnemyPlan ──► AllyPlan ──► Resolve ─┐
//!                     ▲                                              │
//!                     └──────────────── (resolver drained) ◄─────────┘
//!                     │
//!                     └──► Finished (outcome decided or round limit)
//! ```
//!
//! The resolve phase steps the resolver once per call so a front end can pace
//! the playback; [`BattleSession::run`] drives everything to the end.

use core::fmt;

use clash_core::{
    BattleConfig, BattleEngine, BattleOutcome, BattleState, PcgRng, Resolver, RngOracle,
    RoundReport, Side, StepOutcome, UnitSpec, outcome,
};

use crate::api::{Commitment, PlanProvider, Result, RuntimeError};
use crate::events::{EventLog, EventSink, TracingSink};

/// Phase the next [`BattleSession::advance`] call will run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    BattleStart,
    RoundStart,
    EnemyPlan,
    AllyPlan,
    Resolve,
    /// `None` when the round limit stopped an undecided battle.
    Finished(Option<BattleOutcome>),
}

/// What one [`BattleSession::advance`] call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionStep {
    BattleStarted(RoundReport),
    RoundStarted(RoundReport),
    Planned {
        side: Side,
        accepted: usize,
        rejected: usize,
    },
    Resolving(StepOutcome),
    Finished(Option<BattleOutcome>),
}

/// Result of [`BattleSession::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RunSummary {
    /// Battle seed, enough to replay the run with the same planners.
    pub seed: u64,
    /// Rounds started.
    pub rounds: u32,
    pub outcome: Option<BattleOutcome>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Some(outcome) => write!(f, "{} after {} rounds", outcome, self.rounds),
            None => write!(f, "undecided after {} rounds", self.rounds),
        }
    }
}

/// A battle in progress.
pub struct BattleSession {
    state: BattleState,
    config: BattleConfig,
    rng: Box<dyn RngOracle>,
    ally: Box<dyn PlanProvider>,
    enemy: Box<dyn PlanProvider>,
    sink: Box<dyn EventSink>,
    log: EventLog,
    resolver: Option<Resolver>,
    phase: SessionPhase,
}

impl BattleSession {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Every event published so far.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Resolver of the round being resolved.
    pub fn resolver(&self) -> Option<&Resolver> {
        self.resolver.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Finished(_))
    }

    /// Runs exactly one phase (or one resolver step).
    pub fn advance(&mut self) -> SessionStep {
        match self.phase {
            SessionPhase::BattleStart => {
                let report =
                    BattleEngine::new(&mut self.state, &self.config).start_battle(&*self.rng);
                tracing::info!(
                    seed = self.state.seed,
                    units = self.state.units.len(),
                    "battle started"
                );
                self.phase = SessionPhase::RoundStart;
                SessionStep::BattleStarted(report)
            }
            SessionPhase::RoundStart => {
                if let Some(decided) = outcome(&self.state) {
                    return self.finish(Some(decided));
                }
                let report =
                    BattleEngine::new(&mut self.state, &self.config).start_round(&*self.rng);
                tracing::info!(round = report.round, "round started");
                for summary in self.state.summaries() {
                    tracing::debug!("{}", summary);
                }
                self.phase = SessionPhase::EnemyPlan;
                SessionStep::RoundStarted(report)
            }
            SessionPhase::EnemyPlan => {
                let plan = self.enemy.plan(Side::Enemy, &self.state);
                self.phase = SessionPhase::AllyPlan;
                self.submit(Side::Enemy, plan)
            }
            SessionPhase::AllyPlan => {
                let plan = self.ally.plan(Side::Ally, &self.state);
                let step = self.submit(Side::Ally, plan);

                let resolver = BattleEngine::new(&mut self.state, &self.config).begin_resolution();
                tracing::debug!(pairs = resolver.queue().len(), "resolution queued");
                self.resolver = Some(resolver);
                self.phase = SessionPhase::Resolve;
                step
            }
            SessionPhase::Resolve => {
                let step = match self.resolver.as_mut() {
                    Some(resolver) => resolver.step(&mut self.state, &self.config, &*self.rng),
                    None => StepOutcome::Drained,
                };
                match &step {
                    StepOutcome::Applied { events, .. } => {
                        for event in events {
                            self.log.publish(event);
                            self.sink.publish(event);
                        }
                    }
                    StepOutcome::Drained => {
                        self.resolver = None;
                        self.phase = SessionPhase::RoundStart;
                    }
                    other => tracing::trace!(?other, "resolver step"),
                }
                SessionStep::Resolving(step)
            }
            SessionPhase::Finished(decided) => SessionStep::Finished(decided),
        }
    }

    /// Advances until the battle is decided or `max_rounds` rounds have been
    /// resolved.
    pub fn run(&mut self, max_rounds: u32) -> RunSummary {
        loop {
            match self.phase {
                SessionPhase::Finished(decided) => {
                    return RunSummary {
                        seed: self.state.seed,
                        rounds: self.state.round,
                        outcome: decided,
                    };
                }
                SessionPhase::RoundStart if self.state.round >= max_rounds => {
                    self.finish(outcome(&self.state));
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn finish(&mut self, decided: Option<BattleOutcome>) -> SessionStep {
        self.resolver = None;
        self.phase = SessionPhase::Finished(decided);
        match decided {
            Some(result) => tracing::info!(round = self.state.round, "battle over: {}", result),
            None => tracing::info!(round = self.state.round, "round limit reached"),
        }
        SessionStep::Finished(decided)
    }

    /// Feeds a plan to the engine, skipping rejected commitments.
    fn submit(&mut self, side: Side, plan: Vec<Commitment>) -> SessionStep {
        let mut engine = BattleEngine::new(&mut self.state, &self.config);
        let mut accepted = 0;
        let mut rejected = 0;
        for commitment in plan {
            match engine.commit(commitment.slot, commitment.card, commitment.target) {
                Ok(()) => accepted += 1,
                Err(err) => {
                    rejected += 1;
                    tracing::warn!(%side, slot = %commitment.slot, "commitment rejected: {}", err);
                }
            }
        }
        tracing::debug!(%side, accepted, rejected, "plan submitted");
        SessionStep::Planned {
            side,
            accepted,
            rejected,
        }
    }
}

/// Builder for [`BattleSession`].
pub struct SessionBuilder {
    config: BattleConfig,
    seed: Option<u64>,
    roster: Vec<UnitSpec>,
    rng: Option<Box<dyn RngOracle>>,
    ally: Option<Box<dyn PlanProvider>>,
    enemy: Option<Box<dyn PlanProvider>>,
    sink: Option<Box<dyn EventSink>>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: BattleConfig::default(),
            seed: None,
            roster: Vec::new(),
            rng: None,
            ally: None,
            enemy: None,
            sink: None,
        }
    }

    /// Override battle configuration
    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// Battle seed. A random seed is drawn when none is set.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Units to spawn, in roster order.
    pub fn roster(mut self, roster: Vec<UnitSpec>) -> Self {
        self.roster = roster;
        self
    }

    /// Replace the default [`PcgRng`] oracle.
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn ally_planner(mut self, provider: impl PlanProvider + 'static) -> Self {
        self.ally = Some(Box::new(provider));
        self
    }

    pub fn enemy_planner(mut self, provider: impl PlanProvider + 'static) -> Self {
        self.enemy = Some(Box::new(provider));
        self
    }

    /// Extra event sink. Defaults to [`TracingSink`].
    pub fn sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Spawns the roster and returns a session at [`SessionPhase::BattleStart`].
    pub fn build(self) -> Result<BattleSession> {
        let ally = self
            .ally
            .ok_or(RuntimeError::ProviderNotSet { side: Side::Ally })?;
        let enemy = self
            .enemy
            .ok_or(RuntimeError::ProviderNotSet { side: Side::Enemy })?;
        if self.roster.is_empty() {
            return Err(RuntimeError::EmptyRoster);
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        let mut state = BattleState::new(seed);
        for spec in self.roster {
            let name = spec.name.clone();
            let id = state.spawn(spec, &self.config)?;
            tracing::debug!(%id, %name, "unit spawned");
        }

        Ok(BattleSession {
            state,
            config: self.config,
            rng: self.rng.unwrap_or_else(|| Box::new(PcgRng)),
            ally,
            enemy,
            sink: self.sink.unwrap_or_else(|| Box::new(TracingSink)),
            log: EventLog::new(),
            resolver: None,
            phase: SessionPhase::BattleStart,
        })
    }
}
