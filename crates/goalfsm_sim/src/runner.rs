use std::cell::Cell;

use goalfsm_core::error::Result;
use goalfsm_core::fsm::{Action, ActionResult, Attempt, Engine, HeapEngine, TickOutcome, Transition};
use goalfsm_core::EngineConfig;
use tracing::{debug, info, warn};

use crate::config::SimConfig;

/// Action standing in for a hardware command: fails its first `failures`
/// attempts, then succeeds.
#[derive(Debug)]
pub struct FlakyAction {
    failures: u32,
    attempts: Cell<u32>,
}

impl FlakyAction {
    pub fn new(failures: u32) -> Self {
        Self {
            failures,
            attempts: Cell::new(0),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.get()
    }
}

impl Action<u16> for FlakyAction {
    fn execute(&self, attempt: Attempt<u16>) -> ActionResult {
        let n = self.attempts.get() + 1;
        self.attempts.set(n);
        if n <= self.failures {
            debug!(
                source = attempt.source,
                destination = attempt.destination,
                attempt = n,
                "simulated fault"
            );
            ActionResult::Failure
        } else {
            ActionResult::Success
        }
    }
}

/// Why a simulation stopped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StopReason {
    Reached,
    NoPath,
    TickLimit,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Summary {
    pub stop: StopReason,
    pub ticks: u64,
    pub advanced: u64,
    pub failed: u64,
    pub final_node: u16,
}

/// One action per configured edge, in edge order.
pub fn build_actions(config: &SimConfig) -> Vec<FlakyAction> {
    config
        .edges
        .iter()
        .map(|edge| FlakyAction::new(edge.failures))
        .collect()
}

pub fn build_transitions<'a>(config: &SimConfig, actions: &'a [FlakyAction]) -> Vec<Transition<'a, u16>> {
    config
        .edges
        .iter()
        .zip(actions)
        .map(|(edge, action)| {
            let transition = Transition::new(edge.source, edge.destination).with_action(action);
            if edge.blocked {
                transition.blocked()
            } else {
                transition
            }
        })
        .collect()
}

/// Engine plus the counters a run reports.
pub struct Sim<'a> {
    engine: HeapEngine<'a, u16>,
    max_ticks: u64,
    ticks: u64,
    advanced: u64,
    failed: u64,
}

impl<'a> Sim<'a> {
    pub fn new(config: &SimConfig, transitions: &'a [Transition<'a, u16>]) -> Result<Self> {
        let sizing = EngineConfig::new(config.capacity, config.nodes)?;
        let mut engine = Engine::new(sizing, config.start);
        for transition in transitions {
            engine.add_transition(transition)?;
        }
        engine.set_target(config.target);

        Ok(Self {
            engine,
            max_ticks: config.max_ticks,
            ticks: 0,
            advanced: 0,
            failed: 0,
        })
    }

    /// Tick once; `Some` when the run is over.
    pub fn step(&mut self) -> Result<Option<StopReason>> {
        if self.engine.is_idle() {
            return Ok(Some(StopReason::Reached));
        }
        if self.ticks >= self.max_ticks {
            return Ok(Some(StopReason::TickLimit));
        }
        self.ticks += 1;

        match self.engine.tick() {
            Ok(TickOutcome::Idle) => Ok(Some(StopReason::Reached)),
            Ok(TickOutcome::Advanced { from, to }) => {
                self.advanced += 1;
                info!(tick = self.ticks, from, to, "advanced");
                Ok(None)
            }
            Ok(TickOutcome::Failed { at, toward }) => {
                self.failed += 1;
                warn!(tick = self.ticks, at, toward, "transition failed, retrying");
                Ok(None)
            }
            Err(err) if err.is_no_path() => {
                debug!(tick = self.ticks, kind = ?err.kind, "stopping: {err}");
                Ok(Some(StopReason::NoPath))
            }
            Err(err) => Err(err),
        }
    }

    pub fn summary(&self, stop: StopReason) -> Summary {
        Summary {
            stop,
            ticks: self.ticks,
            advanced: self.advanced,
            failed: self.failed,
            final_node: self.engine.current(),
        }
    }
}

/// Run to completion without pacing.
pub fn run_ticks(config: &SimConfig) -> Result<Summary> {
    let actions = build_actions(config);
    let transitions = build_transitions(config, &actions);
    let mut sim = Sim::new(config, &transitions)?;

    loop {
        if let Some(stop) = sim.step()? {
            return Ok(sim.summary(stop));
        }
    }
}

/// Run to completion, one tick per `config.period`.
pub async fn run(config: &SimConfig) -> Result<Summary> {
    let actions = build_actions(config);
    let transitions = build_transitions(config, &actions);
    let mut sim = Sim::new(config, &transitions)?;
    let mut interval = tokio::time::interval(config.period);

    loop {
        interval.tick().await;
        if let Some(stop) = sim.step()? {
            return Ok(sim.summary(stop));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flaky_action_fails_then_succeeds() {
        let action = FlakyAction::new(2);
        let attempt = Attempt {
            source: 0,
            destination: 1,
            label: None,
        };
        assert_eq!(action.execute(attempt), ActionResult::Failure);
        assert_eq!(action.execute(attempt), ActionResult::Failure);
        assert_eq!(action.execute(attempt), ActionResult::Success);
        assert_eq!(action.attempts(), 3);
    }
}
