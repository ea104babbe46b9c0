//! The top-level resolution loop.

use log::{debug, warn};

use crate::core::{GameState, ResolutionError, Result};
use crate::rules::{NoStateBasedRules, StateBasedOutcome, StateBasedRules};
use crate::trace::TraceKind;
use crate::triggers::drain_one;

/// Result of a single executor iteration.
#[derive(Clone, Debug)]
pub enum Step {
    /// An action resolved or a trigger moved to the stack.
    Progressed(GameState),
    /// Stack empty and no triggers pending.
    Idle(GameState),
}

impl Step {
    #[must_use]
    pub fn into_state(self) -> GameState {
        match self {
            Step::Progressed(state) | Step::Idle(state) => state,
        }
    }
}

/// Runs actions, triggers and state-based rules until nothing is left.
///
/// ## Loop
///
/// 1. Settle state-based rules.
/// 2. If the stack is non-empty, pop and apply the top action.
/// 3. Otherwise, if a trigger is pending, drain one onto the stack.
/// 4. Otherwise stop.
/// 5. After 2 or 3, settle state-based rules again and repeat.
///
/// ## Example
///
/// ```
/// use rules_core::actions::Action;
/// use rules_core::core::{GameState, PlayerId, Zone};
/// use rules_core::engine::Executor;
///
/// let owner = PlayerId::new(0);
/// let state = GameState::two_player()
///     .with_zone(owner, Zone::Battlefield, 1)
///     .with_zone(owner, Zone::Library, 1)
///     .push_action(Action::Destroy { owner });
///
/// let state = Executor::new().run_all(state).unwrap();
/// assert_eq!(state.zone_count(owner, Zone::Graveyard), 1);
/// assert_eq!(state.zone_count(owner, Zone::Hand), 1);
/// ```
#[derive(Debug)]
pub struct Executor {
    rules: Box<dyn StateBasedRules>,
}

impl Executor {
    /// Executor without state-based rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(NoStateBasedRules)
    }

    /// Executor running `rules` as the state-based fixed point.
    #[must_use]
    pub fn with_rules(rules: impl StateBasedRules + 'static) -> Self {
        Self {
            rules: Box::new(rules),
        }
    }

    /// Resolve everything pending.
    ///
    /// # Errors
    ///
    /// Propagates replacement errors from applied actions, and reports
    /// [`ResolutionError::StepLimitExceeded`] /
    /// [`ResolutionError::StateBasedLimitExceeded`] when the configured
    /// bounds trip.
    pub fn run_all(&self, state: GameState) -> Result<GameState> {
        let mut state = self.settle(state)?;
        let mut steps: u64 = 0;

        loop {
            state = match self.step(state)? {
                Step::Progressed(state) => state,
                Step::Idle(state) => {
                    debug!("settled after {steps} steps");
                    return Ok(state);
                }
            };

            steps += 1;
            if let Some(limit) = state.config().max_steps {
                if steps >= limit && self.has_work(&state) {
                    warn!("executor passed {limit} steps");
                    return Err(ResolutionError::StepLimitExceeded { limit });
                }
            }
        }
    }

    /// Perform one iteration: resolve the top action or drain one trigger,
    /// then settle state-based rules.
    pub fn step(&self, state: GameState) -> Result<Step> {
        let state = if !state.stack().is_empty() {
            let (state, action) = state.with_legal(false).pop_action();
            action.apply(state)?
        } else if state.has_pending_triggers() {
            drain_one(state.with_legal(false))
        } else {
            return Ok(Step::Idle(state));
        };

        self.settle(state).map(Step::Progressed)
    }

    /// Run state-based rules until a pass reports no change.
    pub fn settle(&self, state: GameState) -> Result<GameState> {
        let mut state = state;
        let mut passes: u32 = 0;

        loop {
            match self.rules.apply(state) {
                StateBasedOutcome::Unchanged(settled) => return Ok(settled.with_legal(true)),
                StateBasedOutcome::Changed(changed) => {
                    passes += 1;
                    state = changed.record(TraceKind::StateBased, format!("pass {passes} changed"));
                }
            }

            if let Some(limit) = state.config().max_state_based_passes {
                if passes >= limit {
                    warn!("state-based rules still changing after {limit} passes");
                    return Err(ResolutionError::StateBasedLimitExceeded { limit });
                }
            }
        }
    }

    fn has_work(&self, state: &GameState) -> bool {
        !state.stack().is_empty() || state.has_pending_triggers()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve everything pending with no state-based rules.
pub fn run_all(state: GameState) -> Result<GameState> {
    Executor::new().run_all(state)
}
