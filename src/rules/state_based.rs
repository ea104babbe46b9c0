//! State-based rule implementations.

use crate::core::{GameState, PlayerId, Zone};
use crate::trace::TraceKind;

/// Result of one state-based pass.
#[derive(Clone, Debug)]
pub enum StateBasedOutcome {
    /// The pass changed something; run another.
    Changed(GameState),
    /// Nothing to do; the fixed point is reached.
    Unchanged(GameState),
}

impl StateBasedOutcome {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(self, StateBasedOutcome::Changed(_))
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        match self {
            StateBasedOutcome::Changed(state) | StateBasedOutcome::Unchanged(state) => state,
        }
    }
}

/// A repeatable legality check.
///
/// ## Implementation Notes
///
/// - A pass must be idempotent once the state is legal: report
///   `Unchanged` when there is nothing to fix.
/// - Fix a little per pass if that is simpler; the executor keeps calling
///   until `Unchanged`.
/// - Rules that never converge make the executor loop unless
///   `max_state_based_passes` is set.
pub trait StateBasedRules: std::fmt::Debug {
    fn apply(&self, state: GameState) -> StateBasedOutcome;
}

/// No state-based rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStateBasedRules;

impl StateBasedRules for NoStateBasedRules {
    fn apply(&self, state: GameState) -> StateBasedOutcome {
        StateBasedOutcome::Unchanged(state)
    }
}

/// Several rules run in order as one pass.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn StateBasedRules>>,
}

impl RuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule (builder pattern).
    #[must_use]
    pub fn with_rule(mut self, rule: impl StateBasedRules + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl StateBasedRules for RuleSet {
    fn apply(&self, state: GameState) -> StateBasedOutcome {
        let mut changed = false;
        let mut state = state;
        for rule in &self.rules {
            let outcome = rule.apply(state);
            changed |= outcome.is_changed();
            state = outcome.into_state();
        }
        if changed {
            StateBasedOutcome::Changed(state)
        } else {
            StateBasedOutcome::Unchanged(state)
        }
    }
}

/// Players above `max` cards in hand put one into their graveyard per pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandSizeLimit {
    pub max: u32,
}

impl HandSizeLimit {
    #[must_use]
    pub const fn new(max: u32) -> Self {
        Self { max }
    }

    fn over_limit(&self, state: &GameState) -> Vec<PlayerId> {
        PlayerId::all(state.player_count())
            .filter(|player| state.zone_count(*player, Zone::Hand) > self.max)
            .collect()
    }
}

impl StateBasedRules for HandSizeLimit {
    fn apply(&self, state: GameState) -> StateBasedOutcome {
        let over = self.over_limit(&state);
        if over.is_empty() {
            return StateBasedOutcome::Unchanged(state);
        }

        let state = over.into_iter().fold(state, |state, player| {
            let (state, _) = state.move_one(player, Zone::Hand, Zone::Graveyard);
            let detail = format!("hand size {}: {player} discards", self.max);
            state.record(TraceKind::StateBased, detail)
        });
        StateBasedOutcome::Changed(state)
    }
}
