//! State-based rules hook.
//!
//! Game rules plug their legality checks in through [`StateBasedRules`].
//! The executor runs them after every action and every trigger drain, over
//! and over, until a pass leaves the state alone. The core only guarantees
//! when the hook runs; what it checks is up to the game.

mod state_based;

pub use state_based::{HandSizeLimit, NoStateBasedRules, RuleSet, StateBasedOutcome, StateBasedRules};
