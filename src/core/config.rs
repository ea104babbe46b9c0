//! Engine configuration and turn structure.
//!
//! - `Phase`: the turn phases the snapshot tracks
//! - `EngineConfig`: player count and the optional resolution bounds
//!
//! All bounds default to the unbounded behaviour except the replacement
//! chain depth, which defaults to [`EngineConfig::DEFAULT_CHAIN_DEPTH`].

use serde::{Deserialize, Serialize};

/// Turn phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Beginning,
    PrecombatMain,
    Combat,
    PostcombatMain,
    Ending,
}

impl Phase {
    /// The phase that follows this one. `Ending` wraps to `Beginning`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Phase::Beginning => Phase::PrecombatMain,
            Phase::PrecombatMain => Phase::Combat,
            Phase::Combat => Phase::PostcombatMain,
            Phase::PostcombatMain => Phase::Ending,
            Phase::Ending => Phase::Beginning,
        }
    }

    /// Whether advancing from this phase starts a new turn.
    #[must_use]
    pub const fn ends_turn(self) -> bool {
        matches!(self, Phase::Ending)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Beginning => "beginning",
            Phase::PrecombatMain => "precombat main",
            Phase::Combat => "combat",
            Phase::PostcombatMain => "postcombat main",
            Phase::Ending => "ending",
        };
        f.write_str(name)
    }
}

/// Resolution engine configuration.
///
/// Carried on every snapshot so free functions like
/// [`process_event`](crate::replacement::process_event) see the same bounds
/// as the executor.
///
/// ```
/// use rules_core::core::EngineConfig;
///
/// let config = EngineConfig::new(2)
///     .with_max_chain_depth(Some(8))
///     .with_max_steps(Some(10_000));
///
/// assert_eq!(config.max_chain_depth, Some(8));
/// assert_eq!(config.max_state_based_passes, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Maximum replacement chaining steps per event. `None` = unbounded.
    pub max_chain_depth: Option<u32>,

    /// Maximum executor iterations per `run_all`. `None` = unbounded.
    pub max_steps: Option<u64>,

    /// Maximum state-based passes per fixed point. `None` = unbounded.
    pub max_state_based_passes: Option<u32>,
}

impl EngineConfig {
    /// Default bound on replacement chaining.
    pub const DEFAULT_CHAIN_DEPTH: u32 = 100;

    /// Create a configuration for `player_count` players.
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            max_chain_depth: Some(Self::DEFAULT_CHAIN_DEPTH),
            max_steps: None,
            max_state_based_passes: None,
        }
    }

    /// Set the replacement chain bound.
    #[must_use]
    pub fn with_max_chain_depth(mut self, depth: Option<u32>) -> Self {
        self.max_chain_depth = depth;
        self
    }

    /// Set the executor step bound.
    #[must_use]
    pub fn with_max_steps(mut self, steps: Option<u64>) -> Self {
        self.max_steps = steps;
        self
    }

    /// Set the state-based pass bound.
    #[must_use]
    pub fn with_max_state_based_passes(mut self, passes: Option<u32>) -> Self {
        self.max_state_based_passes = passes;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(2)
    }
}
