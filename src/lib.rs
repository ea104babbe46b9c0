//! # rules-core
//!
//! Deterministic resolution core for trading-card-game rules engines.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not mutation**: every transition consumes a
//!    [`GameState`] and returns a new one. Persistent collections from
//!    `im-rs` keep retained snapshots cheap and untouched.
//!
//! 2. **Closed vocabularies**: actions, events, replacement conditions and
//!    outcomes are enums with exhaustive matching at every dispatch site.
//!
//! 3. **Deterministic by default**: the only open ordering decision goes
//!    through the injected [`Chooser`]. The default picks the first
//!    candidate, so identical inputs give identical state and trace.
//!
//! ## Ordering Disciplines
//!
//! - **Stack**: strict LIFO. Resolving an action may push more.
//! - **Replacement effects**: the affected player's own effects first,
//!   then higher priority, then the chooser. Effects may chain one event
//!   into another; one-shot effects are consumed when they apply.
//! - **Triggers**: active player's queue before non-active player's; by
//!   priority, then insertion order within a queue.
//! - **State-based fixed point**: after every action and trigger drain,
//!   re-run until nothing changes.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, zone counters, errors, the snapshot
//! - `events`: Events replacement effects can intercept
//! - `actions`: Deferred work that sits on the stack
//! - `stack`: The LIFO action stack
//! - `replacement`: Replacement effects and event resolution
//! - `triggers`: Triggered abilities and the AP/NAP scheduler
//! - `rules`: State-based rules hook
//! - `choice`: Tie-breaking choosers
//! - `trace`: Append-only audit trail
//! - `engine`: The executor loop

pub mod core;
pub mod events;
pub mod actions;
pub mod stack;
pub mod replacement;
pub mod triggers;
pub mod rules;
pub mod choice;
pub mod trace;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, GameState, Phase, PlayerId, PlayerMap, ResolutionError, Result, Zone,
    ZoneCounts,
};

pub use crate::events::{Event, EventKind};

pub use crate::actions::Action;

pub use crate::stack::ActionStack;

pub use crate::replacement::{
    process_event, resolve_event, EventCondition, EventOutcome, ReplacementEffect,
    ReplacementId, ReplacementOutcome,
};

pub use crate::triggers::{drain_one, TriggerQueue, TriggeredAbility};

pub use crate::rules::{HandSizeLimit, NoStateBasedRules, RuleSet, StateBasedOutcome, StateBasedRules};

pub use crate::choice::{Chooser, FirstChooser, SeededChooser};

pub use crate::trace::{TraceEntry, TraceKind};

pub use crate::engine::{run_all, Executor, Step};
