//! Replacement effects.
//!
//! Replacement effects intercept an event before its default consequence
//! happens. Several may match the same event; the engine picks one per
//! round using these rules:
//!
//! 1. Effects controlled by the affected player come first.
//! 2. Higher priority comes next.
//! 3. Anything still tied is settled by the snapshot's chooser.
//!
//! An effect may prevent the event, do something else in its place, or
//! rewrite it into a new event ("chaining"). A rewritten event is matched
//! again against the effects still active. One-shot effects leave the
//! active set as soon as they apply.
//!
//! ## Example Usage
//!
//! ```
//! use rules_core::core::{GameState, PlayerId, Zone};
//! use rules_core::events::Event;
//! use rules_core::replacement::{
//!     process_event, EventCondition, ReplacementEffect, ReplacementOutcome,
//! };
//!
//! let owner = PlayerId::new(0);
//! let state = GameState::two_player().with_zone(owner, Zone::Battlefield, 1);
//!
//! // "If a permanent you control would be destroyed, exile it instead."
//! let (state, _) = state.register_replacement(ReplacementEffect::new(
//!     "rest in peace",
//!     owner,
//!     EventCondition::destroy_of(owner),
//!     ReplacementOutcome::Exile,
//! ));
//!
//! let state = process_event(state, Event::destroy(owner)).unwrap();
//! assert_eq!(state.zone_count(owner, Zone::Exile), 1);
//! assert_eq!(state.zone_count(owner, Zone::Graveyard), 0);
//! ```

mod condition;
mod effect;
mod engine;

pub use condition::EventCondition;
pub use effect::{Applied, ReplacementEffect, ReplacementId, ReplacementOutcome};
pub use engine::{process_event, resolve_event, EventOutcome};
