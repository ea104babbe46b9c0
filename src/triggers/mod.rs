//! Triggered abilities and their scheduler.
//!
//! Game rules queue a [`TriggeredAbility`] whenever something should happen
//! "when" or "whenever" an event occurs. Abilities wait in one of two
//! queues, chosen by whether their owner is the active player at the time
//! they are queued. [`drain_one`] moves exactly one ability onto the stack
//! per call:
//!
//! 1. The active player's queue is always used while it is non-empty.
//! 2. Within a queue, the highest priority goes first.
//! 3. Equal priorities go in insertion order (lowest sequence first).
//!
//! ## Example
//!
//! ```
//! use rules_core::actions::Action;
//! use rules_core::core::{GameState, PlayerId};
//! use rules_core::triggers::drain_one;
//!
//! let p0 = PlayerId::new(0);
//! let p1 = PlayerId::new(1);
//!
//! let state = GameState::two_player()
//!     .trigger(p1, 9, Action::Draw { player: p1 })
//!     .trigger(p0, 0, Action::Draw { player: p0 });
//!
//! // Player 0 is active, so their trigger goes first despite lower priority.
//! let state = drain_one(state);
//! assert_eq!(state.stack().peek(), Some(&Action::Draw { player: p0 }));
//! ```

mod ability;
mod scheduler;

pub use ability::{TriggerQueue, TriggeredAbility};
pub use scheduler::{drain_one, next_pending};
