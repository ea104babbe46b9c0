//! Replacement effect definitions.

use serde::{Deserialize, Serialize};

use super::condition::EventCondition;
use crate::actions::Action;
use crate::core::{GameState, PlayerId, Zone};
use crate::events::Event;

/// Identifier of an active replacement effect.
///
/// Allocated from the snapshot's sequence counter at registration, so id
/// order is registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReplacementId(pub u64);

impl ReplacementId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ReplacementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Replacement({})", self.0)
    }
}

/// What a replacement effect does to the event it intercepts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplacementOutcome {
    /// The event does not happen.
    Prevent,

    /// The event does not happen; the affected player gets a draw trigger.
    DrawInstead,

    /// Exile instead: a destroyed permanent leaves the battlefield without
    /// entering the graveyard, a drawn card goes from library to exile.
    Exile,

    /// Rewrite the event with its auxiliary flag set.
    MarkFlagged,

    /// The event happens to another player.
    Redirect { to: PlayerId },

    /// A different event happens.
    ReplaceWith(Event),
}

/// Result of applying a replacement outcome.
#[derive(Clone, Debug)]
pub struct Applied {
    pub state: GameState,
    /// Suppress the built-in default for the event.
    pub prevent_default: bool,
    /// Follow-up event, itself open to interception.
    pub next_event: Option<Event>,
}

impl Applied {
    fn prevented(state: GameState) -> Self {
        Self {
            state,
            prevent_default: true,
            next_event: None,
        }
    }

    fn chained(state: GameState, next: Event) -> Self {
        Self {
            state,
            prevent_default: false,
            next_event: Some(next),
        }
    }
}

impl ReplacementOutcome {
    /// Apply this outcome in place of `event`.
    #[must_use]
    pub fn apply(&self, state: GameState, event: &Event) -> Applied {
        match self {
            ReplacementOutcome::Prevent => Applied::prevented(state),

            ReplacementOutcome::DrawInstead => {
                let player = event.affected_player();
                Applied::prevented(state.trigger(player, 0, Action::Draw { player }))
            }

            ReplacementOutcome::Exile => {
                let from = match event {
                    Event::Destroy { .. } => Zone::Battlefield,
                    Event::Draw { .. } => Zone::Library,
                };
                let (state, _) = state.move_one(event.affected_player(), from, Zone::Exile);
                Applied::prevented(state)
            }

            ReplacementOutcome::MarkFlagged => Applied::chained(state, event.clone().flagged()),

            ReplacementOutcome::Redirect { to } => {
                Applied::chained(state, event.clone().redirected(*to))
            }

            ReplacementOutcome::ReplaceWith(next) => Applied::chained(state, next.clone()),
        }
    }
}

impl std::fmt::Display for ReplacementOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplacementOutcome::Prevent => f.write_str("prevent"),
            ReplacementOutcome::DrawInstead => f.write_str("draw instead"),
            ReplacementOutcome::Exile => f.write_str("exile instead"),
            ReplacementOutcome::MarkFlagged => f.write_str("mark flagged"),
            ReplacementOutcome::Redirect { to } => write!(f, "redirect to {to}"),
            ReplacementOutcome::ReplaceWith(event) => write!(f, "replace with {event}"),
        }
    }
}

/// A rule modifier that can intercept events.
///
/// ```
/// use rules_core::core::PlayerId;
/// use rules_core::replacement::{EventCondition, ReplacementEffect, ReplacementOutcome};
///
/// let owner = PlayerId::new(0);
/// let shield = ReplacementEffect::new(
///     "shield",
///     owner,
///     EventCondition::destroy_of(owner),
///     ReplacementOutcome::Prevent,
/// )
/// .with_priority(3)
/// .one_shot();
///
/// assert!(shield.one_shot);
/// assert_eq!(shield.describe(), "shield (Player 0, priority 3, one-shot): prevent");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplacementEffect {
    /// Human-readable name (chooser descriptions, trace).
    pub name: String,

    /// Player controlling the effect. The affected player's own effects
    /// apply before anyone else's.
    pub controller: PlayerId,

    /// Higher priority applies first among the same controller group.
    pub priority: i32,

    pub condition: EventCondition,

    pub outcome: ReplacementOutcome,

    /// Removed from the active set right after it first applies.
    pub one_shot: bool,
}

impl ReplacementEffect {
    /// Create a persistent, priority 0 effect.
    pub fn new(
        name: impl Into<String>,
        controller: PlayerId,
        condition: EventCondition,
        outcome: ReplacementOutcome,
    ) -> Self {
        Self {
            name: name.into(),
            controller,
            priority: 0,
            condition,
            outcome,
            one_shot: false,
        }
    }

    /// "The next time a permanent of `owner` would be destroyed, prevent
    /// that and draw a card instead." One-shot, controlled by `owner`.
    pub fn prevent_next_destroy(owner: PlayerId) -> Self {
        Self::new(
            "prevent next destroy",
            owner,
            EventCondition::destroy_of(owner),
            ReplacementOutcome::DrawInstead,
        )
        .one_shot()
    }

    /// Set priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Make the effect one-shot (builder pattern).
    #[must_use]
    pub fn one_shot(mut self) -> Self {
        self.one_shot = true;
        self
    }

    #[must_use]
    pub fn matches(&self, state: &GameState, event: &Event) -> bool {
        self.condition.matches(state, event)
    }

    #[must_use]
    pub fn apply(&self, state: GameState, event: &Event) -> Applied {
        self.outcome.apply(state, event)
    }

    /// One-line description used for chooser prompts and the trace.
    #[must_use]
    pub fn describe(&self) -> String {
        let shot = if self.one_shot { ", one-shot" } else { "" };
        format!(
            "{} ({}, priority {}{}): {}",
            self.name, self.controller, self.priority, shot, self.outcome
        )
    }
}
