//! Replacement effect conditions.
//!
//! A condition decides whether a replacement effect applies to a pending
//! event. Conditions are plain data so effects stay serializable and
//! comparable; combinators build anything the leaf conditions don't cover.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId, Zone};
use crate::events::{Event, EventKind};

/// When a replacement effect applies.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCondition {
    // === Event Filters ===

    /// Event is of this kind.
    Kind(EventKind),

    /// Event happens to this player.
    AffectedPlayer(PlayerId),

    /// Event carries the auxiliary flag.
    Flagged,

    // === State Filters ===

    /// The affected player has at least one permanent on the battlefield.
    OwnerHasPermanent,

    // === Combinators ===

    /// All conditions must hold.
    All(Vec<EventCondition>),

    /// At least one condition must hold.
    Any(Vec<EventCondition>),

    /// Condition must not hold.
    Not(Box<EventCondition>),

    // === Special ===

    Always,
    Never,
}

impl EventCondition {
    /// Destroy events affecting `owner`.
    pub fn destroy_of(owner: PlayerId) -> Self {
        Self::All(vec![Self::Kind(EventKind::Destroy), Self::AffectedPlayer(owner)])
    }

    /// Draw events for `player`.
    pub fn draw_of(player: PlayerId) -> Self {
        Self::All(vec![Self::Kind(EventKind::Draw), Self::AffectedPlayer(player)])
    }

    /// Create an AND condition.
    pub fn all(conditions: impl IntoIterator<Item = EventCondition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    /// Create an OR condition.
    pub fn any(conditions: impl IntoIterator<Item = EventCondition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    /// Negate this condition.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    #[must_use]
    pub fn and(self, other: EventCondition) -> Self {
        match self {
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            _ => Self::All(vec![self, other]),
        }
    }

    /// Check the condition against a pending event.
    #[must_use]
    pub fn matches(&self, state: &GameState, event: &Event) -> bool {
        match self {
            Self::Kind(kind) => event.kind() == *kind,
            Self::AffectedPlayer(player) => event.affected_player() == *player,
            Self::Flagged => event.is_flagged(),
            Self::OwnerHasPermanent => {
                state.zone_count(event.affected_player(), Zone::Battlefield) > 0
            }
            Self::All(conditions) => conditions.iter().all(|c| c.matches(state, event)),
            Self::Any(conditions) => conditions.iter().any(|c| c.matches(state, event)),
            Self::Not(condition) => !condition.matches(state, event),
            Self::Always => true,
            Self::Never => false,
        }
    }
}
