//! Events the replacement engine can intercept.
//!
//! An event describes something that is about to happen. Replacement
//! effects inspect it before the engine applies its built-in default; a
//! replacement may swap it for a different event, which is then itself
//! open to interception.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Event discriminant, for conditions that only care about the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Destroy,
    Draw,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Destroy => f.write_str("destroy"),
            EventKind::Draw => f.write_str("draw"),
        }
    }
}

/// A pending event.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// One permanent of `owner` would be destroyed.
    ///
    /// `flagged` is an auxiliary marker replacements can set so that a
    /// later replacement in the same chain recognises the rewritten event.
    Destroy { owner: PlayerId, flagged: bool },

    /// `player` would draw one card.
    Draw { player: PlayerId },
}

impl Event {
    /// Unflagged destroy event.
    #[must_use]
    pub fn destroy(owner: PlayerId) -> Self {
        Event::Destroy { owner, flagged: false }
    }

    /// Draw event.
    #[must_use]
    pub fn draw(player: PlayerId) -> Self {
        Event::Draw { player }
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Destroy { .. } => EventKind::Destroy,
            Event::Draw { .. } => EventKind::Draw,
        }
    }

    /// The player the event happens to. Their own replacements apply first.
    #[must_use]
    pub fn affected_player(&self) -> PlayerId {
        match self {
            Event::Destroy { owner, .. } => *owner,
            Event::Draw { player } => *player,
        }
    }

    #[must_use]
    pub fn is_flagged(&self) -> bool {
        matches!(self, Event::Destroy { flagged: true, .. })
    }

    /// Same event with the auxiliary flag set. Draw events carry no flag.
    #[must_use]
    pub fn flagged(self) -> Self {
        match self {
            Event::Destroy { owner, .. } => Event::Destroy { owner, flagged: true },
            other => other,
        }
    }

    /// Same event happening to `player` instead.
    #[must_use]
    pub fn redirected(self, player: PlayerId) -> Self {
        match self {
            Event::Destroy { flagged, .. } => Event::Destroy { owner: player, flagged },
            Event::Draw { .. } => Event::Draw { player },
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Destroy { owner, flagged: false } => write!(f, "destroy({owner})"),
            Event::Destroy { owner, flagged: true } => write!(f, "destroy({owner}, flagged)"),
            Event::Draw { player } => write!(f, "draw({player})"),
        }
    }
}
