//! Triggered ability values.

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::core::PlayerId;

/// Which of the two trigger queues an ability waits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerQueue {
    /// Abilities owned by the active player.
    Active,
    /// Abilities owned by anyone else.
    NonActive,
}

impl std::fmt::Display for TriggerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerQueue::Active => f.write_str("AP"),
            TriggerQueue::NonActive => f.write_str("NAP"),
        }
    }
}

/// A queued triggered ability.
///
/// Immutable once created. Higher `priority` drains first; among equal
/// priorities the lower `sequence` (earlier insertion) drains first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredAbility {
    owner: PlayerId,
    priority: i32,
    sequence: u64,
    action: Action,
}

impl TriggeredAbility {
    #[must_use]
    pub fn new(owner: PlayerId, priority: i32, sequence: u64, action: Action) -> Self {
        Self {
            owner,
            priority,
            sequence,
            action,
        }
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The action this ability puts on the stack.
    #[must_use]
    pub fn resolve(&self) -> Action {
        self.action.clone()
    }
}

impl std::fmt::Display for TriggeredAbility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} priority={} sequence={} {}",
            self.owner, self.priority, self.sequence, self.action
        )
    }
}
