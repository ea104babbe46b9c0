//! The action stack.
//!
//! Actions wait here until the executor resolves them. Resolution is
//! strictly last-in-first-out: the most recently pushed action is always
//! the next to resolve, and resolving it may push more actions on top.
//!
//! ## Example
//!
//! ```
//! use rules_core::actions::Action;
//! use rules_core::core::PlayerId;
//! use rules_core::stack::ActionStack;
//!
//! let mut stack = ActionStack::new();
//! stack.push(Action::Draw { player: PlayerId::new(0) });
//! stack.push(Action::Destroy { owner: PlayerId::new(1) });
//!
//! assert_eq!(stack.pop(), Some(Action::Destroy { owner: PlayerId::new(1) }));
//! assert_eq!(stack.len(), 1);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::actions::Action;

/// LIFO stack of pending actions (index 0 = bottom, last = top).
///
/// Backed by an `im::Vector`, so cloning the snapshot that owns it is
/// cheap and never aliases mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStack {
    entries: Vector<Action>,
}

impl ActionStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vector::new() }
    }

    /// Push an action on top.
    pub fn push(&mut self, action: Action) {
        self.entries.push_back(action);
    }

    /// Remove and return the top action.
    pub fn pop(&mut self) -> Option<Action> {
        self.entries.pop_back()
    }

    /// Peek at the top action without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Action> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.entries.iter()
    }
}
