//! Deferred units of work.
//!
//! An [`Action`] sits on the stack until the executor pops it and calls
//! [`Action::apply`]. Applying an action may push further actions, queue
//! triggered abilities, or register and consume replacement effects.
//!
//! The built-in destroy and draw actions route through the replacement
//! engine, so anything registered against those events gets its chance to
//! intercept them.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId, Result};
use crate::events::Event;
use crate::replacement::{resolve_event, EventOutcome, ReplacementEffect};

/// Priority given to the draw trigger a default destroy queues.
pub const DEATH_TRIGGER_PRIORITY: i32 = 0;

/// A pending unit of work.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Destroy one permanent of `owner`.
    ///
    /// If nothing replaces the destroy and a permanent actually moves to the
    /// graveyard, a "draw one card" trigger is queued for `owner`.
    Destroy { owner: PlayerId },

    /// `player` draws one card.
    Draw { player: PlayerId },

    /// Add a replacement effect to the active set.
    RegisterReplacement(ReplacementEffect),

    /// Queue a triggered ability that will put `action` on the stack.
    EnqueueTrigger {
        owner: PlayerId,
        priority: i32,
        action: Box<Action>,
    },

    /// Several actions, resolving in list order.
    Sequence(Vec<Action>),
}

impl Action {
    /// Trigger-queueing action.
    #[must_use]
    pub fn trigger(owner: PlayerId, priority: i32, action: Action) -> Self {
        Action::EnqueueTrigger {
            owner,
            priority,
            action: Box::new(action),
        }
    }

    /// Apply this action to `state`.
    pub fn apply(self, state: GameState) -> Result<GameState> {
        match self {
            Action::Destroy { owner } => {
                let (state, outcome) = resolve_event(state, Event::destroy(owner))?;
                Ok(match outcome {
                    EventOutcome::Default => {
                        state.trigger(owner, DEATH_TRIGGER_PRIORITY, Action::Draw { player: owner })
                    }
                    EventOutcome::Replaced | EventOutcome::Fizzled => state,
                })
            }

            Action::Draw { player } => {
                let (state, _) = resolve_event(state, Event::draw(player))?;
                Ok(state)
            }

            Action::RegisterReplacement(effect) => Ok(state.register_replacement(effect).0),

            Action::EnqueueTrigger { owner, priority, action } => {
                Ok(state.trigger(owner, priority, *action))
            }

            // Pushed in reverse so the first action ends up on top.
            Action::Sequence(actions) => Ok(actions
                .into_iter()
                .rev()
                .fold(state, |state, action| state.push_action(action))),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Destroy { owner } => write!(f, "destroy({owner})"),
            Action::Draw { player } => write!(f, "draw({player})"),
            Action::RegisterReplacement(effect) => write!(f, "register({})", effect.describe()),
            Action::EnqueueTrigger { owner, priority, action } => {
                write!(f, "trigger({owner}, priority {priority}, {action})")
            }
            Action::Sequence(actions) => write!(f, "sequence({} actions)", actions.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Zone;
    use crate::replacement::{EventCondition, ReplacementOutcome};
    use crate::triggers::TriggerQueue;

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    #[test]
    fn test_destroy_default_queues_draw() {
        let state = GameState::two_player().with_zone(p(0), Zone::Battlefield, 1);

        let state = Action::Destroy { owner: p(0) }.apply(state).unwrap();

        assert_eq!(state.zone_count(p(0), Zone::Battlefield), 0);
        assert_eq!(state.zone_count(p(0), Zone::Graveyard), 1);
        let queued = &state.queue(TriggerQueue::Active)[0];
        assert_eq!(queued.resolve(), Action::Draw { player: p(0) });
    }

    #[test]
    fn test_destroy_without_permanent_queues_nothing() {
        let state = Action::Destroy { owner: p(1) }
            .apply(GameState::two_player())
            .unwrap();

        assert_eq!(state.zone_count(p(1), Zone::Graveyard), 0);
        assert!(!state.has_pending_triggers());
    }

    #[test]
    fn test_replaced_destroy_queues_nothing() {
        let effect = ReplacementEffect::new(
            "indestructible",
            p(0),
            EventCondition::destroy_of(p(0)),
            ReplacementOutcome::Prevent,
        );
        let state = GameState::two_player().with_zone(p(0), Zone::Battlefield, 1);
        let state = Action::RegisterReplacement(effect).apply(state).unwrap();

        let state = Action::Destroy { owner: p(0) }.apply(state).unwrap();

        assert_eq!(state.zone_count(p(0), Zone::Battlefield), 1);
        assert!(!state.has_pending_triggers());
    }

    #[test]
    fn test_draw_moves_library_to_hand() {
        let state = GameState::two_player().with_zone(p(1), Zone::Library, 2);

        let state = Action::Draw { player: p(1) }.apply(state).unwrap();

        assert_eq!(state.zone_count(p(1), Zone::Library), 1);
        assert_eq!(state.zone_count(p(1), Zone::Hand), 1);
    }

    #[test]
    fn test_sequence_resolves_in_list_order() {
        let state = Action::Sequence(vec![
            Action::Draw { player: p(0) },
            Action::Draw { player: p(1) },
        ])
        .apply(GameState::two_player())
        .unwrap();

        assert_eq!(state.stack().peek(), Some(&Action::Draw { player: p(0) }));
        assert_eq!(state.stack().len(), 2);
    }

    #[test]
    fn test_enqueue_trigger_action() {
        let state = Action::trigger(p(1), 3, Action::Draw { player: p(1) })
            .apply(GameState::two_player())
            .unwrap();

        let queued = &state.queue(TriggerQueue::NonActive)[0];
        assert_eq!(queued.priority(), 3);
        assert_eq!(queued.owner(), p(1));
    }

    #[test]
    fn test_action_display() {
        let action = Action::trigger(p(0), 2, Action::Destroy { owner: p(1) });
        assert_eq!(
            action.to_string(),
            "trigger(Player 0, priority 2, destroy(Player 1))"
        );
    }
}
