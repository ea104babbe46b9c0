//! Trigger scheduling: one ability from queue to stack per call.

use std::cmp::Reverse;

use im::Vector;
use log::debug;

use super::ability::{TriggerQueue, TriggeredAbility};
use crate::core::GameState;
use crate::trace::TraceKind;

/// Index of the next ability to drain within one queue.
fn select(queue: &Vector<TriggeredAbility>) -> Option<usize> {
    queue
        .iter()
        .enumerate()
        .min_by_key(|(_, ability)| (Reverse(ability.priority()), ability.sequence()))
        .map(|(index, _)| index)
}

/// The ability [`drain_one`] would move next, without moving it.
#[must_use]
pub fn next_pending(state: &GameState) -> Option<(TriggerQueue, &TriggeredAbility)> {
    [TriggerQueue::Active, TriggerQueue::NonActive]
        .into_iter()
        .find(|queue| !state.queue(*queue).is_empty())
        .and_then(|queue| {
            let pending = state.queue(queue);
            select(pending).map(|index| (queue, &pending[index]))
        })
}

/// Move one triggered ability onto the stack.
///
/// Returns the state unchanged when both queues are empty.
#[must_use]
pub fn drain_one(mut state: GameState) -> GameState {
    let queue = if !state.ap_queue.is_empty() {
        TriggerQueue::Active
    } else if !state.nap_queue.is_empty() {
        TriggerQueue::NonActive
    } else {
        return state;
    };

    let Some(index) = select(state.queue(queue)) else {
        return state;
    };
    let ability = match queue {
        TriggerQueue::Active => state.ap_queue.remove(index),
        TriggerQueue::NonActive => state.nap_queue.remove(index),
    };

    debug!(
        "draining {queue} trigger priority={} sequence={}",
        ability.priority(),
        ability.sequence()
    );
    let detail = format!("{queue} {ability}");
    state
        .record(TraceKind::TriggerDrained, detail)
        .push_action(ability.resolve())
}
