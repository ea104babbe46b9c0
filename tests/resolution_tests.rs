//! End-to-end resolution tests.
//!
//! These walk complete rules situations through the executor: the stack,
//! the replacement engine, the trigger queues and the default effects all
//! take part.

use rules_core::actions::Action;
use rules_core::core::{GameState, PlayerId, Zone};
use rules_core::engine::{run_all, Executor};
use rules_core::replacement::{EventCondition, ReplacementEffect, ReplacementOutcome};
use rules_core::rules::HandSizeLimit;
use rules_core::trace::TraceKind;
use rules_core::triggers::{drain_one, TriggeredAbility};

const OWNER: PlayerId = PlayerId::new(0);
const OPPONENT: PlayerId = PlayerId::new(1);

fn board(battlefield: u32) -> GameState {
    GameState::two_player()
        .with_zone(OWNER, Zone::Battlefield, battlefield)
        .with_zone(OWNER, Zone::Library, 5)
        .with_zone(OPPONENT, Zone::Library, 5)
}

// =============================================================================
// Destroy and death trigger
// =============================================================================

/// Nothing intercepts: the permanent dies and its owner draws.
#[test]
fn test_default_destroy_draws_a_card() {
    let state = board(1).push_action(Action::Destroy { owner: OWNER });

    let state = run_all(state).unwrap();

    assert_eq!(state.zone_count(OWNER, Zone::Battlefield), 0);
    assert_eq!(state.zone_count(OWNER, Zone::Graveyard), 1);
    assert_eq!(state.zone_count(OWNER, Zone::Hand), 1);
    assert!(state.stack().is_empty());
    assert!(!state.has_pending_triggers());

    // The draw trigger was queued, drained and resolved.
    assert_eq!(state.trace_of(TraceKind::TriggerQueued).count(), 1);
    assert_eq!(state.trace_of(TraceKind::TriggerDrained).count(), 1);
    assert_eq!(state.trace_of(TraceKind::Default).count(), 2);
}

/// A one-shot prevention stops the destroy and draws in its place.
#[test]
fn test_one_shot_prevention_draws_instead() {
    let (state, shield) = board(1).register_replacement(ReplacementEffect::prevent_next_destroy(OWNER));
    let state = state.push_action(Action::Destroy { owner: OWNER });

    let state = run_all(state).unwrap();

    assert_eq!(state.zone_count(OWNER, Zone::Battlefield), 1);
    assert_eq!(state.zone_count(OWNER, Zone::Graveyard), 0);
    assert_eq!(state.zone_count(OWNER, Zone::Hand), 1);
    assert!(!state.has_replacement(shield));
    assert_eq!(state.trace_of(TraceKind::Consumed).count(), 1);
}

/// The same owner's higher priority effect applies.
#[test]
fn test_higher_priority_same_controller_wins() {
    let (state, _) = board(1).register_replacement(
        ReplacementEffect::new(
            "low",
            OWNER,
            EventCondition::destroy_of(OWNER),
            ReplacementOutcome::Prevent,
        )
        .with_priority(1),
    );
    let (state, high) = state.register_replacement(
        ReplacementEffect::new(
            "high",
            OWNER,
            EventCondition::destroy_of(OWNER),
            ReplacementOutcome::Exile,
        )
        .with_priority(5),
    );

    let state = run_all(state.push_action(Action::Destroy { owner: OWNER })).unwrap();

    assert_eq!(state.zone_count(OWNER, Zone::Exile), 1);
    assert_eq!(state.zone_count(OWNER, Zone::Battlefield), 0);
    let chosen: Vec<_> = state.trace_of(TraceKind::Chosen).collect();
    assert_eq!(chosen.len(), 1);
    assert!(chosen[0].detail.starts_with(&high.to_string()));
}

/// Triggers in one queue drain by priority, then by sequence.
#[test]
fn test_drain_order_within_queue() {
    let state = GameState::two_player()
        .enqueue_trigger(TriggeredAbility::new(OWNER, 0, 2, Action::Destroy { owner: OPPONENT }))
        .enqueue_trigger(TriggeredAbility::new(OWNER, 2, 3, Action::Draw { player: OPPONENT }))
        .enqueue_trigger(TriggeredAbility::new(OWNER, 2, 1, Action::Draw { player: OWNER }));

    let state = drain_one(drain_one(drain_one(state)));

    let stacked: Vec<_> = state.stack().iter().cloned().collect();
    assert_eq!(stacked, vec![
        Action::Draw { player: OWNER },
        Action::Draw { player: OPPONENT },
        Action::Destroy { owner: OPPONENT },
    ]);
}

/// A flag-marking replacement chains into an exile replacement.
#[test]
fn test_two_stage_chain_exiles() {
    let (state, _) = board(1).register_replacement(ReplacementEffect::new(
        "mark",
        OWNER,
        EventCondition::destroy_of(OWNER).and(EventCondition::Flagged.negate()),
        ReplacementOutcome::MarkFlagged,
    ));
    let (state, _) = state.register_replacement(ReplacementEffect::new(
        "exile marked",
        OWNER,
        EventCondition::destroy_of(OWNER).and(EventCondition::Flagged),
        ReplacementOutcome::Exile,
    ));

    let state = run_all(state.push_action(Action::Destroy { owner: OWNER })).unwrap();

    assert_eq!(state.zone_count(OWNER, Zone::Battlefield), 0);
    assert_eq!(state.zone_count(OWNER, Zone::Graveyard), 0);
    assert_eq!(state.zone_count(OWNER, Zone::Exile), 1);
    assert_eq!(state.trace_of(TraceKind::Chained).count(), 1);
    // Replaced destroys do not trigger the death draw.
    assert_eq!(state.zone_count(OWNER, Zone::Hand), 0);
}

// =============================================================================
// Interleaving
// =============================================================================

/// Actions registered mid-resolution affect later actions on the stack.
#[test]
fn test_registration_during_resolution() {
    let state = board(2).push_action(Action::Sequence(vec![
        Action::Destroy { owner: OWNER },
        Action::RegisterReplacement(ReplacementEffect::prevent_next_destroy(OWNER)),
        Action::Destroy { owner: OWNER },
    ]));

    let state = run_all(state).unwrap();

    // First destroy went through, second was prevented.
    assert_eq!(state.zone_count(OWNER, Zone::Battlefield), 1);
    assert_eq!(state.zone_count(OWNER, Zone::Graveyard), 1);
    // One death draw plus one draw-instead.
    assert_eq!(state.zone_count(OWNER, Zone::Hand), 2);
    assert_eq!(state.replacements().count(), 0);
}

/// The stack empties before any queued trigger is drained.
#[test]
fn test_stack_resolves_before_triggers() {
    let state = board(2)
        .push_action(Action::Destroy { owner: OWNER })
        .push_action(Action::Destroy { owner: OWNER });

    let state = run_all(state).unwrap();

    let kinds: Vec<_> = state
        .trace_kinds()
        .into_iter()
        .filter(|k| matches!(k, TraceKind::Pop | TraceKind::TriggerDrained))
        .collect();
    assert_eq!(kinds, vec![
        TraceKind::Pop,
        TraceKind::Pop,
        TraceKind::TriggerDrained,
        TraceKind::Pop,
        TraceKind::TriggerDrained,
        TraceKind::Pop,
    ]);
    assert_eq!(state.zone_count(OWNER, Zone::Hand), 2);
}

/// Opponent's permanents dying put the trigger in the NAP queue.
#[test]
fn test_opponent_death_trigger_waits_for_active_player() {
    let state = board(1)
        .with_zone(OPPONENT, Zone::Battlefield, 1)
        .push_action(Action::Destroy { owner: OPPONENT })
        .push_action(Action::Destroy { owner: OWNER });

    let state = run_all(state).unwrap();

    let drained: Vec<_> = state
        .trace_of(TraceKind::TriggerDrained)
        .map(|e| e.detail.split_whitespace().next().unwrap_or("").to_string())
        .collect();
    assert_eq!(drained, vec!["AP", "NAP"]);
    assert_eq!(state.zone_count(OPPONENT, Zone::Hand), 1);
}

/// State-based rules see every intermediate draw.
#[test]
fn test_state_based_rules_between_steps() {
    let state = board(3).push_action(Action::Sequence(vec![
        Action::Destroy { owner: OWNER },
        Action::Destroy { owner: OWNER },
        Action::Destroy { owner: OWNER },
    ]));

    let state = Executor::with_rules(HandSizeLimit::new(1)).run_all(state).unwrap();

    assert_eq!(state.zone_count(OWNER, Zone::Hand), 1);
    // Three dead permanents and two discards.
    assert_eq!(state.zone_count(OWNER, Zone::Graveyard), 5);
    assert!(state.is_legal());
}

/// A replacement controlled by the opponent applies when the owner has none.
#[test]
fn test_opponent_replacement_applies_without_owner_effect() {
    let (state, _) = board(1).register_replacement(ReplacementEffect::new(
        "opponent's exile",
        OPPONENT,
        EventCondition::Kind(rules_core::events::EventKind::Destroy),
        ReplacementOutcome::Exile,
    ));

    let state = run_all(state.push_action(Action::Destroy { owner: OWNER })).unwrap();

    assert_eq!(state.zone_count(OWNER, Zone::Exile), 1);
}
