//! Replacement resolution for a single event.

use log::{debug, warn};
use smallvec::SmallVec;

use super::effect::{ReplacementEffect, ReplacementId};
use crate::core::{GameState, PlayerId, ResolutionError, Result, Zone};
use crate::events::Event;
use crate::trace::TraceKind;

/// How an event ended up being resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// A replacement prevented or rewrote the event.
    Replaced,
    /// Nothing intercepted it and the built-in default happened.
    Default,
    /// Nothing intercepted it but the default had nothing to act on.
    Fizzled,
}

/// Ranking key: affected player's own effects first, then higher priority.
fn rank(effect: &ReplacementEffect, affected: PlayerId) -> (bool, i32) {
    (effect.controller == affected, effect.priority)
}

/// Matching effects, best first. Equal keys keep registration order.
fn ranked_candidates<'a>(
    state: &'a GameState,
    event: &Event,
) -> SmallVec<[(ReplacementId, &'a ReplacementEffect); 4]> {
    let affected = event.affected_player();
    let mut candidates: SmallVec<[_; 4]> = state
        .replacements()
        .filter(|(_, effect)| effect.matches(state, event))
        .collect();
    candidates.sort_by(|(_, a), (_, b)| rank(b, affected).cmp(&rank(a, affected)));
    candidates
}

/// A selected candidate together with what to write in the trace.
struct Selection {
    id: ReplacementId,
    candidates: usize,
    detail: String,
}

/// Pick the effect to apply, asking the chooser when the leaders tie.
fn select(state: &GameState, event: &Event) -> Result<Option<Selection>> {
    let candidates = ranked_candidates(state, event);
    let Some((_, leader)) = candidates.first() else {
        return Ok(None);
    };

    let affected = event.affected_player();
    let key = rank(leader, affected);
    let tied: SmallVec<[(ReplacementId, &ReplacementEffect); 4]> = candidates
        .iter()
        .copied()
        .take_while(|(_, effect)| rank(effect, affected) == key)
        .collect();

    let (index, detail) = if tied.len() == 1 {
        (0, format!("{} sole leader", tied[0].0))
    } else {
        let describe = |i: usize| tied[i].1.describe();
        let index = state.chooser().choose(tied.len(), &describe);
        if index >= tied.len() {
            return Err(ResolutionError::InvalidChoice {
                index,
                count: tied.len(),
            });
        }
        (
            index,
            format!("{} chooser picked {} of {} tied", tied[index].0, index, tied.len()),
        )
    };

    Ok(Some(Selection {
        id: tied[index].0,
        candidates: candidates.len(),
        detail,
    }))
}

/// Resolve `event` against the active replacement effects.
///
/// Convenience form of [`resolve_event`] for callers that only need the
/// resulting state.
pub fn process_event(state: GameState, event: Event) -> Result<GameState> {
    resolve_event(state, event).map(|(state, _)| state)
}

/// Resolve `event` against the active replacement effects.
///
/// Each round collects the matching effects, applies the best one and
/// removes it if it is one-shot. An effect that returns a follow-up event
/// starts another round with that event; otherwise resolution stops. If no
/// effect prevented or rewrote the event, the built-in default runs.
///
/// # Errors
///
/// - [`ResolutionError::InvalidChoice`] if the chooser answers out of range
/// - [`ResolutionError::ChainLimitExceeded`] if chaining runs past
///   `max_chain_depth`
pub fn resolve_event(mut state: GameState, event: Event) -> Result<(GameState, EventOutcome)> {
    let mut event = event;
    let mut prevented = false;
    let mut depth: u32 = 0;

    loop {
        let selection = select(&state, &event)?;
        let count = selection.as_ref().map_or(0, |s| s.candidates);
        state = state.record(TraceKind::Candidates, format!("{count} for {event}"));

        let Some(selection) = selection else {
            break;
        };
        let Some(effect) = state.replacement(selection.id).cloned() else {
            break;
        };
        debug!("{event}: applying {} ({})", selection.id, effect.name);
        state = state.record(TraceKind::Chosen, selection.detail);

        let applied = effect.apply(state, &event);
        state = applied
            .state
            .record(TraceKind::Applied, format!("{} to {event}", effect.describe()));

        if effect.one_shot {
            state = state.remove_replacement(selection.id);
        }

        match applied.next_event {
            Some(next) => {
                prevented = true;
                depth += 1;
                if let Some(limit) = state.config().max_chain_depth {
                    if depth > limit {
                        warn!("replacement chain passed {limit} steps at {next}");
                        return Err(ResolutionError::ChainLimitExceeded { limit, event: next });
                    }
                }
                state = state.record(TraceKind::Chained, format!("{event} -> {next}"));
                event = next;
            }
            None => {
                prevented |= applied.prevent_default;
                break;
            }
        }
    }

    if prevented {
        return Ok((state, EventOutcome::Replaced));
    }
    Ok(apply_default(state, &event))
}

/// Built-in consequence of an event nothing intercepted.
fn apply_default(state: GameState, event: &Event) -> (GameState, EventOutcome) {
    let (player, from, to) = match event {
        Event::Destroy { owner, .. } => (*owner, Zone::Battlefield, Zone::Graveyard),
        Event::Draw { player } => (*player, Zone::Library, Zone::Hand),
    };

    let (state, moved) = state.move_one(player, from, to);
    if moved {
        let state = state.record(TraceKind::Default, format!("{event}: {from} -> {to}"));
        (state, EventOutcome::Default)
    } else {
        let state = state.record(TraceKind::Default, format!("{event}: {from} empty"));
        (state, EventOutcome::Fizzled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Chooser;
    use crate::replacement::{EventCondition, ReplacementOutcome};

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    fn prevent(name: &str, controller: PlayerId, owner: PlayerId) -> ReplacementEffect {
        ReplacementEffect::new(
            name,
            controller,
            EventCondition::destroy_of(owner),
            ReplacementOutcome::Prevent,
        )
    }

    #[derive(Debug)]
    struct OutOfRange;

    impl Chooser for OutOfRange {
        fn choose(&self, count: usize, _describe: &dyn Fn(usize) -> String) -> usize {
            count
        }
    }

    #[test]
    fn test_no_candidates_runs_default() {
        let state = GameState::two_player().with_zone(p(0), Zone::Battlefield, 1);

        let (state, outcome) = resolve_event(state, Event::destroy(p(0))).unwrap();

        assert_eq!(outcome, EventOutcome::Default);
        assert_eq!(state.zone_count(p(0), Zone::Graveyard), 1);
        assert_eq!(
            state.trace_kinds(),
            vec![TraceKind::Candidates, TraceKind::Default]
        );
    }

    #[test]
    fn test_default_on_empty_zone_fizzles() {
        let (state, outcome) =
            resolve_event(GameState::two_player(), Event::draw(p(1))).unwrap();

        assert_eq!(outcome, EventOutcome::Fizzled);
        assert_eq!(state.zone_count(p(1), Zone::Hand), 0);
    }

    #[test]
    fn test_affected_owner_beats_higher_priority() {
        let (state, theirs) = GameState::two_player()
            .with_zone(p(0), Zone::Battlefield, 1)
            .register_replacement(prevent("theirs", p(1), p(0)).with_priority(50));
        let (state, mine) = state.register_replacement(
            ReplacementEffect::new(
                "mine",
                p(0),
                EventCondition::destroy_of(p(0)),
                ReplacementOutcome::Exile,
            )
            .with_priority(-50),
        );

        let state = process_event(state, Event::destroy(p(0))).unwrap();

        let chosen: Vec<_> = state.trace_of(TraceKind::Chosen).collect();
        assert!(chosen[0].detail.starts_with(&mine.to_string()));
        assert!(!chosen[0].detail.starts_with(&theirs.to_string()));
        assert_eq!(state.zone_count(p(0), Zone::Exile), 1);
    }

    #[test]
    fn test_ties_go_to_chooser_in_registration_order() {
        let (state, first) = GameState::two_player()
            .register_replacement(prevent("a", p(0), p(0)));
        let (state, _) = state.register_replacement(prevent("b", p(0), p(0)));

        let state = process_event(state, Event::destroy(p(0))).unwrap();

        let chosen: Vec<_> = state.trace_of(TraceKind::Chosen).collect();
        assert_eq!(chosen[0].detail, format!("{first} chooser picked 0 of 2 tied"));
    }

    #[test]
    fn test_invalid_choice_is_error() {
        let (state, _) = GameState::two_player()
            .with_chooser(OutOfRange)
            .register_replacement(prevent("a", p(0), p(0)));
        let (state, _) = state.register_replacement(prevent("b", p(0), p(0)));

        let err = process_event(state, Event::destroy(p(0))).unwrap_err();
        assert!(matches!(err, ResolutionError::InvalidChoice { index: 2, count: 2 }));
    }

    #[test]
    fn test_one_shot_removed_after_firing() {
        let (state, id) = GameState::two_player()
            .with_zone(p(0), Zone::Battlefield, 2)
            .register_replacement(prevent("once", p(0), p(0)).one_shot());

        let state = process_event(state, Event::destroy(p(0))).unwrap();
        assert!(!state.has_replacement(id));
        assert_eq!(state.zone_count(p(0), Zone::Battlefield), 2);

        let state = process_event(state, Event::destroy(p(0))).unwrap();
        assert_eq!(state.zone_count(p(0), Zone::Battlefield), 1);
    }

    #[test]
    fn test_redirect_chain_hits_other_players_effects() {
        let (state, _) = GameState::two_player()
            .with_zone(p(1), Zone::Battlefield, 1)
            .register_replacement(
                ReplacementEffect::new(
                    "deflect",
                    p(0),
                    EventCondition::destroy_of(p(0)),
                    ReplacementOutcome::Redirect { to: p(1) },
                ),
            );
        let (state, _) = state.register_replacement(
            ReplacementEffect::new(
                "exile",
                p(1),
                EventCondition::destroy_of(p(1)),
                ReplacementOutcome::Exile,
            ),
        );

        let (state, outcome) = resolve_event(state, Event::destroy(p(0))).unwrap();

        assert_eq!(outcome, EventOutcome::Replaced);
        assert_eq!(state.zone_count(p(1), Zone::Exile), 1);
        assert_eq!(state.trace_of(TraceKind::Chained).count(), 1);
    }

    #[test]
    fn test_chain_without_follow_up_match_prevents_default() {
        let (state, _) = GameState::two_player()
            .with_zone(p(0), Zone::Battlefield, 1)
            .register_replacement(ReplacementEffect::new(
                "mark",
                p(0),
                EventCondition::destroy_of(p(0)).and(EventCondition::Flagged.negate()),
                ReplacementOutcome::MarkFlagged,
            ));

        let (state, outcome) = resolve_event(state, Event::destroy(p(0))).unwrap();

        assert_eq!(outcome, EventOutcome::Replaced);
        assert_eq!(state.zone_count(p(0), Zone::Battlefield), 1);
    }

    #[test]
    fn test_cyclic_chain_hits_limit() {
        let mut config = crate::core::EngineConfig::default();
        config.max_chain_depth = Some(5);
        let (state, _) = GameState::new(config).register_replacement(ReplacementEffect::new(
            "loop",
            p(0),
            EventCondition::destroy_of(p(0)),
            ReplacementOutcome::MarkFlagged,
        ));

        let err = process_event(state, Event::destroy(p(0))).unwrap_err();
        assert!(matches!(err, ResolutionError::ChainLimitExceeded { limit: 5, .. }));
    }
}
