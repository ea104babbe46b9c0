//! The game state snapshot.
//!
//! A `GameState` is an owned value. Every transition takes the snapshot by
//! value and returns a new one; nothing is edited behind a shared reference.
//! The collections that grow during resolution (stack, trigger queues,
//! replacement set, trace) are `im` persistent structures, so keeping an
//! older snapshot around costs a pointer copy and the older snapshot never
//! observes later changes.
//!
//! ## Contents
//!
//! - Phase and active player
//! - The action stack (LIFO)
//! - The AP and NAP triggered-ability queues
//! - Active replacement effects, keyed by registration order
//! - `next_sequence` / `next_trace_id` counters (monotonic, never reused)
//! - Per-player zone counters
//! - The legality flag (set when state-based rules have converged)
//! - The append-only trace
//! - Engine configuration and the injected chooser

use std::sync::Arc;

use im::{OrdMap, Vector};
use log::trace;
use serde::{Deserialize, Serialize};

use super::config::{EngineConfig, Phase};
use super::error::Result;
use super::player::{PlayerId, PlayerMap};
use super::zones::{Zone, ZoneCounts};
use crate::actions::Action;
use crate::choice::{Chooser, FirstChooser};
use crate::replacement::{ReplacementEffect, ReplacementId};
use crate::stack::ActionStack;
use crate::trace::{TraceEntry, TraceKind};
use crate::triggers::{TriggerQueue, TriggeredAbility};

fn default_chooser() -> Arc<dyn Chooser> {
    Arc::new(FirstChooser)
}

/// Immutable resolution snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    phase: Phase,
    turn_number: u32,
    active_player: PlayerId,

    pub(crate) stack: ActionStack,
    pub(crate) ap_queue: Vector<TriggeredAbility>,
    pub(crate) nap_queue: Vector<TriggeredAbility>,
    pub(crate) replacements: OrdMap<ReplacementId, ReplacementEffect>,

    next_sequence: u64,
    next_trace_id: u64,

    zones: PlayerMap<ZoneCounts>,
    legal: bool,
    trace: Vector<TraceEntry>,

    config: EngineConfig,

    /// Not part of the serialized snapshot; restored as [`FirstChooser`].
    #[serde(skip, default = "default_chooser")]
    chooser: Arc<dyn Chooser>,
}

impl GameState {
    /// Create an empty snapshot.
    ///
    /// Player 0 is active, the phase is `Beginning`, every zone is empty and
    /// ties are broken by [`FirstChooser`].
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let player_count = config.player_count;
        Self {
            phase: Phase::default(),
            turn_number: 1,
            active_player: PlayerId::new(0),
            stack: ActionStack::new(),
            ap_queue: Vector::new(),
            nap_queue: Vector::new(),
            replacements: OrdMap::new(),
            next_sequence: 0,
            next_trace_id: 0,
            zones: PlayerMap::with_default(player_count),
            legal: true,
            trace: Vector::new(),
            config,
            chooser: default_chooser(),
        }
    }

    /// Two-player snapshot with default configuration.
    #[must_use]
    pub fn two_player() -> Self {
        Self::new(EngineConfig::default())
    }

    // === Setup ===

    /// Replace the chooser.
    #[must_use]
    pub fn with_chooser(self, chooser: impl Chooser + 'static) -> Self {
        self.with_shared_chooser(Arc::new(chooser))
    }

    /// Replace the chooser with an already shared one.
    #[must_use]
    pub fn with_shared_chooser(mut self, chooser: Arc<dyn Chooser>) -> Self {
        self.chooser = chooser;
        self
    }

    /// Set the active player.
    #[must_use]
    pub fn with_active_player(mut self, player: PlayerId) -> Self {
        self.active_player = player;
        self
    }

    /// Set the count of `zone` for `player`.
    #[must_use]
    pub fn with_zone(mut self, player: PlayerId, zone: Zone, count: u32) -> Self {
        self.zones[player].set(zone, count);
        self
    }

    // === Read access ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn chooser(&self) -> &dyn Chooser {
        self.chooser.as_ref()
    }

    /// Zone counters for `player`.
    #[must_use]
    pub fn zones(&self, player: PlayerId) -> &ZoneCounts {
        &self.zones[player]
    }

    /// Count of `zone` for `player`.
    #[must_use]
    pub fn zone_count(&self, player: PlayerId, zone: Zone) -> u32 {
        self.zones[player].get(zone)
    }

    #[must_use]
    pub fn stack(&self) -> &ActionStack {
        &self.stack
    }

    /// Pending triggers in `queue`, in insertion order.
    #[must_use]
    pub fn queue(&self, queue: TriggerQueue) -> &Vector<TriggeredAbility> {
        match queue {
            TriggerQueue::Active => &self.ap_queue,
            TriggerQueue::NonActive => &self.nap_queue,
        }
    }

    #[must_use]
    pub fn has_pending_triggers(&self) -> bool {
        !self.ap_queue.is_empty() || !self.nap_queue.is_empty()
    }

    /// Active replacement effects in registration order.
    pub fn replacements(&self) -> impl Iterator<Item = (ReplacementId, &ReplacementEffect)> {
        self.replacements.iter().map(|(id, effect)| (*id, effect))
    }

    #[must_use]
    pub fn replacement(&self, id: ReplacementId) -> Option<&ReplacementEffect> {
        self.replacements.get(&id)
    }

    #[must_use]
    pub fn has_replacement(&self, id: ReplacementId) -> bool {
        self.replacements.contains_key(&id)
    }

    #[must_use]
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    #[must_use]
    pub fn next_trace_id(&self) -> u64 {
        self.next_trace_id
    }

    /// True once state-based rules have converged since the last change.
    #[must_use]
    pub fn is_legal(&self) -> bool {
        self.legal
    }

    #[must_use]
    pub fn trace(&self) -> &Vector<TraceEntry> {
        &self.trace
    }

    /// Trace kinds in order, for compact assertions.
    #[must_use]
    pub fn trace_kinds(&self) -> Vec<TraceKind> {
        self.trace.iter().map(|entry| entry.kind).collect()
    }

    /// Trace entries of one kind, in order.
    pub fn trace_of(&self, kind: TraceKind) -> impl Iterator<Item = &TraceEntry> {
        self.trace.iter().filter(move |entry| entry.kind == kind)
    }

    // === Trace ===

    /// Append a trace entry.
    #[must_use]
    pub fn record(mut self, kind: TraceKind, detail: impl Into<String>) -> Self {
        let entry = TraceEntry {
            ordinal: self.next_trace_id,
            kind,
            detail: detail.into(),
        };
        trace!("{entry}");
        self.next_trace_id += 1;
        self.trace.push_back(entry);
        self
    }

    // === Stack ===

    /// Push an action onto the stack.
    #[must_use]
    pub fn push_action(mut self, action: Action) -> Self {
        let detail = action.to_string();
        self.stack.push(action);
        self.record(TraceKind::Push, detail)
    }

    /// Pop the top action.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty. Callers must check first; an empty pop
    /// means the executor's loop invariant was broken.
    #[must_use]
    pub fn pop_action(mut self) -> (Self, Action) {
        let Some(action) = self.stack.pop() else {
            panic!("pop_action called on an empty stack");
        };
        let state = self.record(TraceKind::Pop, action.to_string());
        (state, action)
    }

    // === Triggers ===

    /// Queue a triggered ability.
    ///
    /// Abilities owned by the active player go to the AP queue, everything
    /// else to the NAP queue. `next_sequence` is advanced past the ability's
    /// sequence so later allocations never reuse it.
    #[must_use]
    pub fn enqueue_trigger(mut self, ability: TriggeredAbility) -> Self {
        let queue = if ability.owner() == self.active_player {
            TriggerQueue::Active
        } else {
            TriggerQueue::NonActive
        };
        self.next_sequence = self.next_sequence.max(ability.sequence() + 1);

        let detail = format!("{queue} {ability}");
        match queue {
            TriggerQueue::Active => self.ap_queue.push_back(ability),
            TriggerQueue::NonActive => self.nap_queue.push_back(ability),
        }
        self.record(TraceKind::TriggerQueued, detail)
    }

    /// Queue a triggered ability with the next free sequence number.
    #[must_use]
    pub fn trigger(mut self, owner: PlayerId, priority: i32, action: Action) -> Self {
        let sequence = self.alloc_sequence();
        self.enqueue_trigger(TriggeredAbility::new(owner, priority, sequence, action))
    }

    // === Replacement effects ===

    /// Add a replacement effect to the active set.
    ///
    /// Returns the new snapshot and the effect's id. Ids come from the same
    /// counter as trigger sequences, so registration order is id order.
    #[must_use]
    pub fn register_replacement(mut self, effect: ReplacementEffect) -> (Self, ReplacementId) {
        let id = ReplacementId::new(self.alloc_sequence());
        let detail = format!("{id} {}", effect.describe());
        self.replacements.insert(id, effect);
        (self.record(TraceKind::Registered, detail), id)
    }

    /// Remove a replacement effect. Recorded only if it was present.
    #[must_use]
    pub fn remove_replacement(mut self, id: ReplacementId) -> Self {
        match self.replacements.remove(&id) {
            Some(effect) => {
                let detail = format!("{id} {}", effect.describe());
                self.record(TraceKind::Consumed, detail)
            }
            None => self,
        }
    }

    // === Zones ===

    /// Move one object of `player` between zones.
    ///
    /// Returns the snapshot and whether anything moved.
    #[must_use]
    pub fn move_one(mut self, player: PlayerId, from: Zone, to: Zone) -> (Self, bool) {
        let moved = self.zones[player].move_one(from, to);
        (self, moved)
    }

    // === Turn structure ===

    /// Advance to the next phase.
    ///
    /// Leaving `Ending` starts a new turn and passes the active player to
    /// the next seat. Triggers already queued keep their queue.
    #[must_use]
    pub fn advance_phase(mut self) -> Self {
        if self.phase.ends_turn() {
            self.turn_number += 1;
            self.active_player = self.active_player.next(self.player_count());
        }
        self.phase = self.phase.next();
        let detail = format!("turn {} {} ({} active)", self.turn_number, self.phase, self.active_player);
        self.record(TraceKind::Phase, detail)
    }

    pub(crate) fn with_legal(mut self, legal: bool) -> Self {
        self.legal = legal;
        self
    }

    // === Encoding ===

    /// Encode the snapshot (without the chooser) for comparison and replay.
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Encode the trace for external exporters.
    pub fn encode_trace(&self) -> Result<Vec<u8>> {
        crate::trace::encode(&self.trace)
    }

    fn alloc_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }
}
