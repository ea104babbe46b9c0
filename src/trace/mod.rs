//! Append-only audit trail of engine decisions.
//!
//! Every ordering decision the engine makes (candidate counts, chooser
//! answers, applied and consumed replacements, trigger scheduling, stack
//! pushes and pops, default effects, state-based passes) is appended to the
//! snapshot's trace. Ordinals come from the snapshot's `next_trace_id` and
//! are never reused.
//!
//! The engine never reads the trace back. External exporters consume it
//! through [`GameState::trace`](crate::core::GameState::trace) or the
//! encoded form from [`encode`].

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::Result;

/// What kind of decision a trace entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceKind {
    /// Number of replacement effects matching the current event.
    Candidates,
    /// Which replacement effect was selected.
    Chosen,
    /// A replacement effect's outcome was applied.
    Applied,
    /// A one-shot replacement effect was removed.
    Consumed,
    /// A replacement effect was added to the active set.
    Registered,
    /// A replacement produced a follow-up event.
    Chained,
    /// The built-in default for an event ran.
    Default,
    /// A triggered ability was queued.
    TriggerQueued,
    /// A triggered ability was moved onto the stack.
    TriggerDrained,
    /// An action was pushed onto the stack.
    Push,
    /// An action was popped off the stack.
    Pop,
    /// A state-based pass changed the state.
    StateBased,
    /// The turn advanced to a new phase.
    Phase,
}

impl TraceKind {
    /// Stable string form, used by exporters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TraceKind::Candidates => "replacement.candidates",
            TraceKind::Chosen => "replacement.chosen",
            TraceKind::Applied => "replacement.applied",
            TraceKind::Consumed => "replacement.consumed",
            TraceKind::Registered => "replacement.registered",
            TraceKind::Chained => "replacement.chained",
            TraceKind::Default => "event.default",
            TraceKind::TriggerQueued => "trigger.queued",
            TraceKind::TriggerDrained => "trigger.drained",
            TraceKind::Push => "stack.push",
            TraceKind::Pop => "stack.pop",
            TraceKind::StateBased => "sba.pass",
            TraceKind::Phase => "phase.advance",
        }
    }
}

impl std::fmt::Display for TraceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Strictly increasing across the life of a game.
    pub ordinal: u64,
    pub kind: TraceKind,
    pub detail: String,
}

impl std::fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} {}", self.ordinal, self.kind, self.detail)
    }
}

/// Encode a trace for export.
pub fn encode(trace: &Vector<TraceEntry>) -> Result<Vec<u8>> {
    Ok(bincode::serialize(trace)?)
}

/// Decode a trace previously produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<Vector<TraceEntry>> {
    Ok(bincode::deserialize(bytes)?)
}
