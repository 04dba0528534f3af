//! Runtime diagnostics for the control loop.
//!
//! Keeps the most recent transitions in a fixed-capacity ring
//! ([`heapless::HistoryBuffer`]) and counts how often each phase has been
//! entered.  Nothing is persisted; the controller owns one instance and
//! exposes it read-only.

use serde::Serialize;

use crate::fsm::{InputCondition, PhaseId};

/// Transitions kept in memory.  Older entries are overwritten.
pub const HISTORY_DEPTH: usize = 32;

/// One completed cycle: the phase that held, the snapshot that ended it,
/// and the phase that was selected next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// 1-based index of the cycle that produced this transition.
    pub cycle: u64,
    pub from: PhaseId,
    pub to: PhaseId,
    pub condition: InputCondition,
}

impl Transition {
    /// True when the phase repeated itself (e.g. `SecondaryGo` with no
    /// requests).
    pub fn is_hold(&self) -> bool {
        self.from == self.to
    }
}

/// Bounded transition log plus per-phase entry counters.
pub struct TransitionHistory {
    recent: heapless::HistoryBuffer<Transition, HISTORY_DEPTH>,
    entries: [u64; PhaseId::COUNT],
}

impl Default for TransitionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionHistory {
    pub fn new() -> Self {
        Self {
            recent: heapless::HistoryBuffer::new(),
            entries: [0; PhaseId::COUNT],
        }
    }

    /// Count an entry into `phase` without a transition (power-up).
    pub fn note_entry(&mut self, phase: PhaseId) {
        self.entries[phase as usize] = self.entries[phase as usize].saturating_add(1);
    }

    pub fn record(&mut self, t: Transition) {
        self.note_entry(t.to);
        self.recent.write(t);
    }

    /// Most recent transition, if any cycle has completed.
    pub fn last(&self) -> Option<&Transition> {
        self.recent.recent()
    }

    /// Retained transitions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.recent.oldest_ordered()
    }

    /// Number of retained transitions (at most [`HISTORY_DEPTH`]).
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.len() == 0
    }

    /// How many times `phase` has been entered since power-up.
    pub fn entries(&self, phase: PhaseId) -> u64 {
        self.entries[phase as usize]
    }

    /// Snapshot carried by each telemetry event.
    pub fn summary(&self) -> DiagnosticsSummary {
        DiagnosticsSummary {
            phase_entries: self.entries,
            retained: self.len(),
            last: self.last().map(|t| (t.from.name(), t.condition.bits(), t.to.name())),
        }
    }
}

/// Serializable snapshot of the diagnostics, logged with every `TELEM` line.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsSummary {
    /// Entry count per phase, in table order.
    pub phase_entries: [u64; PhaseId::COUNT],
    pub retained: usize,
    /// `(from, condition bits, to)` of the last transition.
    pub last: Option<(&'static str, u8, &'static str)>,
}
