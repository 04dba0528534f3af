//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::diagnostics::{DiagnosticsSummary, Transition};
use crate::fsm::PhaseId;
use crate::fsm::lamps::SignalView;

/// Structured events emitted by the controller.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The controller has started (carries the initial phase).
    Started(PhaseId),

    /// A phase's patterns were written and its dwell is about to begin.
    PhaseEntered {
        phase: PhaseId,
        dwell_secs: u16,
        signals: SignalView,
    },

    /// A cycle completed and the next phase was selected.
    Transition(Transition),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub phase: PhaseId,
    /// Completed cycles since start.
    pub cycles: u64,
    /// Seconds spent in dwell since start.
    pub dwell_total_secs: u64,
    /// Walk phases (either kind) entered since start.
    pub walk_phases: u64,
    /// Last sampled input condition bits.
    pub last_condition: u8,
    /// Per-phase entry counts and the last recorded transition.
    pub diagnostics: DiagnosticsSummary,
}
