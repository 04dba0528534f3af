//! Port traits: the hexagonal boundary between the controller and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (lamp/input pins, the dwell delay, event sinks) implement
//! these traits.  The [`Controller`](super::service::Controller) owns its
//! signal port and timer, and borrows an event sink per call, so the domain
//! core never touches hardware directly.
//!
//! None of the ports return errors.  The loop has nowhere to send one: an
//! adapter that hits a hardware fault logs it and carries on.

use crate::fsm::{Channel, InputCondition};

// ───────────────────────────────────────────────────────────────
// Signal port (driven adapter: domain ↔ lamps and input lines)
// ───────────────────────────────────────────────────────────────

/// Digital I/O for the intersection.
pub trait SignalPort {
    /// Sample all four input lines at once.
    fn read_inputs(&mut self) -> InputCondition;

    /// Drive one lamp channel to `pattern`.  Only the channel's wired bits
    /// ([`Channel::mask`]) are applied; reserved bits are ignored.
    fn write_outputs(&mut self, channel: Channel, pattern: u8);
}

// ───────────────────────────────────────────────────────────────
// Dwell timer port (driven adapter: domain → delay primitive)
// ───────────────────────────────────────────────────────────────

/// Blocking delay measured in whole seconds.
pub trait DwellTimer {
    /// Block for at least `seconds`.  Granularity is one second or finer.
    /// Returns immediately for zero.
    fn wait(&mut self, seconds: u16);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

impl<S: SignalPort + ?Sized> SignalPort for &mut S {
    fn read_inputs(&mut self) -> InputCondition {
        (**self).read_inputs()
    }

    fn write_outputs(&mut self, channel: Channel, pattern: u8) {
        (**self).write_outputs(channel, pattern);
    }
}

impl<T: DwellTimer + ?Sized> DwellTimer for &mut T {
    fn wait(&mut self, seconds: u16) {
        (**self).wait(seconds);
    }
}

/// Sink that drops every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::AppEvent) {}
}
