//! Application service: the hexagonal core.
//!
//! [`Controller`] owns the phase-table walker, the signal port and the dwell
//! timer.  Event sinks are passed in at each call site, so the whole loop
//! runs unchanged against mock adapters on the host.
//!
//! ```text
//!                 ┌────────────────────────┐
//!  SignalPort ◀──▶│       Controller       │ ──▶ EventSink
//!  DwellTimer ◀── │   Fsm · History        │
//!                 └────────────────────────┘
//! ```
//!
//! One cycle is strictly sequential: write channel A, write channel B,
//! dwell, sample the inputs once, select the next phase.  Lamps therefore
//! depend only on the phase, never on the inputs of the current cycle.

use log::{debug, info};

use crate::config::ControllerConfig;
use crate::diagnostics::{Transition, TransitionHistory};
use crate::fsm::lamps::SignalView;
use crate::fsm::{Channel, Fsm, InputCondition, PhaseId};

use super::events::{AppEvent, TelemetryData};
use super::ports::{DwellTimer, EventSink, SignalPort};

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// The traffic-signal controller.  Sole owner of its I/O and timer handles.
pub struct Controller<P: SignalPort, T: DwellTimer> {
    fsm: Fsm,
    io: P,
    timer: T,
    config: ControllerConfig,
    history: TransitionHistory,
    cycles: u64,
    dwell_total_secs: u64,
    walk_phases: u64,
    last_condition: InputCondition,
}

impl<P: SignalPort, T: DwellTimer> Controller<P, T> {
    /// Take ownership of the board handles.  The controller sits in
    /// [`PhaseId::START`]; nothing is driven until the first [`step`].
    ///
    /// [`step`]: Self::step
    pub fn new(io: P, timer: T, config: ControllerConfig) -> Self {
        Self {
            fsm: Fsm::default(),
            io,
            timer,
            config,
            history: TransitionHistory::new(),
            cycles: 0,
            dwell_total_secs: 0,
            walk_phases: 0,
            last_condition: InputCondition::NONE,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the initial phase.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let phase = self.fsm.current_phase();
        self.history.note_entry(phase);
        sink.emit(&AppEvent::Started(phase));
        info!("Controller started in {}", phase);
    }

    /// Run one full cycle of the current phase and move to its successor.
    pub fn step(&mut self, sink: &mut impl EventSink) -> Transition {
        let row = self.fsm.descriptor();
        let from = row.id;

        // 1. Lamps, channel A first
        self.io.write_outputs(Channel::A, row.output(Channel::A));
        self.io.write_outputs(Channel::B, row.output(Channel::B));
        sink.emit(&AppEvent::PhaseEntered {
            phase: from,
            dwell_secs: row.dwell_secs,
            signals: SignalView::decode(row.chan_a, row.chan_b),
        });

        // 2. Dwell
        self.timer.wait(row.dwell_secs);
        self.dwell_total_secs += u64::from(row.dwell_secs);

        // 3. One snapshot of all four lines
        let condition = self.io.read_inputs();
        self.last_condition = condition;

        // 4. Table lookup
        let to = self.fsm.advance(condition);
        self.cycles += 1;
        if matches!(to, PhaseId::PrimaryWalk | PhaseId::SecondaryWalk) {
            self.walk_phases += 1;
        }

        let transition = Transition {
            cycle: self.cycles,
            from,
            to,
            condition,
        };
        self.history.record(transition);
        debug!("cycle {}: {} -[{}]-> {}", self.cycles, from, condition, to);
        sink.emit(&AppEvent::Transition(transition));

        let every = u64::from(self.config.telemetry_every_cycles);
        if every != 0 && self.cycles % every == 0 {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        }

        transition
    }

    /// Start, then cycle forever.
    pub fn run(&mut self, sink: &mut impl EventSink) -> ! {
        self.start(sink);
        loop {
            self.step(sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            phase: self.fsm.current_phase(),
            cycles: self.cycles,
            dwell_total_secs: self.dwell_total_secs,
            walk_phases: self.walk_phases,
            last_condition: self.last_condition.bits(),
            diagnostics: self.history.summary(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> PhaseId {
        self.fsm.current_phase()
    }

    /// Completed cycles since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn history(&self) -> &TransitionHistory {
        &self.history
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Give the board handles back.
    pub fn into_parts(self) -> (P, T) {
        (self.io, self.timer)
    }
}
