//! Mock hardware for integration tests.
//!
//! The signal port and the dwell timer share one call log, so tests can
//! assert on the exact interleaving of lamp writes, dwells, and input
//! samples without touching real GPIO.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crossing::app::events::AppEvent;
use crossing::app::ports::{DwellTimer, EventSink, SignalPort};
use crossing::fsm::{Channel, InputCondition};

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwCall {
    Write(Channel, u8),
    Wait(u16),
    Read(u8),
}

pub type CallLog = Rc<RefCell<Vec<HwCall>>>;

// ── MockSignals ───────────────────────────────────────────────

/// Replays a script of input conditions; returns 0 once it runs out.
pub struct MockSignals {
    log: CallLog,
    script: VecDeque<u8>,
    pub chan_a: u8,
    pub chan_b: u8,
}

#[allow(dead_code)]
impl MockSignals {
    pub fn lamps(&self) -> (u8, u8) {
        (self.chan_a, self.chan_b)
    }

    pub fn push_inputs(&mut self, bits: &[u8]) {
        self.script.extend(bits.iter().copied());
    }
}

impl SignalPort for MockSignals {
    fn read_inputs(&mut self) -> InputCondition {
        let c = InputCondition::new(self.script.pop_front().unwrap_or(0));
        self.log.borrow_mut().push(HwCall::Read(c.bits()));
        c
    }

    fn write_outputs(&mut self, channel: Channel, pattern: u8) {
        match channel {
            Channel::A => self.chan_a = pattern,
            Channel::B => self.chan_b = pattern,
        }
        self.log.borrow_mut().push(HwCall::Write(channel, pattern));
    }
}

// ── MockTimer ─────────────────────────────────────────────────

pub struct MockTimer {
    log: CallLog,
    pub total_secs: u64,
    /// Panic after this many waits; lets a test bound `Controller::run`.
    pub panic_after: Option<usize>,
    waits: usize,
}

impl DwellTimer for MockTimer {
    fn wait(&mut self, seconds: u16) {
        if self.panic_after == Some(self.waits) {
            panic!("mock timer exhausted");
        }
        self.waits += 1;
        self.total_secs += u64::from(seconds);
        self.log.borrow_mut().push(HwCall::Wait(seconds));
    }
}

/// A signal port and timer sharing one call log.
pub fn board(script: &[u8]) -> (MockSignals, MockTimer, CallLog) {
    let log: CallLog = Rc::default();
    let signals = MockSignals {
        log: Rc::clone(&log),
        script: script.iter().copied().collect(),
        chan_a: 0,
        chan_b: 0,
    };
    let timer = MockTimer {
        log: Rc::clone(&log),
        total_secs: 0,
        panic_after: None,
        waits: 0,
    };
    (signals, timer, log)
}

// ── Recording sink ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn telemetry_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Telemetry(_)))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
