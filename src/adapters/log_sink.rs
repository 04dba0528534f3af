//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured controller events to the
//! `log` facade (the ESP-IDF logger on the board, so UART / USB-CDC).

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(phase) => {
                info!("START | initial_phase={}", phase);
            }
            AppEvent::PhaseEntered {
                phase,
                dwell_secs,
                signals,
            } => {
                info!("PHASE | {} for {}s | {}", phase, dwell_secs, signals);
            }
            AppEvent::Transition(t) if t.is_hold() => {
                debug!("STATE | {} held (cond={})", t.from, t.condition);
            }
            AppEvent::Transition(t) => {
                info!("STATE | {} -> {} (cond={})", t.from, t.to, t.condition);
            }
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | phase={} | cycles={} | dwell={}s | walks={} | last_cond=0b{:04b} | \
                     entries={:?} | retained={}",
                    t.phase,
                    t.cycles,
                    t.dwell_total_secs,
                    t.walk_phases,
                    t.last_condition,
                    t.diagnostics.phase_entries,
                    t.diagnostics.retained,
                );
            }
        }
    }
}
