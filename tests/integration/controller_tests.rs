//! Integration tests for the Controller → ports pipeline.
//!
//! Drives the real phase table through the mock board and checks what
//! reached the lamps, the timer, and the event sink.

use crate::mock_hw::{CallLog, HwCall, MockSignals, MockTimer, RecordingSink, board};

use crossing::app::events::AppEvent;
use crossing::app::ports::NullSink;
use crossing::app::service::Controller;
use crossing::config::ControllerConfig;
use crossing::fsm::{Channel, PhaseId};

fn controller(script: &[u8]) -> (Controller<MockSignals, MockTimer>, CallLog) {
    let (signals, timer, log) = board(script);
    (Controller::new(signals, timer, ControllerConfig::default()), log)
}

// ── Cycle ordering ────────────────────────────────────────────

#[test]
fn every_cycle_is_write_a_write_b_wait_read() {
    let (mut c, log) = controller(&[2, 2, 4, 2, 0, 0xF]);
    for _ in 0..6 {
        c.step(&mut NullSink);
    }

    let calls = log.borrow();
    assert_eq!(calls.len(), 6 * 4);
    for cycle in calls.chunks(4) {
        assert!(
            matches!(
                cycle,
                [HwCall::Write(Channel::A, _), HwCall::Write(Channel::B, _), HwCall::Wait(_), HwCall::Read(_)]
            ),
            "out of order: {cycle:?}"
        );
    }
}

#[test]
fn first_cycle_drives_secondary_go() {
    let (mut c, log) = controller(&[0]);
    c.step(&mut NullSink);
    assert_eq!(
        log.borrow().as_slice(),
        &[
            HwCall::Write(Channel::A, 0x10),
            HwCall::Write(Channel::B, 0x02),
            HwCall::Wait(7),
            HwCall::Read(0x0),
        ]
    );
}

// ── Scenarios ─────────────────────────────────────────────────

#[test]
fn no_requests_holds_secondary_go() {
    let (mut c, _log) = controller(&[0, 0, 0]);
    for _ in 0..3 {
        let t = c.step(&mut NullSink);
        assert!(t.is_hold());
    }
    let (signals, timer) = c.into_parts();
    assert_eq!(signals.lamps(), (0x10, 0x02));
    assert_eq!(timer.total_secs, 21);
}

#[test]
fn primary_walk_request_trace() {
    let (mut c, log) = controller(&[2, 2, 4, 2]);
    let mut sink = RecordingSink::new();
    c.start(&mut sink);
    let trace: Vec<PhaseId> = (0..4).map(|_| c.step(&mut sink).to).collect();
    assert_eq!(
        trace,
        [
            PhaseId::SecondaryWait,
            PhaseId::PrimaryWalk,
            PhaseId::SecondaryGoShort,
            PhaseId::SecondaryWait,
        ]
    );

    let waits: Vec<u16> = log
        .borrow()
        .iter()
        .filter_map(|c| match c {
            HwCall::Wait(s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(waits, [7, 2, 4, 3]);
}

#[test]
fn secondary_walk_lights_both_walk_lamps() {
    // SG -2-> SWt -0-> PG -0-> PWt -2-> SWk
    let (mut c, _log) = controller(&[2, 0, 0, 2, 0]);
    for _ in 0..4 {
        c.step(&mut NullSink);
    }
    assert_eq!(c.phase(), PhaseId::SecondaryWalk);
    c.step(&mut NullSink);
    let (signals, _) = c.into_parts();
    assert_eq!(signals.lamps(), (0x10, 0x38));
}

#[test]
fn lamps_depend_only_on_phase() {
    // Same phase entered under different conditions shows the same lamps.
    let (mut a, _) = controller(&[0x4, 0x0]);
    let (mut b, _) = controller(&[0x6, 0x0]);
    a.step(&mut NullSink);
    b.step(&mut NullSink);
    assert_eq!(a.phase(), PhaseId::SecondaryWait);
    assert_eq!(b.phase(), PhaseId::SecondaryWait);
    a.step(&mut NullSink);
    b.step(&mut NullSink);
    assert_eq!(a.into_parts().0.lamps(), b.into_parts().0.lamps());
}

// ── Events & telemetry ────────────────────────────────────────

#[test]
fn events_follow_cycle_order() {
    let (mut c, _log) = controller(&[0x4]);
    let mut sink = RecordingSink::new();
    c.start(&mut sink);
    c.step(&mut sink);

    assert!(matches!(sink.events[0], AppEvent::Started(PhaseId::SecondaryGo)));
    assert!(matches!(
        sink.events[1],
        AppEvent::PhaseEntered { phase: PhaseId::SecondaryGo, dwell_secs: 7, .. }
    ));
    match &sink.events[2] {
        AppEvent::Transition(t) => {
            assert_eq!((t.cycle, t.from, t.to), (1, PhaseId::SecondaryGo, PhaseId::SecondaryWait));
        }
        other => panic!("expected transition, got {other:?}"),
    }
}

#[test]
fn telemetry_every_n_cycles() {
    let (signals, timer, _log) = board(&[]);
    let config = ControllerConfig {
        telemetry_every_cycles: 3,
        ..Default::default()
    };
    let mut c = Controller::new(signals, timer, config);
    let mut sink = RecordingSink::new();
    for _ in 0..10 {
        c.step(&mut sink);
    }
    assert_eq!(sink.telemetry_count(), 3);

    let last = sink.events.iter().rev().find_map(|e| match e {
        AppEvent::Telemetry(t) => Some(t.clone()),
        _ => None,
    });
    let last = last.expect("telemetry emitted");
    assert_eq!(last.cycles, 9);
    assert_eq!(last.phase, PhaseId::SecondaryGo);
    assert_eq!(last.dwell_total_secs, 63);

    // Diagnostics ride along with every telemetry snapshot.
    assert_eq!(last.diagnostics.phase_entries[PhaseId::SecondaryGo as usize], 9);
    assert_eq!(last.diagnostics.retained, 9);
    assert_eq!(last.diagnostics.last, Some(("SecondaryGo", 0, "SecondaryGo")));
}

#[test]
fn telemetry_diagnostics_follow_walk_request() {
    let (signals, timer, _log) = board(&[2, 2]);
    let config = ControllerConfig {
        telemetry_every_cycles: 2,
        ..Default::default()
    };
    let mut c = Controller::new(signals, timer, config);
    let mut sink = RecordingSink::new();
    c.start(&mut sink);
    c.step(&mut sink);
    c.step(&mut sink);

    let t = sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::Telemetry(t) => Some(t.clone()),
            _ => None,
        })
        .expect("telemetry emitted");
    let entries = t.diagnostics.phase_entries;
    assert_eq!(entries[PhaseId::SecondaryGo as usize], 1);
    assert_eq!(entries[PhaseId::SecondaryWait as usize], 1);
    assert_eq!(entries[PhaseId::PrimaryWalk as usize], 1);
    assert_eq!(t.diagnostics.last, Some(("SecondaryWait", 2, "PrimaryWalk")));
}

#[test]
fn history_tracks_recent_transitions() {
    let (mut c, _log) = controller(&[2, 2, 4, 2]);
    for _ in 0..4 {
        c.step(&mut NullSink);
    }
    let h = c.history();
    assert_eq!(h.len(), 4);
    assert_eq!(h.entries(PhaseId::SecondaryWait), 2);
    assert_eq!(h.last().map(|t| t.cycle), Some(4));
    assert_eq!(c.cycles(), 4);
}

#[test]
fn run_cycles_until_the_timer_stops_it() {
    let (signals, mut timer, log) = board(&[0, 0]);
    timer.panic_after = Some(3);
    let mut c = Controller::new(signals, timer, ControllerConfig::default());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut sink = RecordingSink::new();
        c.run(&mut sink);
    }));
    assert!(result.is_err());
    assert_eq!(c.cycles(), 3);
    let waits = log.borrow().iter().filter(|c| matches!(c, HwCall::Wait(_))).count();
    assert_eq!(waits, 3);
}
