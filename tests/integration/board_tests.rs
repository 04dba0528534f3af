//! Full-stack tests on the simulated board.
//!
//! Uses the real adapters (GPIO signal port from `hw_init`, the delay-based
//! dwell timer, the log sink) with only the delay provider mocked.

use embedded_hal::delay::DelayNs;

use crossing::adapters::delay::DelayDwellTimer;
use crossing::adapters::log_sink::LogEventSink;
use crossing::app::ports::SignalPort;
use crossing::app::service::Controller;
use crossing::config::ControllerConfig;
use crossing::drivers::hw_init::{OutputLine, init_peripherals};
use crossing::fsm::PhaseId;
use crossing::pins;

#[derive(Default)]
struct CountingDelay {
    total_ms: u64,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += u64::from(ns) / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
    }
}

fn lamp_levels(lines: &[OutputLine]) -> Vec<bool> {
    lines.iter().map(OutputLine::level).collect()
}

#[test]
fn simulated_board_runs_a_cycle() {
    let config = ControllerConfig::default();
    let signals = init_peripherals(&config).expect("sim init");
    let timer = DelayDwellTimer::new(CountingDelay::default(), &config);
    let mut c = Controller::new(signals, timer, config);
    let mut sink = LogEventSink::new();

    c.start(&mut sink);
    let t = c.step(&mut sink);
    assert_eq!(t.to, PhaseId::SecondaryGo, "idle inputs hold SecondaryGo");

    let (signals, timer) = c.into_parts();
    assert_eq!(timer.release().total_ms, 7_000);

    let (a, b, _) = signals.release();
    // primary red, secondary green
    assert_eq!(lamp_levels(&a), [false, false, true]);
    assert_eq!(lamp_levels(&b), [true, false, false, false, false]);
}

#[test]
fn pressed_button_reaches_primary_walk() {
    let config = ControllerConfig::default();
    let signals = init_peripherals(&config).expect("sim init");

    // Hold the secondary walk button (condition bit 1) down.
    let (a, b, mut inputs) = signals.release();
    inputs[1].simulate(true);
    let mut signals = crossing::adapters::gpio::GpioSignalPort::new(a, b, inputs, &config);
    assert_eq!(signals.read_inputs().bits(), 0b0010);

    let timer = DelayDwellTimer::new(CountingDelay::default(), &config);
    let mut c = Controller::new(signals, timer, config);
    let mut sink = LogEventSink::new();
    c.step(&mut sink);
    c.step(&mut sink);
    assert_eq!(c.phase(), PhaseId::PrimaryWalk);

    c.step(&mut sink);
    let (signals, _) = c.into_parts();
    let (_, b, _) = signals.release();
    // secondary green plus primary walk lamp
    assert_eq!(lamp_levels(&b), [true, false, false, true, false]);
}

#[test]
fn active_low_board_inverts_everything() {
    let config = ControllerConfig {
        outputs_active_low: true,
        inputs_active_low: true,
        ..Default::default()
    };
    let signals = init_peripherals(&config).expect("sim init");
    let (a, b, mut inputs) = signals.release();
    // Idle lines sit high when active-low.
    for line in &mut inputs {
        line.simulate(true);
    }
    let signals = crossing::adapters::gpio::GpioSignalPort::new(a, b, inputs, &config);

    let timer = DelayDwellTimer::new(CountingDelay::default(), &config);
    let mut c = Controller::new(signals, timer, config);
    c.step(&mut LogEventSink::new());
    assert_eq!(c.phase(), PhaseId::SecondaryGo);

    let (signals, _) = c.into_parts();
    let (a, _, _) = signals.release();
    assert_eq!(lamp_levels(&a), [true, true, false]);
    assert_eq!(a.len(), pins::CHANNEL_A_PINS);
}
