//! Crossing firmware: main entry point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │                                                          │
//! │  GpioSignalPort     DelayDwellTimer     LogEventSink     │
//! │  (SignalPort)       (DwellTimer)        (EventSink)      │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          Controller (pure logic)               │      │
//! │  │  Fsm · PHASE_TABLE · TransitionHistory         │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{info, warn};

use crossing::adapters::delay::DelayDwellTimer;
use crossing::adapters::log_sink::LogEventSink;
use crossing::app::service::Controller;
use crossing::config::ControllerConfig;
use crossing::drivers::hw_init;

/// Optional build-time override, e.g.
/// `CROSSING_CONFIG='{"inputs_active_low":true}' cargo build`.
const CONFIG_JSON: Option<&str> = option_env!("CROSSING_CONFIG");

fn load_config() -> ControllerConfig {
    match CONFIG_JSON {
        Some(json) => match ControllerConfig::from_json(json) {
            Ok(cfg) => {
                info!("Config loaded from build environment");
                cfg
            }
            Err(e) => {
                warn!("Build-time config rejected ({}), using defaults", e);
                ControllerConfig::default()
            }
        },
        None => ControllerConfig::default(),
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Crossing v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();
    info!("{:?}", config);

    // ── 3. Peripherals ────────────────────────────────────────
    let signals = hw_init::init_peripherals(&config).map_err(crossing::error::Error::from)?;
    let timer = DelayDwellTimer::new(FreeRtos, &config);

    // ── 4. Control loop (never returns) ───────────────────────
    let mut controller = Controller::new(signals, timer, config);
    let mut sink = LogEventSink::new();
    controller.run(&mut sink)
}
