//! Fuzz target: `ControllerConfig::from_json`
//!
//! Arbitrary documents must never panic the parser, and anything it accepts
//! must pass validation.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;

use crossing::config::ControllerConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = ControllerConfig::from_json(text) {
        assert!(config.validate().is_ok());
        assert!(config.second_ms >= ControllerConfig::MIN_SECOND_MS);
    }
});
