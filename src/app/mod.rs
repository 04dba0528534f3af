//! Application core: pure domain logic, zero I/O.
//!
//! The controller loop lives here.  All interaction with lamps, input
//! lines, and the delay primitive happens through the **port traits** in
//! [`ports`], so this layer is fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
