//! Crossing firmware library.
//!
//! Two-road traffic-signal controller built as a table-driven Moore
//! machine.  Exposes the pure-logic modules for integration testing and
//! host simulation.  ESP-IDF calls compile only for the ESP target with the
//! `espidf` feature enabled; every other build gets the simulated lines.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod safety;

pub mod adapters;
pub mod drivers;
