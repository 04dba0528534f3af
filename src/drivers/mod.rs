//! Board bring-up and pin drivers.

pub mod hw_init;
