//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                        |
//! |------------|-------------|------------------------------------|
//! | `gpio`     | SignalPort  | `embedded-hal` lamp and input pins |
//! | `delay`    | DwellTimer  | `embedded-hal` blocking delay      |
//! | `log_sink` | EventSink   | Serial log output                  |

pub mod delay;
pub mod gpio;
pub mod log_sink;
