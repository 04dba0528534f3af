//! Decoding of channel patterns into what a driver or pedestrian sees.
//!
//! The phase table stores raw bit-patterns; these helpers turn them back
//! into aspects for logging, telemetry, and the compile-time safety checks.

use core::fmt;

use crate::pins;

/// Aspect shown by one road's signal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadAspect {
    Red,
    Yellow,
    Green,
    /// No lamp lit.
    Dark,
    /// More than one lamp lit on the same head.
    Conflict,
}

const fn aspect(green: bool, yellow: bool, red: bool) -> RoadAspect {
    match (green, yellow, red) {
        (true, false, false) => RoadAspect::Green,
        (false, true, false) => RoadAspect::Yellow,
        (false, false, true) => RoadAspect::Red,
        (false, false, false) => RoadAspect::Dark,
        _ => RoadAspect::Conflict,
    }
}

/// Aspect of the primary road head, from a channel A pattern.
pub const fn primary_aspect(chan_a: u8) -> RoadAspect {
    aspect(
        chan_a & pins::PRIMARY_GREEN_BIT != 0,
        chan_a & pins::PRIMARY_YELLOW_BIT != 0,
        chan_a & pins::PRIMARY_RED_BIT != 0,
    )
}

/// Aspect of the secondary road head, from a channel B pattern.
pub const fn secondary_aspect(chan_b: u8) -> RoadAspect {
    aspect(
        chan_b & pins::SECONDARY_GREEN_BIT != 0,
        chan_b & pins::SECONDARY_YELLOW_BIT != 0,
        chan_b & pins::SECONDARY_RED_BIT != 0,
    )
}

pub const fn primary_walk(chan_b: u8) -> bool {
    chan_b & pins::PRIMARY_WALK_BIT != 0
}

pub const fn secondary_walk(chan_b: u8) -> bool {
    chan_b & pins::SECONDARY_WALK_BIT != 0
}

/// Everything lit at the intersection for one pair of channel patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalView {
    pub primary: RoadAspect,
    pub secondary: RoadAspect,
    pub primary_walk: bool,
    pub secondary_walk: bool,
}

impl SignalView {
    pub const fn decode(chan_a: u8, chan_b: u8) -> Self {
        Self {
            primary: primary_aspect(chan_a),
            secondary: secondary_aspect(chan_b),
            primary_walk: primary_walk(chan_b),
            secondary_walk: secondary_walk(chan_b),
        }
    }
}

impl fmt::Display for RoadAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Dark => "dark",
            Self::Conflict => "CONFLICT",
        })
    }
}

impl fmt::Display for SignalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "primary={} secondary={} walk[p={} s={}]",
            self.primary,
            self.secondary,
            if self.primary_walk { "on" } else { "off" },
            if self.secondary_walk { "on" } else { "off" },
        )
    }
}
