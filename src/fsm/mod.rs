//! Table-driven Moore machine for the intersection.
//!
//! Classic embedded "indexed FSM" pattern in Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  PHASE_TABLE                                                     │
//! │  ┌──────────────────┬───────┬───────┬───────┬──────────────────┐ │
//! │  │ PhaseId          │ dwell │ chanA │ chanB │ next[0..16]      │ │
//! │  ├──────────────────┼───────┼───────┼───────┼──────────────────┤ │
//! │  │ SecondaryGo      │  7 s  │ 0x10  │ 0x02  │ [PhaseId; 16]    │ │
//! │  │ SecondaryWait    │  2 s  │ 0x10  │ 0x04  │ [PhaseId; 16]    │ │
//! │  │ ...              │       │       │       │                  │ │
//! │  └──────────────────┴───────┴───────┴───────┴──────────────────┘ │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A phase's outputs depend only on the phase itself; the sampled
//! [`InputCondition`] is used solely to pick the next row.  Transitions
//! are `PhaseId` values indexing back into the same array, so the cyclic
//! graph needs no pointers and no lifetimes beyond `'static`.

pub mod lamps;
pub mod phases;

use core::fmt;

use crate::pins;
pub use phases::PHASE_TABLE;

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

/// The seven phases of the intersection.
/// Discriminants are row indices into [`PHASE_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PhaseId {
    /// Secondary road has right-of-way.
    SecondaryGo = 0,
    /// Secondary road clearing (yellow).
    SecondaryWait = 1,
    /// Primary road has right-of-way.
    PrimaryGo = 2,
    /// Primary road clearing (yellow).
    PrimaryWait = 3,
    /// Pedestrian phase favouring the secondary-road request.
    SecondaryWalk = 4,
    /// Pedestrian phase while secondary traffic still moves.
    PrimaryWalk = 5,
    /// Abbreviated secondary green after a walk phase.
    SecondaryGoShort = 6,
}

impl PhaseId {
    /// Total number of phases, used to size the table array.
    pub const COUNT: usize = 7;

    /// Phase the controller enters at power-up.
    pub const START: Self = Self::SecondaryGo;

    /// Every phase, in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::SecondaryGo,
        Self::SecondaryWait,
        Self::PrimaryGo,
        Self::PrimaryWait,
        Self::SecondaryWalk,
        Self::PrimaryWalk,
        Self::SecondaryGoShort,
    ];

    /// Convert a table index back to `PhaseId`.  Panics on out-of-range in
    /// debug builds; returns the start phase in release.
    pub fn from_index(idx: usize) -> Self {
        match Self::ALL.get(idx) {
            Some(id) => *id,
            None => {
                debug_assert!(false, "invalid phase index: {idx}");
                Self::START
            }
        }
    }

    /// The static table row for this phase.
    pub const fn descriptor(self) -> &'static Phase {
        let table: &'static [Phase; Self::COUNT] = &PHASE_TABLE;
        &table[self as usize]
    }

    /// Human-readable phase name, as used in log lines.
    pub const fn name(self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Input condition
// ---------------------------------------------------------------------------

/// A 4-bit snapshot of the four input lines.
///
/// | bit | line                       |
/// |-----|----------------------------|
/// | 0   | primary-road walk button   |
/// | 1   | secondary-road walk button |
/// | 2   | primary-road vehicle sensor|
/// | 3   | secondary-road vehicle sensor |
///
/// Construction always masks to the low nibble, so every value is a valid
/// table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InputCondition(u8);

impl InputCondition {
    /// Number of distinct conditions (one transition entry each).
    pub const COUNT: usize = 16;

    /// No button pressed, no vehicle present.
    pub const NONE: Self = Self(0);

    const MASK: u8 = 0x0F;

    /// Build a condition from raw bits; anything above bit 3 is dropped.
    pub const fn new(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Assemble a condition from the four individual lines.
    pub const fn from_lines(
        primary_walk: bool,
        secondary_walk: bool,
        primary_sensor: bool,
        secondary_sensor: bool,
    ) -> Self {
        let mut bits = 0;
        if primary_walk {
            bits |= pins::PRIMARY_WALK_BUTTON_BIT;
        }
        if secondary_walk {
            bits |= pins::SECONDARY_WALK_BUTTON_BIT;
        }
        if primary_sensor {
            bits |= pins::PRIMARY_SENSOR_BIT;
        }
        if secondary_sensor {
            bits |= pins::SECONDARY_SENSOR_BIT;
        }
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Index into a phase's transition array.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn primary_walk(self) -> bool {
        self.0 & pins::PRIMARY_WALK_BUTTON_BIT != 0
    }

    pub const fn secondary_walk(self) -> bool {
        self.0 & pins::SECONDARY_WALK_BUTTON_BIT != 0
    }

    pub const fn primary_sensor(self) -> bool {
        self.0 & pins::PRIMARY_SENSOR_BIT != 0
    }

    pub const fn secondary_sensor(self) -> bool {
        self.0 & pins::SECONDARY_SENSOR_BIT != 0
    }

    /// All sixteen conditions in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self::new)
    }
}

impl fmt::Display for InputCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Output channels
// ---------------------------------------------------------------------------

/// One addressable group of lamps driven by a single pattern write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Primary road cluster.
    A,
    /// Secondary road cluster plus both walk lamps.
    B,
}

impl Channel {
    /// Bits of this channel that are wired to a lamp.
    pub const fn mask(self) -> u8 {
        match self {
            Self::A => pins::CHANNEL_A_MASK,
            Self::B => pins::CHANNEL_B_MASK,
        }
    }

    /// Bit carried by the channel's first output pin.
    pub const fn first_bit(self) -> u8 {
        match self {
            Self::A => pins::CHANNEL_A_FIRST_BIT,
            Self::B => pins::CHANNEL_B_FIRST_BIT,
        }
    }
}

// ---------------------------------------------------------------------------
// Phase descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single phase.
/// Stored in a fixed-size array with no heap and no pointers between rows.
#[derive(Debug)]
pub struct Phase {
    pub id: PhaseId,
    pub name: &'static str,
    /// Seconds the phase holds before the inputs are sampled.
    pub dwell_secs: u16,
    /// Lamp pattern for channel A (primary road).
    pub chan_a: u8,
    /// Lamp pattern for channel B (secondary road + walk lamps).
    pub chan_b: u8,
    /// Next phase for each input condition.
    pub transitions: [PhaseId; InputCondition::COUNT],
}

impl Phase {
    /// Successor of this phase under `condition`.  Pure table lookup.
    pub const fn next(&self, condition: InputCondition) -> PhaseId {
        self.transitions[condition.index()]
    }

    /// Pattern this phase drives on `channel`.
    pub const fn output(&self, channel: Channel) -> u8 {
        match channel {
            Channel::A => self.chan_a,
            Channel::B => self.chan_b,
        }
    }
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// Walks the phase table.
///
/// Holds nothing but a reference to the immutable table and the id of the
/// current phase.  Timing and I/O live in the
/// [`Controller`](crate::app::service::Controller).
pub struct Fsm {
    table: &'static [Phase; PhaseId::COUNT],
    current: PhaseId,
}

impl Default for Fsm {
    fn default() -> Self {
        Self::new(&PHASE_TABLE, PhaseId::START)
    }
}

impl Fsm {
    /// Construct a walker over `table`, starting in `initial`.
    pub fn new(table: &'static [Phase; PhaseId::COUNT], initial: PhaseId) -> Self {
        Self {
            table,
            current: initial,
        }
    }

    pub fn current_phase(&self) -> PhaseId {
        self.current
    }

    /// Table row of the current phase.
    pub fn descriptor(&self) -> &'static Phase {
        &self.table[self.current as usize]
    }

    /// Move to the successor of the current phase under `condition` and
    /// return it.
    pub fn advance(&mut self, condition: InputCondition) -> PhaseId {
        let next = self.descriptor().next(condition);
        self.current = next;
        next
    }
}
