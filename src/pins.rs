//! Wiring for the intersection board.
//!
//! Single source of truth for two things: the bit layout of the two lamp
//! channels (what each bit of a phase pattern means) and the GPIO each lamp
//! or input line is wired to.  Change a pin here and it propagates
//! everywhere.

// ---------------------------------------------------------------------------
// Channel A: primary road lamps
// ---------------------------------------------------------------------------

pub const PRIMARY_GREEN_BIT: u8 = 1 << 2;
pub const PRIMARY_YELLOW_BIT: u8 = 1 << 3;
pub const PRIMARY_RED_BIT: u8 = 1 << 4;

/// Bits of channel A that are wired to a lamp.  Everything else is reserved.
pub const CHANNEL_A_MASK: u8 = 0x1C;
/// Lowest wired bit of channel A; output pin `i` carries bit `FIRST + i`.
pub const CHANNEL_A_FIRST_BIT: u8 = 2;
pub const CHANNEL_A_PINS: usize = 3;

// ---------------------------------------------------------------------------
// Channel B: secondary road lamps plus both walk lamps
// ---------------------------------------------------------------------------

pub const SECONDARY_GREEN_BIT: u8 = 1 << 1;
pub const SECONDARY_YELLOW_BIT: u8 = 1 << 2;
pub const SECONDARY_RED_BIT: u8 = 1 << 3;
/// Walk lamp for pedestrians crossing at the primary road.
pub const PRIMARY_WALK_BIT: u8 = 1 << 4;
/// Walk lamp for pedestrians crossing at the secondary road.
pub const SECONDARY_WALK_BIT: u8 = 1 << 5;

pub const CHANNEL_B_MASK: u8 = 0x3E;
pub const CHANNEL_B_FIRST_BIT: u8 = 1;
pub const CHANNEL_B_PINS: usize = 5;

// ---------------------------------------------------------------------------
// Input condition bits
// ---------------------------------------------------------------------------

pub const PRIMARY_WALK_BUTTON_BIT: u8 = 1 << 0;
pub const SECONDARY_WALK_BUTTON_BIT: u8 = 1 << 1;
pub const PRIMARY_SENSOR_BIT: u8 = 1 << 2;
pub const SECONDARY_SENSOR_BIT: u8 = 1 << 3;

pub const INPUT_LINES: usize = 4;

// ---------------------------------------------------------------------------
// GPIO assignments (ESP32-S3 main board)
// ---------------------------------------------------------------------------

/// Channel A outputs in bit order (green, yellow, red).
pub const CHANNEL_A_GPIOS: [i32; CHANNEL_A_PINS] = [4, 5, 6];

/// Channel B outputs in bit order (green, yellow, red, primary walk,
/// secondary walk).
pub const CHANNEL_B_GPIOS: [i32; CHANNEL_B_PINS] = [7, 15, 16, 17, 18];

/// Inputs in condition-bit order: primary walk button, secondary walk
/// button, primary vehicle sensor, secondary vehicle sensor.
/// Buttons and sensors drive the line HIGH when active; pulled down.
pub const INPUT_GPIOS: [i32; INPUT_LINES] = [8, 9, 10, 11];
