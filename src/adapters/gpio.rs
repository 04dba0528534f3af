//! GPIO adapter: bridges digital pins to the [`SignalPort`] trait.
//!
//! Generic over `embedded-hal` 1.0 pins, so the same code drives the
//! ESP-IDF pins on the board and recording mocks on the host.  Output pin
//! `i` of a channel carries bit `first_bit + i` of the channel pattern;
//! input pin `i` carries condition bit `i`.
//!
//! A pin that fails is logged and skipped.  A failed input read counts as
//! an inactive line, so a dead button can never request a walk phase.

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use log::{debug, warn};

use crate::app::ports::SignalPort;
use crate::config::ControllerConfig;
use crate::fsm::{Channel, InputCondition};
use crate::pins;

/// Concrete [`SignalPort`] over individual lamp and input pins.
pub struct GpioSignalPort<O: OutputPin, I: InputPin> {
    chan_a: [O; pins::CHANNEL_A_PINS],
    chan_b: [O; pins::CHANNEL_B_PINS],
    inputs: [I; pins::INPUT_LINES],
    outputs_active_low: bool,
    inputs_active_low: bool,
    faults: u32,
}

impl<O: OutputPin, I: InputPin> GpioSignalPort<O, I> {
    pub fn new(
        chan_a: [O; pins::CHANNEL_A_PINS],
        chan_b: [O; pins::CHANNEL_B_PINS],
        inputs: [I; pins::INPUT_LINES],
        config: &ControllerConfig,
    ) -> Self {
        Self {
            chan_a,
            chan_b,
            inputs,
            outputs_active_low: config.outputs_active_low,
            inputs_active_low: config.inputs_active_low,
            faults: 0,
        }
    }

    /// Pin operations that have failed since construction.
    pub fn faults(&self) -> u32 {
        self.faults
    }

    /// Give the pins back (channel A, channel B, inputs).
    pub fn release(
        self,
    ) -> (
        [O; pins::CHANNEL_A_PINS],
        [O; pins::CHANNEL_B_PINS],
        [I; pins::INPUT_LINES],
    ) {
        (self.chan_a, self.chan_b, self.inputs)
    }

    fn drive(
        lamps: &mut [O],
        channel: Channel,
        pattern: u8,
        active_low: bool,
    ) -> u32 {
        let mut faults = 0;
        for (i, pin) in lamps.iter_mut().enumerate() {
            let bit = channel.first_bit() + i as u8;
            let lit = pattern & (1 << bit) != 0;
            if let Err(e) = pin.set_state(PinState::from(lit != active_low)) {
                warn!("gpio: channel {:?} bit {} write failed: {:?}", channel, bit, e);
                faults += 1;
            }
        }
        faults
    }
}

impl<O: OutputPin, I: InputPin> SignalPort for GpioSignalPort<O, I> {
    fn read_inputs(&mut self) -> InputCondition {
        let mut bits = 0u8;
        for (i, pin) in self.inputs.iter_mut().enumerate() {
            match pin.is_high() {
                Ok(high) => {
                    if high != self.inputs_active_low {
                        bits |= 1 << i;
                    }
                }
                Err(e) => {
                    warn!("gpio: input line {} read failed: {:?}", i, e);
                    self.faults = self.faults.saturating_add(1);
                }
            }
        }
        InputCondition::new(bits)
    }

    fn write_outputs(&mut self, channel: Channel, pattern: u8) {
        let mask = channel.mask();
        if pattern & !mask != 0 {
            debug!("gpio: channel {:?} reserved bits 0x{:02X} ignored", channel, pattern & !mask);
        }
        let pattern = pattern & mask;
        let active_low = self.outputs_active_low;
        let faults = match channel {
            Channel::A => Self::drive(&mut self.chan_a, channel, pattern, active_low),
            Channel::B => Self::drive(&mut self.chan_b, channel, pattern, active_low),
        };
        self.faults = self.faults.saturating_add(faults);
    }
}
