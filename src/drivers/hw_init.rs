//! One-shot hardware peripheral initialization.
//!
//! Configures the lamp outputs and the four input lines using raw ESP-IDF
//! sys calls, then hands them to the GPIO adapter as `embedded-hal` pins.
//! Called once from `main()` before the control loop starts.
//!
//! Without the `espidf` feature (or off the ESP target) the same functions
//! return simulated lines so the bring-up path can be exercised by tests.

#[cfg(all(target_os = "espidf", feature = "espidf"))]
use esp_idf_svc::sys::*;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use log::info;

use crate::adapters::gpio::GpioSignalPort;
use crate::config::ControllerConfig;
use crate::error::GpioError;
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed { gpio: i32, rc: i32 },
    /// A lamp could not be forced dark before the loop starts.
    LampBlankFailed(GpioError),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed { gpio, rc } => {
                write!(f, "GPIO{} config failed (rc={})", gpio, rc)
            }
            Self::LampBlankFailed(e) => write!(f, "lamp blanking failed: {}", e),
        }
    }
}

impl std::error::Error for HwInitError {}

impl From<HwInitError> for crate::error::Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::GpioConfigFailed { .. } => Self::Init("GPIO configuration failed"),
            HwInitError::LampBlankFailed(g) => Self::Gpio(g),
        }
    }
}

/// The board's signal port: every lamp and input line, configured.
pub type BoardSignals = GpioSignalPort<OutputLine, InputLine>;

// ── Pins ──────────────────────────────────────────────────────

/// A configured push-pull output.
pub struct OutputLine {
    gpio: i32,
    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    level: bool,
}

/// A configured input with its pull resistor enabled.
pub struct InputLine {
    gpio: i32,
    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    level: bool,
}

impl OutputLine {
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Last level written (simulation only).
    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    pub fn level(&self) -> bool {
        self.level
    }

    #[cfg(all(target_os = "espidf", feature = "espidf"))]
    fn set(&mut self, high: bool) -> Result<(), GpioError> {
        // SAFETY: gpio_set_level writes to an output pin configured in
        // init_outputs(); the controller is the only writer.
        let rc = unsafe { gpio_set_level(self.gpio, u32::from(high)) };
        if rc != ESP_OK as i32 {
            return Err(GpioError::WriteFailed { gpio: self.gpio, code: rc });
        }
        Ok(())
    }

    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    fn set(&mut self, high: bool) -> Result<(), GpioError> {
        self.level = high;
        Ok(())
    }
}

impl InputLine {
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Force the line level seen by the next read (simulation only).
    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    pub fn simulate(&mut self, high: bool) {
        self.level = high;
    }

    #[cfg(all(target_os = "espidf", feature = "espidf"))]
    fn get(&self) -> bool {
        // SAFETY: gpio_get_level is a read-only register access on an
        // already-configured input pin.
        (unsafe { gpio_get_level(self.gpio) }) != 0
    }

    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    fn get(&self) -> bool {
        self.level
    }
}

impl ErrorType for OutputLine {
    type Error = GpioError;
}

impl OutputPin for OutputLine {
    fn set_low(&mut self) -> Result<(), GpioError> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), GpioError> {
        self.set(true)
    }
}

impl ErrorType for InputLine {
    type Error = GpioError;
}

impl InputPin for InputLine {
    fn is_high(&mut self) -> Result<bool, GpioError> {
        Ok(self.get())
    }

    fn is_low(&mut self) -> Result<bool, GpioError> {
        Ok(!self.get())
    }
}

// ── Bring-up ──────────────────────────────────────────────────

/// Configure every lamp and input line and return the board's signal port
/// with all lamps dark.
pub fn init_peripherals(config: &ControllerConfig) -> Result<BoardSignals, HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    #[cfg(all(target_os = "espidf", feature = "espidf"))]
    unsafe {
        init_outputs()?;
        init_inputs(config.inputs_active_low)?;
    }
    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    info!("hw_init(sim): peripheral init skipped");

    let mut chan_a = pins::CHANNEL_A_GPIOS.map(output_line);
    let mut chan_b = pins::CHANNEL_B_GPIOS.map(output_line);
    let inputs = pins::INPUT_GPIOS.map(input_line);

    let dark = !config.outputs_active_low;
    for lamp in chan_a.iter_mut().chain(chan_b.iter_mut()) {
        let res = if dark { lamp.set_low() } else { lamp.set_high() };
        res.map_err(HwInitError::LampBlankFailed)?;
    }

    info!(
        "hw_init: {} lamps, {} inputs ready",
        pins::CHANNEL_A_PINS + pins::CHANNEL_B_PINS,
        pins::INPUT_LINES
    );
    Ok(GpioSignalPort::new(chan_a, chan_b, inputs, config))
}

fn output_line(gpio: i32) -> OutputLine {
    OutputLine {
        gpio,
        #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
        level: false,
    }
}

fn input_line(gpio: i32) -> InputLine {
    InputLine {
        gpio,
        #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
        level: false,
    }
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(all(target_os = "espidf", feature = "espidf"))]
unsafe fn init_outputs() -> Result<(), HwInitError> {
    for &pin in pins::CHANNEL_A_GPIOS.iter().chain(pins::CHANNEL_B_GPIOS.iter()) {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
            ..Default::default()
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed { gpio: pin, rc: ret });
        }
    }

    info!("hw_init: lamp outputs configured");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

/// Buttons and sensors are pulled toward their inactive level.
#[cfg(all(target_os = "espidf", feature = "espidf"))]
unsafe fn init_inputs(active_low: bool) -> Result<(), HwInitError> {
    let (pull_up_en, pull_down_en) = if active_low {
        (gpio_pullup_t_GPIO_PULLUP_ENABLE, gpio_pulldown_t_GPIO_PULLDOWN_DISABLE)
    } else {
        (gpio_pullup_t_GPIO_PULLUP_DISABLE, gpio_pulldown_t_GPIO_PULLDOWN_ENABLE)
    };

    for &pin in &pins::INPUT_GPIOS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en,
            pull_down_en,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
            ..Default::default()
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed { gpio: pin, rc: ret });
        }
    }

    info!("hw_init: input lines configured");
    Ok(())
}
