//! Dwell timer adapter.
//!
//! Implements [`DwellTimer`] on any `embedded-hal` [`DelayNs`] provider by
//! repeating a one-second busy delay, the same shape as a SysTick countdown.
//! On the board the provider is `esp_idf_hal::delay::FreeRtos`.

use embedded_hal::delay::DelayNs;

use crate::app::ports::DwellTimer;
use crate::config::ControllerConfig;

pub struct DelayDwellTimer<D: DelayNs> {
    delay: D,
    second_ms: u32,
}

impl<D: DelayNs> DelayDwellTimer<D> {
    pub fn new(delay: D, config: &ControllerConfig) -> Self {
        Self {
            delay,
            second_ms: config.second_ms,
        }
    }

    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> DwellTimer for DelayDwellTimer<D> {
    fn wait(&mut self, seconds: u16) {
        for _ in 0..seconds {
            self.delay.delay_ms(self.second_ms);
        }
    }
}
