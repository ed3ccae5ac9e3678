use crate::error::Result;

/// A single push-pull output line.
pub trait PulsePin {
    /// Route the pad to GPIO, make it an output and drive it low.
    ///
    /// Calling this again leaves the line in the same state.
    fn configure_output(&mut self) -> Result<()>;

    fn set_level(&mut self, high: bool) -> Result<()>;

    fn set_high(&mut self) -> Result<()> {
        self.set_level(true)
    }

    fn set_low(&mut self) -> Result<()> {
        self.set_level(false)
    }
}

#[cfg(target_os = "espidf")]
pub use self::idf::IdfPin as BoardPin;
#[cfg(not(target_os = "espidf"))]
pub use self::host::LogPin as BoardPin;

#[cfg(target_os = "espidf")]
mod idf {
    use esp_idf_sys::{esp, gpio_mode_t_GPIO_MODE_OUTPUT, EspError};

    use super::PulsePin;
    use crate::error::{PulseError, Result};

    /// Drives a pad through the raw ESP-IDF GPIO driver.
    #[derive(Debug)]
    pub struct IdfPin {
        pin: i32,
    }

    impl IdfPin {
        pub fn new(pin: i32) -> Self {
            Self { pin }
        }

        fn driver_error(&self, err: EspError) -> PulseError {
            PulseError::Gpio {
                pin: self.pin,
                code: err.code(),
            }
        }
    }

    impl PulsePin for IdfPin {
        fn configure_output(&mut self) -> Result<()> {
            esp!(unsafe { esp_idf_sys::gpio_reset_pin(self.pin) }).map_err(|e| self.driver_error(e))?;
            esp!(unsafe { esp_idf_sys::gpio_set_direction(self.pin, gpio_mode_t_GPIO_MODE_OUTPUT) })
                .map_err(|e| self.driver_error(e))?;
            self.set_low()
        }

        #[inline(always)]
        fn set_level(&mut self, high: bool) -> Result<()> {
            esp!(unsafe { esp_idf_sys::gpio_set_level(self.pin, u32::from(high)) })
                .map_err(|e| self.driver_error(e))
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use log::{info, trace};

    use super::PulsePin;
    use crate::error::Result;

    /// Host stand-in that logs every level change.
    #[derive(Debug)]
    pub struct LogPin {
        pin: i32,
        configured: bool,
        high: bool,
    }

    impl LogPin {
        pub fn new(pin: i32) -> Self {
            Self {
                pin,
                configured: false,
                high: false,
            }
        }

        pub fn is_high(&self) -> bool {
            self.high
        }
    }

    impl PulsePin for LogPin {
        fn configure_output(&mut self) -> Result<()> {
            if !self.configured {
                info!("GPIO{} configured as output", self.pin);
                self.configured = true;
            }
            self.set_low()
        }

        fn set_level(&mut self, high: bool) -> Result<()> {
            if self.high != high {
                info!("GPIO{} -> {}", self.pin, if high { "HIGH" } else { "LOW" });
            } else {
                trace!("GPIO{} already {}", self.pin, if high { "HIGH" } else { "LOW" });
            }
            self.high = high;
            Ok(())
        }
    }

}
