use core::ffi::CStr;

use crate::error::{PulseError, Result};

pub const DEFAULT_PIN: i32 = 21;

/// Output line wired to the power bank load. Override at build time with
/// `KEEPALIVE_PIN`; a value that is not a GPIO number fails the build.
pub const BOARD_PIN: i32 = match option_env!("KEEPALIVE_PIN") {
    Some(raw) => match parse_pin(raw) {
        Some(pin) => pin,
        None => panic!("KEEPALIVE_PIN must be a decimal GPIO number"),
    },
    None => DEFAULT_PIN,
};

pub const PULSE_INTERVAL_MS: u32 = 5000;
pub const PULSE_HOLD_MS: u32 = 50;

/// Wait after a failed poll before touching the pin again.
pub const FAULT_BACKOFF_MS: u32 = 1000;

pub const TASK_NAME: &CStr = c"blink_task";
pub const TASK_STACK_SIZE: usize = 4096;
pub const TASK_PRIORITY: u8 = 5;

#[cfg(target_os = "espidf")]
pub const MAX_TASK_PRIORITY: u8 = (esp_idf_sys::configMAX_PRIORITIES - 1) as u8;
// ESP-IDF ships configMAX_PRIORITIES = 25
#[cfg(not(target_os = "espidf"))]
pub const MAX_TASK_PRIORITY: u8 = 24;

const MIN_TASK_STACK_SIZE: usize = 1024;

/// Strict decimal parse usable in const context. No sign, no whitespace.
pub const fn parse_pin(raw: &str) -> Option<i32> {
    let bytes = raw.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut pin: i32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return None;
        }
        pin = match pin.checked_mul(10) {
            Some(v) => match v.checked_add((b - b'0') as i32) {
                Some(v) => v,
                None => return None,
            },
            None => return None,
        };
        i += 1;
    }
    Some(pin)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseConfig {
    pub pin: i32,
    pub interval_ms: u32,
    pub hold_ms: u32,
    /// Delay taken on every poll that does not pulse. `None` busy-polls.
    pub idle_yield_ms: Option<u32>,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            pin: BOARD_PIN,
            interval_ms: PULSE_INTERVAL_MS,
            hold_ms: PULSE_HOLD_MS,
            idle_yield_ms: None,
        }
    }
}

impl PulseConfig {
    pub fn with_pin(mut self, pin: i32) -> Self {
        self.pin = pin;
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn with_hold_ms(mut self, hold_ms: u32) -> Self {
        self.hold_ms = hold_ms;
        self
    }

    pub fn with_idle_yield_ms(mut self, idle_yield_ms: Option<u32>) -> Self {
        self.idle_yield_ms = idle_yield_ms;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.pin < 0 {
            return Err(PulseError::InvalidConfig("pin number must not be negative"));
        }
        if self.interval_ms == 0 {
            return Err(PulseError::InvalidConfig("pulse interval must be non-zero"));
        }
        if self.hold_ms == 0 {
            return Err(PulseError::InvalidConfig("pulse hold time must be non-zero"));
        }
        if self.hold_ms >= self.interval_ms {
            return Err(PulseError::InvalidConfig(
                "pulse hold time must be shorter than the interval",
            ));
        }
        if matches!(self.idle_yield_ms, Some(ms) if ms >= self.interval_ms) {
            return Err(PulseError::InvalidConfig(
                "idle yield must be shorter than the interval",
            ));
        }
        Ok(())
    }
}

/// Scheduler settings for the task that runs the pulse loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskConfig {
    pub name: &'static CStr,
    pub stack_size: usize,
    pub priority: u8,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            name: TASK_NAME,
            stack_size: TASK_STACK_SIZE,
            priority: TASK_PRIORITY,
        }
    }
}

impl TaskConfig {
    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.stack_size < MIN_TASK_STACK_SIZE {
            return Err(PulseError::InvalidConfig("task stack size below 1024 bytes"));
        }
        if self.priority > MAX_TASK_PRIORITY {
            return Err(PulseError::InvalidConfig("task priority above configMAX_PRIORITIES"));
        }
        if self.name.is_empty() {
            return Err(PulseError::InvalidConfig("task name must not be empty"));
        }
        Ok(())
    }
}
