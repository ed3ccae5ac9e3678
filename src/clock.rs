//! Millisecond time source and scheduler delay for the pulse loop.
//!
//! Timestamps are `u32` milliseconds since boot and wrap with the tick
//! counter. Always compare them through [`elapsed_ms`].

pub trait MonotonicClock {
    fn now_ms(&self) -> u32;
}

/// Milliseconds from `since` to `now`, correct across one counter wrap.
#[inline(always)]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

#[cfg(target_os = "espidf")]
pub use self::freertos::{SystemClock, SystemDelay};
#[cfg(not(target_os = "espidf"))]
pub use self::host::{SystemClock, SystemDelay};

#[cfg(target_os = "espidf")]
mod freertos {
    use esp_idf_hal::delay::TICK_RATE_HZ;

    use super::MonotonicClock;

    pub use esp_idf_hal::delay::FreeRtos as SystemDelay;

    const TICK_PERIOD_MS: u32 = 1000 / TICK_RATE_HZ;

    /// FreeRTOS tick count scaled to milliseconds.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct SystemClock;

    impl SystemClock {
        pub fn new() -> Self {
            Self
        }
    }

    impl MonotonicClock for SystemClock {
        fn now_ms(&self) -> u32 {
            let ticks = unsafe { esp_idf_sys::xTaskGetTickCount() };
            ticks.wrapping_mul(TICK_PERIOD_MS)
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::thread;
    use std::time::{Duration, Instant};

    use embedded_hal::delay::DelayNs;

    use super::MonotonicClock;

    #[derive(Debug, Clone, Copy)]
    pub struct SystemClock {
        origin: Instant,
    }

    impl SystemClock {
        pub fn new() -> Self {
            Self {
                origin: Instant::now(),
            }
        }
    }

    impl Default for SystemClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MonotonicClock for SystemClock {
        fn now_ms(&self) -> u32 {
            // Truncation is the wrap.
            self.origin.elapsed().as_millis() as u32
        }
    }

    /// Sleeps the calling thread, the host stand-in for `vTaskDelay`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct SystemDelay;

    impl DelayNs for SystemDelay {
        fn delay_ns(&mut self, ns: u32) {
            thread::sleep(Duration::from_nanos(u64::from(ns)));
        }

        fn delay_ms(&mut self, ms: u32) {
            thread::sleep(Duration::from_millis(u64::from(ms)));
        }
    }
}
