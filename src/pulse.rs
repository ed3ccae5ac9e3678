//! The keep-alive pulse loop.
//!
//! Every `interval_ms`, measured from the start of the previous pulse, the
//! output is driven high, held for `hold_ms` through a scheduler delay and
//! released. Between pulses the loop polls the clock without yielding unless
//! [`PulseConfig::idle_yield_ms`] is set.

use embedded_hal::delay::DelayNs;
use heapless::HistoryBuffer;
use log::{debug, error, info, warn};

use crate::clock::{elapsed_ms, MonotonicClock};
use crate::config::{PulseConfig, FAULT_BACKOFF_MS};
use crate::error::Result;
use crate::gpio::PulsePin;

pub const HISTORY_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseRecord {
    pub started_at_ms: u32,
    pub released_at_ms: u32,
}

impl PulseRecord {
    pub fn high_for_ms(&self) -> u32 {
        elapsed_ms(self.released_at_ms, self.started_at_ms)
    }
}

/// Outcome of one pass through the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    Pulsed(PulseRecord),
    Idle { elapsed_ms: u32 },
}

pub struct PulseLoop<P, C, D> {
    pin: P,
    clock: C,
    delay: D,
    config: PulseConfig,
    last_pulse_start: u32,
    release_pending: bool,
    pulse_count: u64,
    history: HistoryBuffer<PulseRecord, HISTORY_LEN>,
}

impl<P, C, D> PulseLoop<P, C, D>
where
    P: PulsePin,
    C: MonotonicClock,
    D: DelayNs,
{
    pub fn new(pin: P, clock: C, delay: D, config: PulseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pin,
            clock,
            delay,
            config,
            last_pulse_start: 0,
            release_pending: false,
            pulse_count: 0,
            history: HistoryBuffer::new(),
        })
    }

    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    pub fn last_pulse_start(&self) -> u32 {
        self.last_pulse_start
    }

    /// Pulses whose rising edge succeeded, including ones whose release failed.
    pub fn pulse_count(&self) -> u64 {
        self.pulse_count
    }

    /// Completed pulses, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &PulseRecord> + '_ {
        self.history.oldest_ordered()
    }

    pub fn configure(&mut self) -> Result<()> {
        self.pin.configure_output()?;
        self.release_pending = false;
        Ok(())
    }

    pub fn poll(&mut self) -> Result<Poll> {
        if self.release_pending {
            self.release()?;
        }

        let now = self.clock.now_ms();
        let elapsed = elapsed_ms(now, self.last_pulse_start);
        if elapsed < self.config.interval_ms {
            if let Some(ms) = self.config.idle_yield_ms {
                self.delay.delay_ms(ms);
            }
            return Ok(Poll::Idle { elapsed_ms: elapsed });
        }

        self.pin.set_high()?;
        self.last_pulse_start = now;
        self.pulse_count += 1;
        self.release_pending = true;

        self.delay.delay_ms(self.config.hold_ms);
        self.release()?;

        let record = PulseRecord {
            started_at_ms: now,
            released_at_ms: self.clock.now_ms(),
        };
        self.history.write(record);
        Ok(Poll::Pulsed(record))
    }

    fn release(&mut self) -> Result<()> {
        self.pin.set_low()?;
        self.release_pending = false;
        Ok(())
    }

    /// Configure the pin and pulse forever.
    pub fn run(mut self) -> ! {
        while let Err(err) = self.configure() {
            error!("GPIO{} setup failed: {err}", self.config.pin);
            self.delay.delay_ms(self.config.interval_ms);
        }

        info!(
            "pulsing GPIO{} every {} ms for {} ms",
            self.config.pin, self.config.interval_ms, self.config.hold_ms
        );

        loop {
            match self.poll() {
                Ok(Poll::Pulsed(record)) => {
                    debug!(
                        "pulse #{} at {} ms, high for {} ms",
                        self.pulse_count,
                        record.started_at_ms,
                        record.high_for_ms()
                    );
                }
                Ok(Poll::Idle { .. }) => {}
                Err(err) => {
                    warn!("pulse failed: {err}");
                    self.delay.delay_ms(FAULT_BACKOFF_MS);
                }
            }
        }
    }
}
