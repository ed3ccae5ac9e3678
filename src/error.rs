use thiserror::Error;

pub type Result<T, E = PulseError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PulseError {
    /// The GPIO driver rejected a configure or set-level call.
    #[error("GPIO{pin} driver error (esp_err_t {code})")]
    Gpio { pin: i32, code: i32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("failed to spawn pulse task")]
    Spawn(#[source] std::io::Error),

    /// ESP-IDF refused a call outside the GPIO driver, e.g. thread spawn configuration.
    #[error("platform call failed (esp_err_t {code})")]
    Platform { code: i32 },
}

#[cfg(target_os = "espidf")]
impl From<esp_idf_sys::EspError> for PulseError {
    fn from(err: esp_idf_sys::EspError) -> Self {
        PulseError::Platform { code: err.code() }
    }
}
