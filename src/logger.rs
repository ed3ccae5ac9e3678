use log::LevelFilter;

/// Default verbosity; pulses log at `debug`.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Debug;

/// Install the log backend. Call once, first thing in `main`.
#[cfg(target_os = "espidf")]
pub fn init() {
    esp_idf_svc::log::EspLogger::initialize_default();
    log::set_max_level(DEFAULT_LEVEL);
}

/// Install the log backend. Call once, first thing in `main`.
///
/// `RUST_LOG` overrides [`DEFAULT_LEVEL`].
#[cfg(not(target_os = "espidf"))]
pub fn init() {
    let mut builder = pretty_env_logger::formatted_timed_builder();
    builder.filter_level(DEFAULT_LEVEL);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A second init (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
}
