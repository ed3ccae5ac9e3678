use log::info;
use powerbank_keepalive::{
    clock::{SystemClock, SystemDelay},
    config::{PulseConfig, TaskConfig},
    gpio::BoardPin,
    logger,
    pulse::PulseLoop,
    tasks,
};

fn main() -> anyhow::Result<()> {
    #[cfg(target_os = "espidf")]
    esp_idf_svc::sys::link_patches();
    logger::init();
    info!("BOOT");

    let config = PulseConfig::default();
    let task = TaskConfig::default();

    let pulse = PulseLoop::new(BoardPin::new(config.pin), SystemClock::new(), SystemDelay, config)?;
    info!(
        "keep-alive on GPIO{}: {} ms every {} ms",
        pulse.config().pin,
        pulse.config().hold_ms,
        pulse.config().interval_ms
    );

    let handle = tasks::spawn(&task, move || pulse.run())?;

    // ESP-IDF keeps the task alive after app_main returns; a host process would exit.
    #[cfg(not(target_os = "espidf"))]
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("pulse task panicked"))?;
    #[cfg(target_os = "espidf")]
    drop(handle);

    Ok(())
}
