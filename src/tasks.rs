use std::thread::{self, JoinHandle};

use log::info;

use crate::config::TaskConfig;
use crate::error::{PulseError, Result};

/// Start `body` as its own task with the configured name, stack and priority.
///
/// On ESP-IDF the std thread is created under a `ThreadSpawnConfiguration`, so
/// it becomes a FreeRTOS task with those attributes. The configuration is reset
/// afterwards so later spawns get the defaults again.
pub fn spawn<F>(config: &TaskConfig, body: F) -> Result<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    config.validate()?;
    let name: &'static core::ffi::CStr = config.name;

    #[cfg(target_os = "espidf")]
    esp_idf_hal::task::thread::ThreadSpawnConfiguration {
        name: Some(name.to_bytes_with_nul()),
        stack_size: config.stack_size,
        priority: config.priority,
        ..Default::default()
    }
    .set()?;

    let handle = thread::Builder::new()
        .name(name.to_string_lossy().into_owned())
        .stack_size(config.stack_size)
        .spawn(body)
        .map_err(PulseError::Spawn);

    #[cfg(target_os = "espidf")]
    esp_idf_hal::task::thread::ThreadSpawnConfiguration::default().set()?;

    let handle = handle?;
    info!(
        "task {:?} started (stack {} bytes, priority {})",
        name, config.stack_size, config.priority
    );
    Ok(handle)
}
