use std::sync::atomic::{AtomicBool, Ordering};

use esp_idf_svc::nvs::{EspCustomNvsPartition, EspNvs, NvsCustom};

use super::sampler_configuration::{
    SamplerConfiguration, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_WINDOW, DEFAULT_READING_INTERVAL,
};
use crate::error::ConfigurationError;

static IS_NVS_TAKEN: AtomicBool = AtomicBool::new(false);

const PARTITION_NAME: &str = "config";
const NAMESPACE: &str = "config";

pub const KEY_READING_INTERVAL: &str = "READ_IV";
pub const KEY_POLL_INTERVAL: &str = "POLL_IV";
pub const KEY_POLL_WINDOW: &str = "POLL_WIN";

pub struct NvsConfiguration {
    nvs: EspNvs<NvsCustom>,
}

impl NvsConfiguration {
    pub fn new() -> Result<Self, ConfigurationError> {
        if IS_NVS_TAKEN.swap(true, Ordering::Relaxed) {
            return Err(ConfigurationError::AlreadyTaken);
        }

        let nvs_custom = EspCustomNvsPartition::take(PARTITION_NAME).map_err(|e| {
            IS_NVS_TAKEN.store(false, Ordering::Relaxed);
            ConfigurationError::Nvs("Fail to take partition", e)
        })?;

        match EspNvs::new(nvs_custom, NAMESPACE, true) {
            Ok(nvs) => Ok(Self { nvs }),
            Err(e) => {
                IS_NVS_TAKEN.store(false, Ordering::Relaxed);
                Err(ConfigurationError::Nvs(
                    "Failed to create EspNvs. Bad namespace ?",
                    e,
                ))
            }
        }
    }

    /// Sampler timing stored in flash, falling back to the defaults for missing keys.
    pub fn sampler_configuration(
        &self,
        pin: u8,
    ) -> Result<SamplerConfiguration, ConfigurationError> {
        SamplerConfiguration::new(
            pin,
            self.get_reading_interval(),
            self.get_poll_interval(),
            self.get_poll_window(),
        )
    }

    pub fn get_reading_interval(&self) -> u16 {
        self.read_u16(KEY_READING_INTERVAL, DEFAULT_READING_INTERVAL)
    }

    pub fn get_poll_interval(&self) -> u16 {
        self.read_u16(KEY_POLL_INTERVAL, DEFAULT_POLL_INTERVAL)
    }

    pub fn get_poll_window(&self) -> u16 {
        self.read_u16(KEY_POLL_WINDOW, DEFAULT_POLL_WINDOW)
    }

    pub fn read_u16(&self, key: &str, default: u16) -> u16 {
        self.nvs.get_u16(key).unwrap_or(None).unwrap_or(default)
    }
}

impl Drop for NvsConfiguration {
    fn drop(&mut self) {
        IS_NVS_TAKEN.store(false, Ordering::Relaxed);
    }
}
