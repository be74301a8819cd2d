use thiserror::Error;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::EspError;

/// Errors raised by the monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("system time used before initialization")]
    Uninitialized,
}

/// Errors raised by the sampling state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SamplerError {
    #[error("moisture sampler used before configure()")]
    NotConfigured,
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("configuration NVS already taken")]
    AlreadyTaken,

    #[cfg(target_os = "espidf")]
    #[error("{0}: {1}")]
    Nvs(&'static str, #[source] EspError),
}
