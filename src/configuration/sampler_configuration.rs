use crate::error::ConfigurationError;

pub const DEFAULT_PROBE_PIN: u8 = 2;
pub const DEFAULT_READING_INTERVAL: u16 = 15_000;
pub const DEFAULT_POLL_INTERVAL: u16 = 100;
pub const DEFAULT_POLL_WINDOW: u16 = 10 * DEFAULT_POLL_INTERVAL;

/// Timing of one moisture probe, in clock ticks.
///
/// Fixed once the sampler is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfiguration {
    pin: u8,
    reading_interval: u16,
    poll_interval: u16,
    poll_window: u16,
}

impl SamplerConfiguration {
    pub fn new(
        pin: u8,
        reading_interval: u16,
        poll_interval: u16,
        poll_window: u16,
    ) -> Result<Self, ConfigurationError> {
        if reading_interval == 0 {
            return Err(ConfigurationError::ZeroInterval("reading interval"));
        }
        if poll_interval == 0 {
            return Err(ConfigurationError::ZeroInterval("poll interval"));
        }
        if poll_window == 0 {
            return Err(ConfigurationError::ZeroInterval("poll window"));
        }

        Ok(Self {
            pin,
            reading_interval,
            poll_interval,
            poll_window,
        })
    }

    /// Power control pin of the probe.
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Ticks spent waiting between two polling windows.
    pub fn reading_interval(&self) -> u16 {
        self.reading_interval
    }

    /// Ticks between two samples inside a window.
    pub fn poll_interval(&self) -> u16 {
        self.poll_interval
    }

    pub fn poll_window(&self) -> u16 {
        self.poll_window
    }
}

impl Default for SamplerConfiguration {
    fn default() -> Self {
        Self {
            pin: DEFAULT_PROBE_PIN,
            reading_interval: DEFAULT_READING_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_window: DEFAULT_POLL_WINDOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SamplerConfiguration::default();

        assert_eq!(config.pin(), 2);
        assert_eq!(config.reading_interval(), 15_000);
        assert_eq!(config.poll_interval(), 100);
        assert_eq!(config.poll_window(), 1_000);
    }

    #[test]
    fn rejects_zero_intervals() {
        assert!(matches!(
            SamplerConfiguration::new(2, 0, 100, 1000),
            Err(ConfigurationError::ZeroInterval("reading interval"))
        ));
        assert!(matches!(
            SamplerConfiguration::new(2, 15_000, 0, 1000),
            Err(ConfigurationError::ZeroInterval("poll interval"))
        ));
        assert!(matches!(
            SamplerConfiguration::new(2, 15_000, 100, 0),
            Err(ConfigurationError::ZeroInterval("poll window"))
        ));
    }

    #[test]
    fn accepts_window_shorter_than_poll_interval() {
        let config = SamplerConfiguration::new(4, 1_000, 400, 300).unwrap();

        assert_eq!(config.pin(), 4);
        assert_eq!(config.poll_interval(), 400);
        assert_eq!(config.poll_window(), 300);
    }
}
