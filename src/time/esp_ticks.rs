use esp_idf_svc::systime::EspSystemTime;

use super::system_time::TickSource;

/// Millisecond ticks since boot from the ESP high resolution timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EspTicks;

impl TickSource for EspTicks {
    fn ticks(&self) -> u32 {
        // Truncation is the wraparound.
        EspSystemTime.now().as_millis() as u32
    }
}
