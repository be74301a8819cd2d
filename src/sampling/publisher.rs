use super::aggregator::WindowStatistics;

/// Raw value of a bone dry probe.
pub const RAW_HIGH: i32 = 1024;
/// Raw value of a probe in water.
pub const RAW_LOW: i32 = 350;

pub const PERCENT_LOW: i32 = 0;
pub const PERCENT_HIGH: i32 = 100;

/// Integer affine map from `[from_low, from_high]` onto `[to_low, to_high]`.
///
/// Endpoints may be given in reverse order to invert the scale. Division truncates
/// toward zero and inputs outside the source range are extrapolated, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearMap {
    from_low: i32,
    from_high: i32,
    to_low: i32,
    to_high: i32,
}

impl LinearMap {
    pub const fn new(from_low: i32, from_high: i32, to_low: i32, to_high: i32) -> Self {
        Self {
            from_low,
            from_high,
            to_low,
            to_high,
        }
    }

    pub fn apply(&self, value: i32) -> i32 {
        (value - self.from_low) * (self.to_high - self.to_low) / (self.from_high - self.from_low)
            + self.to_low
    }
}

pub const MOISTURE_SCALE: LinearMap = LinearMap::new(RAW_HIGH, RAW_LOW, PERCENT_LOW, PERCENT_HIGH);

pub fn to_percent(raw: u16) -> i32 {
    MOISTURE_SCALE.apply(i32::from(raw))
}

/// Last published moisture values, in percent.
///
/// Miscalibrated hardware can push any of them below 0 or above 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoistureReading {
    pub current: i32,
    pub average: i32,
    pub maximum: i32,
    pub minimum: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollResult {
    pub has_new: bool,
    pub reading: MoistureReading,
}

/// Holds the published reading and the clear-on-read "new result" flag.
#[derive(Debug, Default)]
pub struct Publisher {
    reading: MoistureReading,
    new_result: bool,
}

impl Publisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `current_raw` and, when present, the statistics of the last
    /// window. Without statistics the previous aggregates are kept as they are.
    pub fn publish(
        &mut self,
        current_raw: u16,
        statistics: Option<&WindowStatistics>,
    ) -> MoistureReading {
        self.reading.current = to_percent(current_raw);

        if let Some(stats) = statistics {
            self.reading.average = to_percent(stats.average);
            self.reading.maximum = to_percent(stats.raw_ceiling);
            self.reading.minimum = to_percent(stats.raw_floor);
        }

        self.new_result = true;
        self.reading
    }

    /// Single consumer read: reports a new result once, then clears the flag.
    pub fn poll(&mut self) -> PollResult {
        PollResult {
            has_new: std::mem::take(&mut self.new_result),
            reading: self.reading,
        }
    }

    pub fn reading(&self) -> MoistureReading {
        self.reading
    }

    pub fn has_new_result(&self) -> bool {
        self.new_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_endpoints() {
        assert_eq!(to_percent(1024), 0);
        assert_eq!(to_percent(350), 100);
        assert_eq!(to_percent(1023), 0);
    }

    #[test]
    fn scale_truncates_toward_zero() {
        assert_eq!(to_percent(300), 107);
        assert_eq!(to_percent(400), 92);
        assert_eq!(to_percent(500), 77);
        assert_eq!(to_percent(687), 50);
    }

    #[test]
    fn out_of_range_values_are_extrapolated() {
        assert_eq!(to_percent(0), 151);
        assert_eq!(to_percent(1100), -11);
        assert_eq!(to_percent(u16::MAX), -9571);
    }

    #[test]
    fn generic_map_keeps_orientation() {
        let map = LinearMap::new(0, 10, 0, 1000);

        assert_eq!(map.apply(5), 500);
        assert_eq!(map.apply(-1), -100);
    }

    #[test]
    fn aggregates_are_mapped_independently() {
        let mut publisher = Publisher::new();
        let stats = WindowStatistics {
            average: 400,
            raw_ceiling: 300,
            raw_floor: 500,
            sample_count: 3,
        };

        let reading = publisher.publish(500, Some(&stats));

        assert_eq!(
            reading,
            MoistureReading {
                current: 77,
                average: 92,
                maximum: 107,
                minimum: 77,
            }
        );
    }

    #[test]
    fn publish_without_statistics_keeps_aggregates() {
        let mut publisher = Publisher::new();
        let stats = WindowStatistics {
            average: 400,
            raw_ceiling: 300,
            raw_floor: 500,
            sample_count: 3,
        };
        publisher.publish(500, Some(&stats));
        publisher.poll();

        let reading = publisher.publish(1024, None);

        assert_eq!(reading.current, 0);
        assert_eq!(reading.average, 92);
        assert_eq!(reading.maximum, 107);
        assert_eq!(reading.minimum, 77);
        assert!(publisher.has_new_result());
    }

    #[test]
    fn poll_clears_on_read() {
        let mut publisher = Publisher::new();
        assert!(!publisher.poll().has_new);

        publisher.publish(687, None);

        let first = publisher.poll();
        let second = publisher.poll();
        assert!(first.has_new);
        assert!(!second.has_new);
        assert_eq!(first.reading, second.reading);
        assert_eq!(second.reading.current, 50);
    }
}
