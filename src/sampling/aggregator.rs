/// Aggregate of one closed polling window, in the raw sensor domain.
///
/// The raw scale is inverted (lower raw is wetter), so `raw_ceiling` is the lowest
/// raw value seen and is displayed as the maximum moisture, while `raw_floor` is the
/// highest raw value seen and is displayed as the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStatistics {
    pub average: u16,
    pub raw_ceiling: u16,
    pub raw_floor: u16,
    pub sample_count: u32,
}

/// Running sum, count and extremes of the samples of the current window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregator {
    sample_count: u32,
    sum: u64,
    raw_ceiling: u16,
    raw_floor: u16,
}

impl Aggregator {
    pub const fn new() -> Self {
        Self {
            sample_count: 0,
            sum: 0,
            raw_ceiling: u16::MAX,
            raw_floor: 0,
        }
    }

    pub fn fold(&mut self, sample: u16) {
        self.sample_count += 1;
        self.sum += u64::from(sample);
        self.raw_ceiling = self.raw_ceiling.min(sample);
        self.raw_floor = self.raw_floor.max(sample);
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }

    /// Closes the window. The average is truncated, not rounded.
    ///
    /// Returns `None` when no sample was folded since the last reset.
    pub fn finalize(&self) -> Option<WindowStatistics> {
        if self.is_empty() {
            return None;
        }

        Some(WindowStatistics {
            average: (self.sum / u64::from(self.sample_count)) as u16,
            raw_ceiling: self.raw_ceiling,
            raw_floor: self.raw_floor,
            sample_count: self.sample_count,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(samples: &[u16]) -> Option<WindowStatistics> {
        let mut aggregator = Aggregator::new();
        for &sample in samples {
            aggregator.fold(sample);
        }
        aggregator.finalize()
    }

    #[test]
    fn three_sample_window() {
        let stats = aggregate(&[300, 400, 500]).unwrap();

        assert_eq!(stats.average, 400);
        assert_eq!(stats.raw_floor, 500);
        assert_eq!(stats.raw_ceiling, 300);
        assert_eq!(stats.sample_count, 3);
    }

    #[test]
    fn average_is_truncated() {
        assert_eq!(aggregate(&[1, 2]).unwrap().average, 1);
        assert_eq!(aggregate(&[500, 501, 501]).unwrap().average, 500);
    }

    #[test]
    fn fold_order_does_not_matter() {
        let orders: [[u16; 4]; 4] = [
            [612, 350, 1023, 480],
            [1023, 480, 612, 350],
            [350, 1023, 480, 612],
            [480, 612, 350, 1023],
        ];

        let expected = aggregate(&orders[0]);
        for order in &orders[1..] {
            assert_eq!(aggregate(order), expected);
        }
    }

    #[test]
    fn empty_window_has_no_statistics() {
        let aggregator = Aggregator::new();

        assert!(aggregator.is_empty());
        assert_eq!(aggregator.finalize(), None);
    }

    #[test]
    fn single_sample_is_its_own_extremes() {
        let stats = aggregate(&[777]).unwrap();

        assert_eq!(stats.average, 777);
        assert_eq!(stats.raw_ceiling, 777);
        assert_eq!(stats.raw_floor, 777);
    }

    #[test]
    fn reset_starts_a_fresh_window() {
        let mut aggregator = Aggregator::new();
        aggregator.fold(100);
        aggregator.fold(900);
        aggregator.reset();
        aggregator.fold(500);

        let stats = aggregator.finalize().unwrap();
        assert_eq!(stats.average, 500);
        assert_eq!(stats.raw_ceiling, 500);
        assert_eq!(stats.raw_floor, 500);
        assert_eq!(aggregator.sample_count(), 1);
    }
}
