use crate::error::ClockError;

/// Size of the tick domain. The counter wraps back to zero after `TICK_RANGE - 1`.
pub const TICK_RANGE: u64 = 1 << 32;

/// Free-running tick counter backing [`SystemTime`].
///
/// One tick is the time unit of every interval in the firmware (1 ms on target).
pub trait TickSource {
    fn ticks(&self) -> u32;
}

/// Monotonic time base.
///
/// Every query is a no-op returning zero until [`SystemTime::initialize`] has been
/// called once. Elapsed-time arithmetic tolerates exactly one wrap of the counter
/// between the mark and now; a caller starved for more than the full tick range
/// gets a truncated answer.
pub struct SystemTime<T: TickSource> {
    source: T,
    initialized: bool,
}

impl<T: TickSource> SystemTime<T> {
    pub fn new(source: T) -> Self {
        Self {
            source,
            initialized: false,
        }
    }

    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.initialized = true;
        log::debug!("System time initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn now(&self) -> u32 {
        if !self.initialized {
            return 0;
        }

        self.source.ticks()
    }

    pub fn elapsed_since(&self, mark: u32) -> u32 {
        if !self.initialized {
            return 0;
        }

        Self::ticks_between(mark, self.now())
    }

    /// Ticks from `mark` to `now`, assuming at most one wrap in between.
    pub fn ticks_between(mark: u32, now: u32) -> u32 {
        if now >= mark {
            now - mark
        } else {
            (TICK_RANGE - u64::from(mark) + u64::from(now)) as u32
        }
    }

    /// Busy-waits for `ticks`. Only meant for one-shot startup sequencing.
    pub fn delay(&self, ticks: u32) -> Result<(), ClockError> {
        if !self.initialized {
            return self.uninitialized_delay();
        }

        let mark = self.now();
        while self.elapsed_since(mark) < ticks {
            core::hint::spin_loop();
        }

        Ok(())
    }

    #[cfg(feature = "delay-hang")]
    fn uninitialized_delay(&self) -> Result<(), ClockError> {
        log::error!("delay() called before the system time was initialized, halting");

        loop {
            core::hint::spin_loop();
        }
    }

    #[cfg(feature = "delay-error")]
    fn uninitialized_delay(&self) -> Result<(), ClockError> {
        Err(ClockError::Uninitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::simulated_ticks::SimulatedTicks;

    fn ready_clock(start: u32) -> (SystemTime<SimulatedTicks>, SimulatedTicks) {
        let ticks = SimulatedTicks::starting_at(start);
        let mut clock = SystemTime::new(ticks.clone());
        clock.initialize();
        (clock, ticks)
    }

    #[test]
    fn uninitialized_clock_reports_zero() {
        let ticks = SimulatedTicks::starting_at(5_000);
        let clock = SystemTime::new(ticks);

        assert!(!clock.is_initialized());
        assert_eq!(clock.now(), 0);
        assert_eq!(clock.elapsed_since(1_000), 0);
    }

    #[test]
    fn initialize_is_idempotent() {
        let (mut clock, _) = ready_clock(42);
        clock.initialize();

        assert!(clock.is_initialized());
        assert_eq!(clock.now(), 42);
    }

    #[test]
    fn elapsed_without_wrap() {
        let (clock, ticks) = ready_clock(1_000);
        let mark = clock.now();
        ticks.advance(250);

        assert_eq!(clock.elapsed_since(mark), 250);
        assert_eq!(clock.elapsed_since(clock.now()), 0);
    }

    #[test]
    fn elapsed_across_one_wrap() {
        let (clock, ticks) = ready_clock(u32::MAX - 9);
        let mark = clock.now();
        ticks.advance(30);

        assert_eq!(clock.now(), 20);
        assert_eq!(clock.elapsed_since(mark), 30);
    }

    #[test]
    fn elapsed_matches_modular_difference() {
        let cases = [
            (0u32, 0u32),
            (0, u32::MAX),
            (u32::MAX, 0),
            (u32::MAX, u32::MAX),
            (1, 0),
            (0x8000_0000, 0x7FFF_FFFF),
            (123_456, 654_321),
            (4_000_000_000, 5),
        ];

        for (mark, now) in cases {
            assert_eq!(
                SystemTime::<SimulatedTicks>::ticks_between(mark, now),
                now.wrapping_sub(mark),
                "mark={mark} now={now}"
            );
        }
    }

    #[test]
    fn delay_waits_for_requested_ticks() {
        let ticks = SimulatedTicks::starting_at(u32::MAX - 3).with_step(1);
        let mut clock = SystemTime::new(ticks.clone());
        clock.initialize();

        clock.delay(10).unwrap();

        // The mark read plus at least ten reads until the threshold is crossed.
        assert!(ticks.get().wrapping_sub(u32::MAX - 3) >= 11);
    }

    #[cfg(feature = "delay-error")]
    #[test]
    fn delay_on_uninitialized_clock_fails() {
        let clock = SystemTime::new(SimulatedTicks::default());

        assert_eq!(clock.delay(10), Err(ClockError::Uninitialized));
    }
}
