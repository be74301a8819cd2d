use std::{cell::Cell, rc::Rc};

use super::system_time::TickSource;

/// Tick counter driven by hand, for the host build and tests.
///
/// Clones share the same counter, so a test can keep one handle while the clock
/// owns another. A non-zero `step` advances the counter on every read, which lets
/// busy-waits make progress.
#[derive(Debug, Clone, Default)]
pub struct SimulatedTicks {
    now: Rc<Cell<u32>>,
    step: u32,
}

impl SimulatedTicks {
    pub fn starting_at(start: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
            step: 0,
        }
    }

    pub fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    pub fn get(&self) -> u32 {
        self.now.get()
    }

    pub fn set(&self, ticks: u32) {
        self.now.set(ticks);
    }

    pub fn advance(&self, ticks: u32) {
        self.now.set(self.now.get().wrapping_add(ticks));
    }
}

impl TickSource for SimulatedTicks {
    fn ticks(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step));
        now
    }
}
