use super::moisture_probe::MoistureProbe;

/// Scripted probe for the host build and tests.
///
/// Reads cycle through `script`; an empty script behaves like a disconnected
/// probe and reads 0. Every power write is recorded.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProbe {
    script: Vec<u16>,
    cursor: usize,
    powered: bool,
    power_log: Vec<bool>,
}

impl SimulatedProbe {
    pub fn cycling(script: Vec<u16>) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    pub fn power_log(&self) -> &[bool] {
        &self.power_log
    }

    pub fn read_count(&self) -> usize {
        self.cursor
    }
}

impl MoistureProbe for SimulatedProbe {
    fn set_power(&mut self, on: bool) {
        self.powered = on;
        self.power_log.push(on);
    }

    fn read_raw(&mut self) -> u16 {
        let value = match self.script.len() {
            0 => 0,
            len => self.script[self.cursor % len],
        };
        self.cursor += 1;
        value
    }
}
