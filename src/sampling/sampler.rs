use log::{debug, info, warn};
use serde_json::{json, Map, Value};

use super::{
    aggregator::{Aggregator, WindowStatistics},
    publisher::{MoistureReading, PollResult, Publisher},
};
use crate::{
    configuration::SamplerConfiguration,
    error::SamplerError,
    sensors::{MoistureProbe, Sensor},
    time::{SystemTime, TickSource},
};

/// Tick deltas are accumulated on 16 bits. A pause longer than that between two
/// ticks loses its high-order bits.
const DELTA_MASK: u32 = 0xFFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    /// One-shot read right after power up, then `Waiting`.
    Booting,
    /// Probe idle until the reading interval elapses, then `Polling`.
    Waiting,
    /// Probe sampled every poll interval until the window closes.
    Polling,
}

/// Moisture sampling state machine for one probe.
///
/// Driven by calling [`MoistureSampler::tick`] once per scheduling period. After
/// every state update a reporting hook runs: when a polling window has just closed
/// it moves back to `Waiting`, powers the probe, publishes the window and raises the
/// "new result" flag read by [`MoistureSampler::poll_result`].
///
/// | state     | condition                         | action                               | next      |
/// |-----------|-----------------------------------|--------------------------------------|-----------|
/// | `Booting` | always                            | power on, read, power off            | `Waiting` |
/// | `Waiting` | reading accumulator >= interval   | power on                             | `Polling` |
/// | `Polling` | sample accumulator >= interval    | read, fold                           | `Polling` |
/// | `Polling` | window accumulator >= window      | finalize if sampled, power off       | `Polling` |
/// | any       | window closed (reporting hook)    | power on, publish                    | `Waiting` |
pub struct MoistureSampler<P: MoistureProbe, T: TickSource> {
    config: SamplerConfiguration,
    probe: P,
    clock: SystemTime<T>,

    configured: bool,
    state: SamplerState,
    last_tick: u32,

    reading_acc: u32,
    poll_acc: u32,
    window_acc: u32,
    window_closed: bool,

    aggregator: Aggregator,
    statistics: Option<WindowStatistics>,
    raw_value: u16,
    publisher: Publisher,
}

impl<P: MoistureProbe, T: TickSource> MoistureSampler<P, T> {
    pub fn new(config: SamplerConfiguration, probe: P, clock: SystemTime<T>) -> Self {
        Self {
            config,
            probe,
            clock,
            configured: false,
            state: SamplerState::Booting,
            last_tick: 0,
            // Pre-charged so the first window opens as soon as booting is done.
            reading_acc: u32::from(config.reading_interval()),
            poll_acc: 0,
            window_acc: 0,
            window_closed: false,
            aggregator: Aggregator::new(),
            statistics: None,
            raw_value: 0,
            publisher: Publisher::new(),
        }
    }

    /// Switches the probe off and starts measuring time. Calling it again does nothing.
    pub fn configure(&mut self) {
        if self.configured {
            debug!("Moisture sampler on pin {} already configured", self.config.pin());
            return;
        }

        self.probe.set_power(false);
        self.last_tick = self.clock.now();
        self.configured = true;

        info!(
            "Moisture sampler configured on pin {} (reading every {} ticks, sampling every {} ticks for {} ticks)",
            self.config.pin(),
            self.config.reading_interval(),
            self.config.poll_interval(),
            self.config.poll_window()
        );
    }

    pub fn tick(&mut self) -> Result<(), SamplerError> {
        if !self.configured {
            return Err(SamplerError::NotConfigured);
        }

        let now = self.clock.now();
        let delta = SystemTime::<T>::ticks_between(self.last_tick, now) & DELTA_MASK;
        self.last_tick = now;

        match self.state {
            SamplerState::Booting => self.boot(),
            SamplerState::Waiting => self.wait(delta),
            SamplerState::Polling => self.poll(delta),
        }

        self.report();

        Ok(())
    }

    /// Returns the published reading and whether it is new since the previous call.
    pub fn poll_result(&mut self) -> Result<PollResult, SamplerError> {
        if !self.configured {
            return Err(SamplerError::NotConfigured);
        }

        Ok(self.publisher.poll())
    }

    fn boot(&mut self) {
        self.probe.set_power(true);
        self.raw_value = self.probe.read_raw();
        self.probe.set_power(false);

        debug!("Boot reading: {}", self.raw_value);
        self.state = SamplerState::Waiting;
    }

    fn wait(&mut self, delta: u32) {
        self.reading_acc += delta;

        if self.reading_acc >= u32::from(self.config.reading_interval()) {
            self.reading_acc = 0;
            self.state = SamplerState::Polling;
            self.probe.set_power(true);

            info!("Polling moisture probe");
        }
    }

    fn poll(&mut self, delta: u32) {
        self.poll_acc += delta;
        self.window_acc += delta;

        if self.poll_acc >= u32::from(self.config.poll_interval()) {
            self.poll_acc = 0;
            self.raw_value = self.probe.read_raw();
            self.aggregator.fold(self.raw_value);

            debug!(
                "Sample #{}: {}",
                self.aggregator.sample_count(),
                self.raw_value
            );
        }

        if self.window_acc >= u32::from(self.config.poll_window()) {
            self.window_acc = 0;

            match self.aggregator.finalize() {
                Some(stats) => {
                    self.statistics = Some(stats);
                    self.aggregator.reset();
                    self.probe.set_power(false);
                }
                None => warn!("Polling window closed without any sample"),
            }

            self.window_closed = true;
        }
    }

    fn report(&mut self) {
        if !self.window_closed {
            return;
        }

        self.window_closed = false;
        self.state = SamplerState::Waiting;
        self.probe.set_power(true);

        let reading = self
            .publisher
            .publish(self.raw_value, self.statistics.as_ref());

        info!(
            "Moisture: {}% (average {}%, max {}%, min {}%)",
            reading.current, reading.average, reading.maximum, reading.minimum
        );
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn pin(&self) -> u8 {
        self.config.pin()
    }

    pub fn configuration(&self) -> &SamplerConfiguration {
        &self.config
    }

    /// Last raw sample taken, boot read included.
    pub fn raw_value(&self) -> u16 {
        self.raw_value
    }

    pub fn statistics(&self) -> Option<&WindowStatistics> {
        self.statistics.as_ref()
    }

    /// Published reading, without touching the "new result" flag.
    pub fn reading(&self) -> MoistureReading {
        self.publisher.reading()
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn clock(&self) -> &SystemTime<T> {
        &self.clock
    }
}

impl<P: MoistureProbe, T: TickSource> Sensor for MoistureSampler<P, T> {
    fn add_json_value(&mut self, map: &mut Map<String, Value>) {
        let reading = self.reading();

        map.insert("pin".to_string(), json!(self.pin()));
        map.insert("raw".to_string(), json!(self.raw_value));
        map.insert("current".to_string(), json!(reading.current));
        map.insert("average".to_string(), json!(reading.average));
        map.insert("maximum".to_string(), json!(reading.maximum));
        map.insert("minimum".to_string(), json!(reading.minimum));
    }

    fn pretty_print(&mut self) -> String {
        let reading = self.reading();

        format!(
            "Moisture level: {}% (average: {}%, max: {}%, min: {}%, raw value: {})",
            reading.current, reading.average, reading.maximum, reading.minimum, self.raw_value
        )
    }
}
