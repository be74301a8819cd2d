use esp_idf_svc::hal::{
    adc::{oneshot::AdcDriver, ADC1},
    gpio::*,
};

use crate::sensors::moisture_sensor::EspMoistureProbe;

/// GPIO switching the probe supply.
pub const PROBE_POWER_PIN: u8 = 2;

pub type BoardMoistureProbe<'a> = EspMoistureProbe<'a, ADC1, Gpio2, Gpio4, AdcDriver<'a, ADC1>>;

pub struct Board<'a> {
    pub moisture_probe: BoardMoistureProbe<'a>,
}

impl<'a> Board<'a> {
    pub fn new(adc_1: ADC1, pins: Pins) -> anyhow::Result<Self> {
        let adc = AdcDriver::new(adc_1)?;

        Ok(Self {
            moisture_probe: EspMoistureProbe::new(adc, pins.gpio4, pins.gpio2)?,
        })
    }
}
