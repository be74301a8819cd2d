use std::borrow::Borrow;

use esp_idf_svc::hal::{
    adc::{
        attenuation,
        oneshot::{config::AdcChannelConfig, AdcChannelDriver, AdcDriver},
        Adc,
    },
    gpio::{ADCPin, Output, OutputPin, PinDriver},
};

use super::moisture_probe::MoistureProbe;

/// The ADC converts on 12 bits, the moisture scale expects 10.
const ADC_TO_RAW_SHIFT: u16 = 2;

pub struct EspMoistureProbe<
    'a,
    ADC: Adc + 'a,
    PEN: OutputPin,
    APin: ADCPin<Adc = ADC>,
    M: Borrow<AdcDriver<'a, ADC>>,
> {
    channel: AdcChannelDriver<'a, APin, M>,
    pin_enable: PinDriver<'a, PEN, Output>,
}

impl<'a, ADC: Adc + 'a, PEN: OutputPin, APin: ADCPin<Adc = ADC>, M: Borrow<AdcDriver<'a, ADC>>>
    EspMoistureProbe<'a, ADC, PEN, APin, M>
{
    pub fn new(adc_driver: M, pin_adc: APin, pin_enable: PEN) -> anyhow::Result<Self> {
        let mut s = Self {
            channel: AdcChannelDriver::new(
                adc_driver,
                pin_adc,
                &AdcChannelConfig {
                    attenuation: attenuation::DB_11,
                    calibration: false,
                    ..Default::default()
                },
            )?,
            pin_enable: PinDriver::output(pin_enable)?,
        };

        s.pin_enable.set_low()?;

        Ok(s)
    }
}

impl<'a, ADC: Adc + 'a, PEN: OutputPin, APin: ADCPin<Adc = ADC>, M: Borrow<AdcDriver<'a, ADC>>>
    MoistureProbe for EspMoistureProbe<'a, ADC, PEN, APin, M>
{
    fn set_power(&mut self, on: bool) {
        let result = if on {
            self.pin_enable.set_high()
        } else {
            self.pin_enable.set_low()
        };

        if let Err(e) = result {
            log::warn!("Failed to switch moisture probe power: {e}");
        }
    }

    fn read_raw(&mut self) -> u16 {
        match self.channel.read_raw() {
            Ok(value) => value >> ADC_TO_RAW_SHIFT,
            Err(e) => {
                log::warn!("Moisture probe conversion failed: {e}");
                0
            }
        }
    }
}
