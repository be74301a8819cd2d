use log::info;
use moisture_sampler::{
    sampling::MoistureSampler,
    sensors::{MoistureProbe, Sensor},
    time::TickSource,
};
use serde_json::{Map, Value};

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp_idf_svc::hal::{delay::FreeRtos, peripherals::Peripherals};
    use moisture_sampler::{
        board::{Board, PROBE_POWER_PIN},
        configuration::nvs_configuration::NvsConfiguration,
        time::{esp_ticks::EspTicks, SystemTime},
    };

    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take()?;
    let config = NvsConfiguration::new()?.sampler_configuration(PROBE_POWER_PIN)?;

    let mut clock = SystemTime::new(EspTicks);
    clock.initialize();

    // Let the probe supply settle.
    clock.delay(1000)?;

    let board = Board::new(peripherals.adc1, peripherals.pins)?;
    let mut sampler = MoistureSampler::new(config, board.moisture_probe, clock);
    sampler.configure();

    loop {
        run_once(&mut sampler)?;
        FreeRtos::delay_ms(10);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    use moisture_sampler::{
        configuration::SamplerConfiguration,
        sensors::SimulatedProbe,
        time::{simulated_ticks::SimulatedTicks, SystemTime},
    };

    const HOST_RESULTS: u32 = 3;
    const HOST_TICK_STEP: u32 = 10;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Start close to the end of the tick range so the run crosses a wraparound.
    let ticks = SimulatedTicks::starting_at(u32::MAX - 20_000);
    let mut clock = SystemTime::new(ticks.clone());
    clock.initialize();

    let probe = SimulatedProbe::cycling(vec![612, 598, 640, 655, 587, 603, 629, 610]);
    let mut sampler = MoistureSampler::new(SamplerConfiguration::default(), probe, clock);
    sampler.configure();

    let mut results = 0;
    while results < HOST_RESULTS {
        ticks.advance(HOST_TICK_STEP);
        if run_once(&mut sampler)? {
            results += 1;
        }
    }

    Ok(())
}

/// Drives the sampler one tick and logs any new result. Returns whether there was one.
fn run_once<P: MoistureProbe, T: TickSource>(
    sampler: &mut MoistureSampler<P, T>,
) -> anyhow::Result<bool> {
    sampler.tick()?;

    let result = sampler.poll_result()?;
    if result.has_new {
        let mut map = Map::new();
        sampler.add_json_value(&mut map);

        info!("{}", sampler.pretty_print());
        info!("{}", Value::Object(map));
    }

    Ok(result.has_new)
}
