/// Power switch and analog channel of a moisture probe.
///
/// Both operations are infallible from the sampler's point of view: a failed power
/// write is ignored and a failed conversion reads as 0, so a missing probe just
/// produces out-of-range readings.
pub trait MoistureProbe {
    fn set_power(&mut self, on: bool);

    /// Raw conversion in the 0..=1023 domain. Lower means wetter.
    fn read_raw(&mut self) -> u16;
}
