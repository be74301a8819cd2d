pub mod aggregator;
pub mod publisher;
pub mod sampler;

pub use aggregator::{Aggregator, WindowStatistics};
pub use publisher::{to_percent, LinearMap, MoistureReading, PollResult, Publisher, MOISTURE_SCALE};
pub use sampler::{MoistureSampler, SamplerState};
