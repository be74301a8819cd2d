pub mod sampler_configuration;

#[cfg(target_os = "espidf")]
pub mod nvs_configuration;

pub use sampler_configuration::SamplerConfiguration;
