pub mod default_config;
pub mod service_config;
