pub mod config;
pub mod invocation;

pub use config::{EngineConfig, CONFIG_ENV};
pub use invocation::{Invocation, Step};
