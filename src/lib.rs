pub mod config;
pub mod model;
pub mod runner;
pub mod worker;

pub use config::{Config, ConfigError};
pub use model::{Summary, Target};
pub use runner::LoadTest;
