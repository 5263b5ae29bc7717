pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{CachingFetcher, FileCache};
pub use config::CliConfig;
pub use core::{engine::VerifyEngine, pipeline::VerifyPipeline};
pub use utils::error::{Result, VerifyError};
