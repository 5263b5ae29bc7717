pub mod engine;
pub mod extract;
pub mod pipeline;
pub mod reference;
pub mod verify;

pub use crate::domain::model::{RawSource, SourceResult, SourceSpec, VerifiedDigits};
pub use crate::domain::ports::{CacheStore, ConfigProvider, Fetcher, Pipeline};
pub use crate::utils::error::Result;
