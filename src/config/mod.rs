use crate::domain::model::{default_sources, SourceSpec};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use clap::Parser;
use serde::Serialize;

/// Matches the precision of the shipped reference table.
pub const DEFAULT_PLACES: usize = 10_000;

/// The built-in sources publish one million digits.
const MAX_PLACES: usize = 1_000_000;

#[derive(Debug, Clone, Serialize, Parser)]
#[command(name = "pi-verify")]
#[command(about = "Download and cross-verify the decimal expansion of Pi")]
pub struct CliConfig {
    /// Number of decimal places to verify.
    #[arg(long, default_value_t = DEFAULT_PLACES)]
    pub places: usize,

    /// Directory for cached page downloads.
    #[arg(long, default_value = ".cache")]
    pub cache_dir: String,

    /// Rust source file holding the PI_DECIMALS reference table.
    #[arg(long, default_value = "src/pi/decimals.rs")]
    pub reference: String,

    #[arg(long, help = "Skip the reference table comparison")]
    pub no_reference: bool,

    #[arg(long, help = "Emit a JSON report instead of the plain digit dump")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn sources(&self) -> Vec<SourceSpec> {
        default_sources()
    }

    fn target_places(&self) -> usize {
        self.places
    }

    fn cache_dir(&self) -> &str {
        &self.cache_dir
    }

    fn reference_path(&self) -> Option<&str> {
        if self.no_reference {
            None
        } else {
            Some(&self.reference)
        }
    }

    fn json_report(&self) -> bool {
        self.json
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_range("places", self.places, 1, MAX_PLACES)?;
        validate_path("cache_dir", &self.cache_dir)?;
        validate_path("reference", &self.reference)?;

        for source in self.sources() {
            validate_url(&format!("source '{}'", source.name), &source.url)?;
        }

        Ok(())
    }
}
