use serde::{Deserialize, Serialize};

/// Parsing strategy for a digit source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserKind {
    /// HTML pages carrying one continuous digit run: "3.14159265358979...".
    HtmlContinuous,
    /// Plain-text digit tables with separator lines, block markers and
    /// trailing annotations.
    PlainText,
}

/// Where to fetch a digit source and how to parse it.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub name: String,
    pub url: String,
    pub parser: ParserKind,
}

/// The built-in source table. High-precision pages (1M digits) are used to
/// avoid rounding issues near the cutoff.
pub fn default_sources() -> Vec<SourceSpec> {
    vec![
        SourceSpec {
            name: "piday.org".to_string(),
            url: "https://www.piday.org/million/".to_string(),
            parser: ParserKind::HtmlContinuous,
        },
        SourceSpec {
            name: "damienelliott.com".to_string(),
            url: "https://www.damienelliott.com/1-million-digits-of-pi-%cf%80-ready-to-copy-and-paste/"
                .to_string(),
            parser: ParserKind::HtmlContinuous,
        },
    ]
}

/// Fetched page body for one source. `None` records a failed download.
#[derive(Debug, Clone)]
pub struct RawSource {
    pub spec: SourceSpec,
    pub content: Option<String>,
}

/// Extraction outcome for one source. `None` records a fetch or parse
/// failure; the run continues with the remaining sources.
#[derive(Debug, Clone)]
pub struct SourceResult {
    pub name: String,
    pub decimals: Option<String>,
}

/// The cross-verified decimal expansion.
#[derive(Debug, Clone)]
pub struct VerifiedDigits {
    /// Decimal places only, without the leading "3.".
    pub decimals: String,
    pub sources: Vec<SourceResult>,
    /// False when only a single source succeeded and no cross-check ran.
    pub cross_checked: bool,
}

/// First divergence between the reference table and the verified digits,
/// with a ±10 character window around it on either side.
#[derive(Debug, Clone, Serialize)]
pub struct DigitDiff {
    pub index: usize,
    pub reference: char,
    pub verified: char,
    pub reference_context: String,
    pub verified_context: String,
}

/// Result of comparing the verified digits against the reference table.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReferenceOutcome {
    Match {
        places: usize,
    },
    Mismatch {
        /// None when one string is a prefix of the other.
        first_diff: Option<DigitDiff>,
        reference_len: usize,
        verified_len: usize,
    },
    Skipped {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    pub name: String,
    pub extracted: bool,
}

/// Machine-readable run summary for the --json output mode.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub target_places: usize,
    pub sources: Vec<SourceStatus>,
    pub cross_checked: bool,
    pub reference: ReferenceOutcome,
    pub decimals: String,
}
