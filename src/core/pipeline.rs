use crate::core::{extract, reference, verify};
use crate::domain::model::{
    RawSource, ReferenceOutcome, SourceResult, SourceStatus, VerifiedDigits, VerifyReport,
};
use crate::domain::ports::{ConfigProvider, Fetcher, Pipeline};
use crate::utils::error::Result;

/// The fetch → extract/cross-verify → report pipeline.
pub struct VerifyPipeline<F: Fetcher, C: ConfigProvider> {
    fetcher: F,
    config: C,
}

impl<F: Fetcher, C: ConfigProvider> VerifyPipeline<F, C> {
    pub fn new(fetcher: F, config: C) -> Self {
        Self { fetcher, config }
    }

    fn log_reference_outcome(outcome: &ReferenceOutcome) {
        match outcome {
            ReferenceOutcome::Match { places } => {
                tracing::info!("reference table matches the verified digits ({} places)", places);
            }
            ReferenceOutcome::Mismatch {
                first_diff,
                reference_len,
                verified_len,
            } => {
                tracing::warn!("reference table DIFFERS from the verified digits");
                if let Some(diff) = first_diff {
                    tracing::warn!(
                        "first difference at position {}: {} vs {}",
                        diff.index,
                        diff.reference,
                        diff.verified
                    );
                    tracing::warn!("reference: ...{}...", diff.reference_context);
                    tracing::warn!("verified:  ...{}...", diff.verified_context);
                }
                if reference_len != verified_len {
                    tracing::warn!("length difference: {} vs {}", reference_len, verified_len);
                }
            }
            ReferenceOutcome::Skipped { reason } => {
                tracing::info!("reference comparison skipped: {}", reason);
            }
        }
    }
}

#[async_trait::async_trait]
impl<F: Fetcher, C: ConfigProvider> Pipeline for VerifyPipeline<F, C> {
    /// Fetch every configured source. A download failure is logged and the
    /// source carried forward with an absent body; the run continues.
    async fn extract(&self) -> Result<Vec<RawSource>> {
        let mut raw = Vec::new();

        for spec in self.config.sources() {
            tracing::info!("fetching {} ({})", spec.name, spec.url);
            let content = match self.fetcher.fetch(&spec.url).await {
                Ok(content) => Some(content),
                Err(e) => {
                    tracing::error!("failed to download {}: {}", spec.name, e);
                    None
                }
            };
            raw.push(RawSource { spec, content });
        }

        Ok(raw)
    }

    /// Run each source's parser over its fetched body, then cross-verify
    /// the surviving extractions.
    async fn transform(&self, data: Vec<RawSource>) -> Result<VerifiedDigits> {
        let places = self.config.target_places();
        let mut results = Vec::with_capacity(data.len());

        for raw in data {
            let decimals = match raw.content {
                Some(content) => {
                    let parsed = extract::parse_decimals(raw.spec.parser, &content, places)?;
                    match &parsed {
                        Some(decimals) => tracing::info!(
                            "{}: extracted {} decimal places",
                            raw.spec.name,
                            decimals.len()
                        ),
                        None => tracing::warn!(
                            "{}: failed to extract Pi digits from content",
                            raw.spec.name
                        ),
                    }
                    parsed
                }
                None => None,
            };
            results.push(SourceResult {
                name: raw.spec.name,
                decimals,
            });
        }

        let cross_checked = results.iter().filter(|r| r.decimals.is_some()).count() > 1;
        let decimals = verify::cross_verify(&results)?;

        Ok(VerifiedDigits {
            decimals,
            sources: results,
            cross_checked,
        })
    }

    /// Diff against the reference table if configured, print the report and
    /// emit the full digit string for downstream piping.
    async fn load(&self, result: VerifiedDigits) -> Result<String> {
        let places = result.decimals.len();

        let reference = match self.config.reference_path() {
            Some(path) => {
                tracing::info!("verifying reference table at {}", path);
                reference::verify_reference_file(path, &result.decimals)
            }
            None => ReferenceOutcome::Skipped {
                reason: "reference comparison disabled".to_string(),
            },
        };
        Self::log_reference_outcome(&reference);

        let preview = 100.min(places);
        println!();
        println!("Verified Pi decimals (first {}):", preview);
        println!("3.{}...", &result.decimals[..preview]);
        println!("Total decimal places: {}", places);

        if self.config.json_report() {
            let report = VerifyReport {
                target_places: self.config.target_places(),
                sources: result
                    .sources
                    .iter()
                    .map(|s| SourceStatus {
                        name: s.name.clone(),
                        extracted: s.decimals.is_some(),
                    })
                    .collect(),
                cross_checked: result.cross_checked,
                reference,
                decimals: result.decimals.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!();
            println!("Full output:");
            println!("{}", result.decimals);
        }

        let succeeded = result
            .sources
            .iter()
            .filter(|s| s.decimals.is_some())
            .count();
        Ok(format!(
            "{} decimal places verified from {} source(s)",
            places, succeeded
        ))
    }
}
