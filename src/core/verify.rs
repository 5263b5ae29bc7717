use crate::domain::model::SourceResult;
use crate::utils::error::{Result, VerifyError};

/// Cross-check the extractions from all sources and return the agreed
/// decimal expansion.
///
/// Failed sources have already been logged and carry `None`; they are
/// skipped here. A single surviving source is accepted with a warning.
/// Any disagreement between two surviving sources fails the whole run.
pub fn cross_verify(results: &[SourceResult]) -> Result<String> {
    let valid: Vec<(&str, &str)> = results
        .iter()
        .filter_map(|r| r.decimals.as_deref().map(|d| (r.name.as_str(), d)))
        .collect();

    if valid.is_empty() {
        return Err(VerifyError::NoValidSources);
    }

    if valid.len() == 1 {
        tracing::warn!(
            "only one source ({}) available, cannot cross-verify",
            valid[0].0
        );
        return Ok(valid[0].1.to_string());
    }

    tracing::info!("comparing {} sources", valid.len());

    // Sanity pass: the parsers should only ever emit digits.
    for (name, decimals) in &valid {
        match decimals.chars().position(|c| !c.is_ascii_digit()) {
            Some(pos) => tracing::error!(
                "{}: contains a non-digit character at position {}",
                name,
                pos
            ),
            None => tracing::debug!("{}: all digits valid", name),
        }
    }

    for (name, decimals) in &valid {
        let len = decimals.len();
        tracing::info!(
            "{}: {} decimal places (first 20: {}, last 20: {})",
            name,
            len,
            &decimals[..20.min(len)],
            &decimals[len.saturating_sub(20)..]
        );
    }

    let (reference_name, reference_decimals) = valid[0];

    for (name, decimals) in &valid[1..] {
        if *decimals == reference_decimals {
            tracing::info!("{} matches {}", name, reference_name);
            continue;
        }

        tracing::error!("{} DIFFERS from {}", name, reference_name);
        if let Some((index, (left_digit, right_digit))) = reference_decimals
            .chars()
            .zip(decimals.chars())
            .enumerate()
            .find(|(_, (a, b))| a != b)
        {
            return Err(VerifyError::SourceMismatch {
                left: reference_name.to_string(),
                right: name.to_string(),
                index,
                left_digit,
                right_digit,
            });
        }

        // Equal over the common prefix, so the lengths must differ.
        return Err(VerifyError::SourceLengthMismatch {
            left: reference_name.to_string(),
            right: name.to_string(),
            left_len: reference_decimals.len(),
            right_len: decimals.len(),
        });
    }

    tracing::info!("all sources agree");
    Ok(reference_decimals.to_string())
}
