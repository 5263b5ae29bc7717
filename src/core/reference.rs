use crate::core::extract::extract_digits;
use crate::domain::model::{DigitDiff, ReferenceOutcome};
use crate::utils::error::Result;
use regex::Regex;
use std::fs;

/// Number of characters shown on either side of a divergence.
const CONTEXT_WINDOW: usize = 10;

/// Pull the digit string out of a `PI_DECIMALS` table declaration.
///
/// Matches `pub const PI_DECIMALS: [u8; 10_000] = [1, 4, 1, ...];` and
/// flattens the array body to its digits, ignoring commas and whitespace.
/// Returns `Ok(None)` when the declaration is absent.
pub fn parse_reference_table(content: &str) -> Result<Option<String>> {
    let decl = Regex::new(r"pub const PI_DECIMALS:\s*\[u8;\s*[\d_]+\]\s*=\s*\[([\d,\s]+)\];")?;
    Ok(decl
        .captures(content)
        .map(|caps| extract_digits(&caps[1])))
}

/// Character-for-character comparison of the reference table against the
/// verified digits.
pub fn compare_reference(reference: &str, verified: &str) -> ReferenceOutcome {
    if reference == verified {
        return ReferenceOutcome::Match {
            places: verified.len(),
        };
    }

    let first_diff = reference
        .chars()
        .zip(verified.chars())
        .enumerate()
        .find(|(_, (a, b))| a != b)
        .map(|(index, (r, v))| {
            let lo = index.saturating_sub(CONTEXT_WINDOW);
            let ref_hi = (index + CONTEXT_WINDOW).min(reference.len());
            let ver_hi = (index + CONTEXT_WINDOW).min(verified.len());
            DigitDiff {
                index,
                reference: r,
                verified: v,
                reference_context: reference[lo..ref_hi].to_string(),
                verified_context: verified[lo..ver_hi].to_string(),
            }
        });

    ReferenceOutcome::Mismatch {
        first_diff,
        reference_len: reference.len(),
        verified_len: verified.len(),
    }
}

/// Compare the verified digits against the digit table in `path`.
///
/// A missing file or an unrecognized file layout skips the comparison with
/// a note; only an actual digit divergence produces a mismatch. Never
/// fatal either way.
pub fn verify_reference_file(path: &str, verified: &str) -> ReferenceOutcome {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return ReferenceOutcome::Skipped {
                reason: format!("reference file {} not readable: {}", path, e),
            }
        }
    };

    match parse_reference_table(&content) {
        Ok(Some(reference)) => compare_reference(&reference, verified),
        Ok(None) => ReferenceOutcome::Skipped {
            reason: format!("no PI_DECIMALS declaration found in {}", path),
        },
        Err(e) => ReferenceOutcome::Skipped {
            reason: format!("failed to parse {}: {}", path, e),
        },
    }
}
