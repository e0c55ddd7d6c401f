//! Canonical part-number derivation.
//!
//! Part numbers are maintained as alphanumeric identifiers ("R1X2-123456");
//! the emitted table keys on the embedded digits parsed as one decimal
//! integer. Equal inputs modulo non-digit characters always collapse to the
//! same key.

use std::sync::LazyLock;

use regex::Regex;

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("literal character class"));

/// A part number with no parseable digits. Fatal: the source matrix has to
/// be corrected before any output can be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed part number {0:?}: no digits to parse")]
pub struct MalformedPartNumber(pub String);

/// Strip every non-digit character and parse the remainder as base-10.
pub fn canonical_part_number(raw: &str) -> Result<u64, MalformedPartNumber> {
    let digits = NON_DIGITS.replace_all(raw, "");

    digits
        .parse::<u64>()
        .map_err(|_| MalformedPartNumber(raw.trim().to_string()))
}
