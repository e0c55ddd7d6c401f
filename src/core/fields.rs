//! Derived field calculation: lengths, support flags, serdes presets, and
//! firmware versions.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::labels::TRANSCEIVER_LABEL;
use crate::core::record::{FirmwareVersion, SerdesSettings};

/// Vendor part numbers longer than this are replaced with a placeholder.
pub const VENDOR_PN_MAX: usize = 16;

static NON_MEASURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("literal character class"));

/// Field-derivation failures. All of these abort the run; the source matrix
/// has to be corrected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("malformed length {0:?}: no parseable measure")]
    MalformedLength(String),

    #[error("malformed firmware version field {0:?}: expected hex or N/A")]
    MalformedFirmwareVersion(String),
}

/// Length in centimeters. The sheet carries meters with unit suffixes and
/// stray whitespace; everything but digits and `.` is dropped before
/// parsing. Transceiver rows have no cable length and are fixed at zero.
pub fn length_cm(raw_type: &str, raw_length: &str) -> Result<u32, FieldError> {
    if raw_type.trim() == TRANSCEIVER_LABEL {
        return Ok(0);
    }

    let measure = NON_MEASURE.replace_all(raw_length, "");
    let meters: f64 = measure
        .parse()
        .map_err(|_| FieldError::MalformedLength(raw_length.trim().to_string()))?;

    Ok((meters * 100.0) as u32)
}

/// SS200 support flag: literal text equality after trimming.
pub fn is_ss200(raw: &str) -> bool {
    raw.trim() == "SS200"
}

/// Serdes preset keyed by the raw type text.
///
/// The grouping here is intentionally not the type-code mapping: only bare
/// "AOC" takes the optical preset, while "AOC-A"/"AOC-D" fall through to the
/// conservative one. Changing this grouping changes every emitted table.
pub fn serdes_preset(raw_type: &str) -> SerdesSettings {
    match raw_type.trim() {
        "DAC" | "PEC" => SerdesSettings::PASSIVE,
        "AEC" | TRANSCEIVER_LABEL => SerdesSettings::ACTIVE,
        "AOC" => SerdesSettings::OPTICAL,
        _ => SerdesSettings::CONSERVATIVE,
    }
}

/// One firmware version field: the sentinel -1 for absent/"None"/"N/A"
/// text, otherwise base-16.
pub fn firmware_field(raw: &str) -> Result<i32, FieldError> {
    let text = raw.trim();

    if text.is_empty() || text == "None" || text == "N/A" {
        return Ok(FirmwareVersion::UNSPECIFIED);
    }

    i32::from_str_radix(text, 16)
        .map_err(|_| FieldError::MalformedFirmwareVersion(text.to_string()))
}

/// All four firmware version fields of a row.
pub fn firmware_version(row: &crate::core::matcher::RawRow) -> Result<FirmwareVersion, FieldError> {
    Ok(FirmwareVersion {
        major: firmware_field(&row.fw_major)?,
        minor: firmware_field(&row.fw_minor)?,
        split_major: firmware_field(&row.fw_split_major)?,
        split_minor: firmware_field(&row.fw_split_minor)?,
    })
}

/// Vendor part number with all whitespace stripped. Oversized or untracked
/// values collapse to the "?" placeholder.
pub fn vendor_pn(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if stripped.is_empty() || stripped.chars().count() > VENDOR_PN_MAX {
        "?".to_string()
    } else {
        stripped
    }
}
