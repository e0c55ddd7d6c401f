//! Row classification: decides which physical rows represent emittable
//! cables.
//!
//! Exclusion is silent and is not an error; skipped rows are only counted
//! for the run summary.

use crate::core::labels::TRANSCEIVER_LABEL;
use crate::core::matcher::RawRow;
use crate::infra::layout::TransceiverPolicy;

/// Placeholder the matrix uses for unknown vendors and part numbers.
const UNKNOWN: &str = "?";

/// Why a row is left out of the emitted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Multi-port switch cable kits are not individually addressable cables.
    KitEntry,
    /// Vendor cell holds the unknown-vendor placeholder.
    UnknownVendor,
    /// Part number cell holds the unknown placeholder.
    UnknownPartNumber,
    /// Transceiver-only entry under an excluding policy.
    Transceiver,
}

/// Classification settings for one conversion run.
#[derive(Debug, Clone)]
pub struct ClassifyPolicy {
    /// Length-column labels marking kit rows. Compared verbatim, without
    /// trimming, as the matrix maintains them.
    pub kit_labels: Vec<String>,
    pub transceivers: TransceiverPolicy,
}

impl ClassifyPolicy {
    pub fn new(kit_labels: Vec<String>, transceivers: TransceiverPolicy) -> Self {
        Self { kit_labels, transceivers }
    }

    /// Kit labels as maintained in the compatibility matrix.
    pub fn default_kit_labels() -> Vec<String> {
        [
            "HPE Slingshot L1 1x16 Sw Cbl Kit Cray EX",
            "HPE Slingshot L1 2x16 Sw Cbl Kit Cray EX",
            "HPE Slingshot L1 1x32 Sw Cbl Kit Cray EX",
        ]
        .map(str::to_string)
        .to_vec()
    }
}

impl Default for ClassifyPolicy {
    fn default() -> Self {
        Self::new(Self::default_kit_labels(), TransceiverPolicy::Include)
    }
}

/// Decide whether a row is emittable. `None` means valid; `Some` names the
/// reason the row is dropped. Read-only, no side effects.
pub fn classify(row: &RawRow, policy: &ClassifyPolicy) -> Option<Exclusion> {
    if policy.kit_labels.iter().any(|label| *label == row.length) {
        return Some(Exclusion::KitEntry);
    }

    if row.vendor.trim() == UNKNOWN {
        return Some(Exclusion::UnknownVendor);
    }

    if policy.transceivers == TransceiverPolicy::Exclude
        && row.cable_type.trim() == TRANSCEIVER_LABEL
    {
        return Some(Exclusion::Transceiver);
    }

    if row.part_number.trim() == UNKNOWN {
        return Some(Exclusion::UnknownPartNumber);
    }

    None
}
