//! The emitted cable attribute record and its value types.

use crate::core::fields::{self, FieldError};
use crate::core::labels::{
    CableType, SHAPE_LABELS, SPEED_LABELS, Shape, Speed, TYPE_LABELS, VENDOR_LABELS, Vendor,
};
use crate::core::matcher::RawRow;

/// Serdes pre/post-emphasis taps and cursor for one cable category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerdesSettings {
    pub pre1: i32,
    pub pre2: i32,
    pub pre3: i32,
    pub cursor: i32,
    pub post1: i32,
    pub post2: i32,
}

impl SerdesSettings {
    /// Passive electrical cables (DAC/PEC).
    pub const PASSIVE: Self = Self { pre1: 0, pre2: 0, pre3: 0, cursor: 100, post1: 0, post2: 0 };

    /// Active electrical cables and transceivers (AEC/XCVR).
    pub const ACTIVE: Self = Self { pre1: -4, pre2: 0, pre3: 0, cursor: 98, post1: 0, post2: 0 };

    /// Active optical cables (bare "AOC" only; the -A/-D variants take the
    /// conservative preset).
    pub const OPTICAL: Self = Self { pre1: -12, pre2: 0, pre3: 0, cursor: 98, post1: -4, post2: 0 };

    /// Conservative fallback for unrecognized categories.
    pub const CONSERVATIVE: Self =
        Self { pre1: -20, pre2: 0, pre3: 0, cursor: 116, post1: 0, post2: 0 };
}

/// Cable firmware version fields. Each field is -1 when the source leaves
/// it unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub major: i32,
    pub minor: i32,
    pub split_major: i32,
    pub split_minor: i32,
}

impl FirmwareVersion {
    /// Sentinel for "not specified in source", distinct from any parsed value.
    pub const UNSPECIFIED: i32 = -1;

    pub const fn unspecified() -> Self {
        Self {
            major: Self::UNSPECIFIED,
            minor: Self::UNSPECIFIED,
            split_major: Self::UNSPECIFIED,
            split_minor: Self::UNSPECIFIED,
        }
    }
}

/// One entry of the emitted cable attribute table.
///
/// Built exactly once per matched row and never mutated afterwards;
/// ownership passes straight to the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CableRecord {
    pub part_number: u64,
    pub vendor: Vendor,
    pub cable_type: CableType,
    pub shape: Shape,
    pub length_cm: u32,
    pub vendor_pn: String,
    pub is_ss200: bool,
    pub max_speed: Speed,
    pub serdes: SerdesSettings,
    pub firmware: FirmwareVersion,
}

impl CableRecord {
    /// Derive the emitted record from a matched row. `key` is the row's
    /// canonical part number, already computed by the matcher.
    pub fn from_row(row: &RawRow, key: u64) -> Result<Self, FieldError> {
        Ok(Self {
            part_number: key,
            vendor: VENDOR_LABELS.map(&row.vendor),
            cable_type: TYPE_LABELS.map(&row.cable_type),
            shape: SHAPE_LABELS.map(&row.shape),
            length_cm: fields::length_cm(&row.cable_type, &row.length)?,
            vendor_pn: fields::vendor_pn(&row.vendor_pn),
            is_ss200: fields::is_ss200(&row.ss200),
            max_speed: SPEED_LABELS.map(&row.speed),
            serdes: fields::serdes_preset(&row.cable_type),
            firmware: fields::firmware_version(row)?,
        })
    }

    /// Number of categorical fields that fell back to an INVALID code.
    /// Surfaced in the run summary so operators know what to review.
    pub fn invalid_field_count(&self) -> usize {
        usize::from(self.vendor.is_invalid())
            + usize::from(self.cable_type.is_invalid())
            + usize::from(self.shape.is_invalid())
            + usize::from(self.max_speed.is_invalid())
    }
}
