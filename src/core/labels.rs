//! Categorical label tables and the enumerated codes they map to.
//!
//! Every table is plain data: an ordered literal→code map with an `Invalid`
//! fallback. Lookups never fail; unmapped source text yields the fallback
//! code, which flags the record for manual review downstream.

use std::sync::LazyLock;

use indexmap::IndexMap;

/// Type-column literal for transceiver-only entries, which get special
/// handling in classification, length derivation, and serdes presets.
pub const TRANSCEIVER_LABEL: &str = "XCVR";

/// Ordered literal-to-code table with an invalid fallback.
///
/// Multiple literals may map to the same code (vendor names appear with
/// inconsistent casing in the source matrix). Lookups are case-sensitive
/// after trimming, matching how the matrix is actually maintained.
#[derive(Debug, Clone)]
pub struct LabelMap<T: Copy> {
    entries: IndexMap<&'static str, T>,
    fallback: T,
}

impl<T: Copy> LabelMap<T> {
    pub fn new(entries: &[(&'static str, T)], fallback: T) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
            fallback,
        }
    }

    /// Trim and look up; unmapped text yields the fallback code.
    pub fn map(&self, raw: &str) -> T {
        self.entries
            .get(raw.trim())
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Recognized literals, in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

/// Cable vendor code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Te,
    Bizlink,
    Hisense,
    Finisar,
    CloudLight,
    Molex,
    Invalid,
}

impl Vendor {
    /// C symbol rendered into the emitted table.
    pub fn symbol(self) -> &'static str {
        match self {
            Vendor::Te => "CABLE_VENDOR_TE",
            Vendor::Bizlink => "CABLE_VENDOR_BIZLINK",
            Vendor::Hisense => "CABLE_VENDOR_HISENSE",
            Vendor::Finisar => "CABLE_VENDOR_FINISAR",
            Vendor::CloudLight => "CABLE_VENDOR_CLOUD_LIGHT",
            Vendor::Molex => "CABLE_VENDOR_MOLEX",
            Vendor::Invalid => "CABLE_VENDOR_INVALID",
        }
    }

    pub fn is_invalid(self) -> bool {
        self == Vendor::Invalid
    }
}

pub static VENDOR_LABELS: LazyLock<LabelMap<Vendor>> = LazyLock::new(|| {
    LabelMap::new(
        &[
            ("TE", Vendor::Te),
            ("Bizlink", Vendor::Bizlink),
            ("BizLink", Vendor::Bizlink),
            ("Hisense", Vendor::Hisense),
            ("Coherent (Finisar II-VI)", Vendor::Finisar),
            ("Cloud Light", Vendor::CloudLight),
            ("Molex", Vendor::Molex),
        ],
        Vendor::Invalid,
    )
});

/// Cable construction type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CableType {
    /// Passive electrical (direct-attach copper)
    Pec,
    /// Active optical
    Aoc,
    /// Passive optical / transceiver-terminated
    Poc,
    /// Active electrical
    Aec,
    Invalid,
}

impl CableType {
    pub fn symbol(self) -> &'static str {
        match self {
            CableType::Pec => "CABLE_TYPE_PEC",
            CableType::Aoc => "CABLE_TYPE_AOC",
            CableType::Poc => "CABLE_TYPE_POC",
            CableType::Aec => "CABLE_TYPE_AEC",
            CableType::Invalid => "CABLE_TYPE_INVALID",
        }
    }

    pub fn is_invalid(self) -> bool {
        self == CableType::Invalid
    }
}

pub static TYPE_LABELS: LazyLock<LabelMap<CableType>> = LazyLock::new(|| {
    LabelMap::new(
        &[
            ("DAC", CableType::Pec),
            ("PEC", CableType::Pec),
            ("AOC-A", CableType::Aoc),
            ("AOC-D", CableType::Aoc),
            ("AOC", CableType::Aoc),
            ("POF", CableType::Poc),
            (TRANSCEIVER_LABEL, CableType::Poc),
            ("AEC", CableType::Aec),
        ],
        CableType::Invalid,
    )
});

/// Cable shape code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Straight,
    Splitter,
    Bifurcated,
    Invalid,
}

impl Shape {
    pub fn symbol(self) -> &'static str {
        match self {
            Shape::Straight => "CABLE_SHAPE_STRAIGHT",
            Shape::Splitter => "CABLE_SHAPE_SPLITTER",
            Shape::Bifurcated => "CABLE_SHAPE_BIFURCATED",
            Shape::Invalid => "CABLE_SHAPE_INVALID",
        }
    }

    pub fn is_invalid(self) -> bool {
        self == Shape::Invalid
    }
}

pub static SHAPE_LABELS: LazyLock<LabelMap<Shape>> = LazyLock::new(|| {
    LabelMap::new(
        &[
            ("Straight", Shape::Straight),
            ("Splitter (Y)", Shape::Splitter),
            ("Bifurcated (H)", Shape::Bifurcated),
        ],
        Shape::Invalid,
    )
});

/// Maximum supported link speed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speed {
    G200,
    G400,
    G800,
    Invalid,
}

impl Speed {
    pub fn symbol(self) -> &'static str {
        match self {
            Speed::G200 => "CABLE_SPEED_200G",
            Speed::G400 => "CABLE_SPEED_400G",
            Speed::G800 => "CABLE_SPEED_800G",
            Speed::Invalid => "CABLE_SPEED_INVALID",
        }
    }

    pub fn is_invalid(self) -> bool {
        self == Speed::Invalid
    }
}

pub static SPEED_LABELS: LazyLock<LabelMap<Speed>> = LazyLock::new(|| {
    LabelMap::new(
        &[
            ("200G E", Speed::G200),
            ("200Gb", Speed::G200),
            ("400G E", Speed::G400),
            ("400Gb", Speed::G400),
            ("800Gb", Speed::G800),
        ],
        Speed::Invalid,
    )
});
