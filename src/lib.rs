//! **cablegen** - Convert cable compatibility workbooks into static cable attribute tables
//!
//! Deterministic sorted emission with consuming duplicate resolution, declarative
//! column layouts across matrix schema revisions, and atomic header output.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core conversion pipeline - classification, matching, field derivation, emission
pub mod core {
    /// Row classification (kit entries, placeholder vendors and part numbers)
    pub mod classify;
    pub use classify::{ClassifyPolicy, Exclusion, classify};

    /// Canonical part-number derivation
    pub mod partnum;
    pub use partnum::{MalformedPartNumber, canonical_part_number};

    /// Working sheet snapshot and the ordering/consuming matcher
    pub mod matcher;
    pub use matcher::{MatcherInconsistency, RawRow, WorkingSheet};

    /// Categorical label tables and enumerated codes
    pub mod labels;

    /// Derived field calculation (lengths, serdes presets, firmware versions)
    pub mod fields;

    /// Emitted record types
    pub mod record;
    pub use record::{CableRecord, FirmwareVersion, SerdesSettings};

    /// Header rendering and atomic output
    pub mod emit;
    pub use emit::EmitOptions;

    /// Sheet-to-table conversion pipeline
    pub mod convert;
    pub use convert::run as convert_run;
}

/// Infrastructure - configuration, workbook input, column layouts
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Worksheet grid sources (calamine workbooks, in-memory tests)
    pub mod grid;
    pub use grid::{GridSource, MemoryGrid, SheetRows, WorkbookGrid};

    /// Declarative column layout descriptors per schema revision
    pub mod layout;
    pub use layout::{ColumnLayout, TransceiverPolicy};
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use core::convert_run;
pub use infra::{Config, load_config};

// Core types for external consumers
pub use core::labels::{CableType, Shape, Speed, Vendor};
pub use core::{CableRecord, FirmwareVersion, RawRow, SerdesSettings, WorkingSheet};
pub use infra::{ColumnLayout, GridSource, MemoryGrid, TransceiverPolicy, WorkbookGrid};
