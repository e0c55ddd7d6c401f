//! Declarative column layouts for the matrix schema revisions.
//!
//! The compatibility matrix has been through several incompatible column
//! arrangements. Rather than hard-coding column indices, the conversion
//! core addresses named fields through a [`ColumnLayout`] descriptor; one
//! built-in descriptor exists per known revision, and custom descriptors
//! can be supplied through the config file.

use anyhow::{Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

use crate::cli::{AppContext, LayoutsArgs};

/// Policy for transceiver-only ("XCVR") rows. The matrix revisions treated
/// them inconsistently, so the choice is explicit per layout and
/// overridable per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TransceiverPolicy {
    /// Drop XCVR rows during classification.
    Exclude,
    /// Keep XCVR rows: zero length, AEC serdes preset.
    Include,
}

/// Field-to-column assignments for one schema revision. Columns are
/// 1-indexed as in the worksheet; `None` means the revision does not carry
/// the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub name: String,
    pub part_number: u32,
    pub shape: u32,
    pub cable_type: u32,
    pub vendor: u32,
    pub length: u32,
    #[serde(default)]
    pub ss200: Option<u32>,
    #[serde(default)]
    pub speed: Option<u32>,
    #[serde(default)]
    pub vendor_pn: Option<u32>,
    #[serde(default)]
    pub fw_major: Option<u32>,
    #[serde(default)]
    pub fw_minor: Option<u32>,
    #[serde(default)]
    pub fw_split_major: Option<u32>,
    #[serde(default)]
    pub fw_split_minor: Option<u32>,
    /// Default transceiver policy for this revision.
    pub transceivers: TransceiverPolicy,
}

impl ColumnLayout {
    /// All built-in revisions, oldest first.
    pub fn builtins() -> Vec<Self> {
        vec![
            // Earliest list: no SS200 flag, no speed, no firmware columns.
            Self {
                name: "r1".to_string(),
                part_number: 1,
                shape: 4,
                cable_type: 5,
                vendor: 6,
                length: 8,
                ss200: None,
                speed: None,
                vendor_pn: None,
                fw_major: None,
                fw_minor: None,
                fw_split_major: None,
                fw_split_minor: None,
                transceivers: TransceiverPolicy::Exclude,
            },
            // Adds vendor part numbers and a speed column.
            Self {
                name: "r2".to_string(),
                part_number: 1,
                shape: 4,
                cable_type: 5,
                vendor: 6,
                length: 8,
                ss200: None,
                speed: Some(10),
                vendor_pn: Some(9),
                fw_major: None,
                fw_minor: None,
                fw_split_major: None,
                fw_split_minor: None,
                transceivers: TransceiverPolicy::Exclude,
            },
            // Adds the SS200 flag and firmware version columns; transceiver
            // rows start being kept.
            Self {
                name: "r3".to_string(),
                part_number: 1,
                shape: 5,
                cable_type: 6,
                vendor: 7,
                length: 10,
                ss200: Some(4),
                speed: Some(11),
                vendor_pn: Some(13),
                fw_major: Some(17),
                fw_minor: Some(18),
                fw_split_major: Some(19),
                fw_split_minor: Some(20),
                transceivers: TransceiverPolicy::Include,
            },
            // Current revision: vendor part numbers are no longer tracked.
            Self {
                name: "r4".to_string(),
                part_number: 1,
                shape: 5,
                cable_type: 6,
                vendor: 7,
                length: 10,
                ss200: Some(4),
                speed: Some(11),
                vendor_pn: None,
                fw_major: Some(17),
                fw_minor: Some(18),
                fw_split_major: Some(19),
                fw_split_minor: Some(20),
                transceivers: TransceiverPolicy::Include,
            },
        ]
    }

    /// Look up a built-in revision by name.
    pub fn builtin(name: &str) -> Option<Self> {
        Self::builtins().into_iter().find(|layout| layout.name == name)
    }
}

#[derive(Tabled)]
struct LayoutRow {
    layout: String,
    pn: u32,
    shape: u32,
    #[tabled(rename = "type")]
    cable_type: u32,
    vendor: u32,
    length: u32,
    ss200: String,
    speed: String,
    vendor_pn: String,
    #[tabled(rename = "fw")]
    firmware: String,
    transceivers: String,
}

impl From<&ColumnLayout> for LayoutRow {
    fn from(layout: &ColumnLayout) -> Self {
        let col = |c: Option<u32>| c.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        let firmware = match (layout.fw_major, layout.fw_split_minor) {
            (Some(lo), Some(hi)) => format!("{lo}-{hi}"),
            _ => "-".to_string(),
        };
        let transceivers = match layout.transceivers {
            TransceiverPolicy::Exclude => "exclude".to_string(),
            TransceiverPolicy::Include => "include".to_string(),
        };

        Self {
            layout: layout.name.clone(),
            pn: layout.part_number,
            shape: layout.shape,
            cable_type: layout.cable_type,
            vendor: layout.vendor,
            length: layout.length,
            ss200: col(layout.ss200),
            speed: col(layout.speed),
            vendor_pn: col(layout.vendor_pn),
            firmware,
            transceivers,
        }
    }
}

/// `cablegen layouts`: list the built-in revisions.
pub fn list(args: LayoutsArgs, ctx: &AppContext) -> Result<()> {
    let layouts = ColumnLayout::builtins();

    if args.json {
        println!("{}", serde_json::to_string(&layouts)?);
        return Ok(());
    }

    let rows: Vec<LayoutRow> = layouts.iter().map(LayoutRow::from).collect();
    println!("{}", Table::new(rows));

    if !ctx.quiet {
        println!("\nColumns are 1-indexed worksheet positions; - means the revision lacks the field.");
    }

    Ok(())
}

/// Resolve a layout by name: built-ins first, then custom layouts from the
/// config file.
pub fn resolve(name: &str, custom: &[ColumnLayout]) -> Result<ColumnLayout> {
    if let Some(layout) = custom.iter().find(|layout| layout.name == name) {
        return Ok(layout.clone());
    }

    if let Some(layout) = ColumnLayout::builtin(name) {
        return Ok(layout);
    }

    let known: Vec<String> = ColumnLayout::builtins()
        .into_iter()
        .map(|layout| layout.name)
        .chain(custom.iter().map(|layout| layout.name.clone()))
        .collect();
    bail!("unknown layout {name:?} (known: {})", known.join(", "));
}
