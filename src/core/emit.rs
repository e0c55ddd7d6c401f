//! Rendering the ordered record set as a static C attribute table.
//!
//! The whole table is composed in memory and written atomically, so a fatal
//! error never leaves a truncated header behind. Rendering carries no
//! timestamps; re-running on an unchanged workbook is byte-identical.

use std::fmt::Display;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::core::record::CableRecord;

/// Boilerplate around the emitted table, configurable so the generated
/// header can drop into different consumer trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Comment lines placed at the very top (license, copyright).
    pub license_lines: Vec<String>,
    /// Include guard symbol.
    pub include_guard: String,
    /// Header defining the record struct and enum codes.
    pub include: String,
    /// C struct tag of one record.
    pub struct_name: String,
    /// Name of the emitted array.
    pub array_name: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            license_lines: vec!["SPDX-License-Identifier: GPL-2.0".to_string()],
            include_guard: "_CABLE_DB_H_".to_string(),
            include: "cable_attr.h".to_string(),
            struct_name: "cable_attr".to_string(),
            array_name: "cable_db".to_string(),
        }
    }
}

/// Render the complete header text for the given records. `sources` names
/// the worksheet(s) the records came from, for the provenance comments.
pub fn render(records: &[CableRecord], sources: &[String], opts: &EmitOptions) -> String {
    let mut out = String::new();

    for line in &opts.license_lines {
        out.push_str(&format!("/* {line} */\n"));
    }
    out.push('\n');

    out.push_str("/* This file is auto-generated and should not be modified */\n");
    for source in sources {
        out.push_str(&format!("/* source = {source} */\n"));
    }
    out.push('\n');

    out.push_str(&format!(
        "#ifndef {guard}\n#define {guard}\n\n",
        guard = opts.include_guard
    ));
    out.push_str(&format!("#include \"{}\"\n\n", opts.include));

    out.push_str(&format!(
        "static struct {} {}[] = {{\n",
        opts.struct_name, opts.array_name
    ));
    out.push_str(&records.iter().map(render_record).join(""));
    out.push_str("};\n\n");

    out.push_str(&format!("#endif /* {} */\n", opts.include_guard));

    out
}

fn render_record(record: &CableRecord) -> String {
    let mut block = String::new();
    block.push_str("\t{\n");

    attr(&mut block, "pn", record.part_number);
    attr(&mut block, "vendor", record.vendor.symbol());
    attr(&mut block, "type", record.cable_type.symbol());
    attr(&mut block, "shape", record.shape.symbol());
    attr(&mut block, "length_cm", record.length_cm);
    attr(&mut block, "vendor_pn", format_args!("\"{}\"", record.vendor_pn));
    attr(&mut block, "is_ss200", record.is_ss200);
    attr(&mut block, "max_speed", record.max_speed.symbol());
    attr(&mut block, "serdes.pre1", record.serdes.pre1);
    attr(&mut block, "serdes.pre2", record.serdes.pre2);
    attr(&mut block, "serdes.pre3", record.serdes.pre3);
    attr(&mut block, "serdes.cursor", record.serdes.cursor);
    attr(&mut block, "serdes.post1", record.serdes.post1);
    attr(&mut block, "serdes.post2", record.serdes.post2);
    attr(&mut block, "fw_ver.major", record.firmware.major);
    attr(&mut block, "fw_ver.minor", record.firmware.minor);
    attr(&mut block, "fw_ver.split_major", record.firmware.split_major);
    attr(&mut block, "fw_ver.split_minor", record.firmware.split_minor);

    block.push_str("\t},\n");
    block
}

fn attr(out: &mut String, name: &str, value: impl Display) {
    out.push_str(&format!("\t\t.{name:<24}= {value},\n"));
}

/// Write the rendered table, replacing `path` only once the full text is
/// on disk.
pub fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(text.as_bytes())
        .context("failed to write table text")?;
    tmp.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;

    Ok(())
}
