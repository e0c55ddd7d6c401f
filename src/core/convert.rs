//! The sheet-to-table conversion pipeline.
//!
//! Wires the grid source, classifier, matcher, field derivation, and
//! emitter together for one `cablegen convert` invocation. The pipeline is
//! synchronous and single-pass; any fatal error aborts before the output
//! file is touched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{AppContext, ConvertArgs};
use crate::core::classify::ClassifyPolicy;
use crate::core::emit;
use crate::core::matcher::WorkingSheet;
use crate::core::record::CableRecord;
use crate::infra::config::load_config;
use crate::infra::grid::{GridSource, WorkbookGrid};
use crate::infra::layout::{self, ColumnLayout};

/// Per-sheet conversion counts.
#[derive(Debug, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
    pub records: usize,
    pub skipped: usize,
}

/// Whole-run summary, printed as text or single-line JSON.
#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub sheets: Vec<SheetSummary>,
    pub records: usize,
    pub skipped: usize,
    pub invalid_fields: usize,
    pub output: String,
}

/// Convert the named sheets of a grid into emission-ordered records.
///
/// Records are grouped per sheet, each group sorted ascending by canonical
/// part number with duplicate keys kept in sheet order.
pub fn convert_sheets(
    grid: &mut dyn GridSource,
    sheets: &[String],
    layout: &ColumnLayout,
    policy: &ClassifyPolicy,
) -> Result<(Vec<CableRecord>, Summary)> {
    let mut records = Vec::new();
    let mut summary = Summary::default();

    for name in sheets {
        let sheet = grid.sheet(name)?;
        let working = WorkingSheet::snapshot(&sheet, layout);
        let rows = working.len();

        let ordered = working.into_emission_order(policy)?;
        debug!(sheet = %name, rows, emitted = ordered.len(), "matched sheet");

        for (key, row) in &ordered {
            let record = CableRecord::from_row(row, *key)
                .with_context(|| format!("sheet {name:?} row {}", row.sheet_row))?;
            summary.invalid_fields += record.invalid_field_count();
            records.push(record);
        }

        summary.sheets.push(SheetSummary {
            name: name.clone(),
            rows,
            records: ordered.len(),
            skipped: rows - ordered.len(),
        });
    }

    summary.records = records.len();
    summary.skipped = summary.sheets.iter().map(|sheet| sheet.skipped).sum();

    Ok((records, summary))
}

/// `cablegen convert`: workbook in, attribute table header out.
pub fn run(args: ConvertArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config()?;

    let workbook = expand_path(&args.workbook)?;
    let output = expand_path(args.output.as_ref().unwrap_or(&config.output))?;

    let sheets = if args.sheets.is_empty() { config.sheets.clone() } else { args.sheets.clone() };
    if sheets.is_empty() {
        bail!("no sheets to convert: pass --sheet or list sheets in cablegen.toml");
    }

    let layout_name = args.layout.as_deref().unwrap_or(&config.layout);
    let layout = layout::resolve(layout_name, &config.layouts)?;

    let transceivers = args
        .transceivers
        .or(config.transceivers)
        .unwrap_or(layout.transceivers);
    let policy = ClassifyPolicy::new(config.kit_labels.clone(), transceivers);

    info!(
        workbook = %workbook.display(),
        layout = %layout.name,
        transceivers = ?transceivers,
        "converting"
    );

    let mut grid = WorkbookGrid::open(&workbook)?;
    let (records, mut summary) = convert_sheets(&mut grid, &sheets, &layout, &policy)?;
    summary.output = output.display().to_string();

    let text = emit::render(&records, &sheets, &config.emit);

    if !ctx.dry_run {
        emit::write_atomic(&output, &text)?;
    }

    report(&summary, args.json, ctx);
    Ok(())
}

fn report(summary: &Summary, json: bool, ctx: &AppContext) {
    if json {
        // Serialization of plain counts and strings cannot fail.
        if let Ok(line) = serde_json::to_string(summary) {
            println!("{line}");
        }
        return;
    }

    if ctx.quiet {
        return;
    }

    for sheet in &summary.sheets {
        let label = format!("Convert: {}", sheet.name);
        let counts = format!("({} cables, {} skipped)", sheet.records, sheet.skipped);

        if ctx.no_color {
            println!("{label} {counts}");
        } else {
            println!("{} {counts}", label.green());
        }
    }

    let action = if ctx.dry_run { "Would write" } else { "Wrote" };
    println!("{action} {} records to {}", summary.records, summary.output);

    if summary.invalid_fields > 0 {
        let warning = format!(
            "{} field(s) mapped to an INVALID code; review the source matrix",
            summary.invalid_fields
        );

        if ctx.no_color {
            println!("{warning}");
        } else {
            println!("{}", warning.yellow());
        }
    }
}

fn expand_path(path: &Path) -> Result<PathBuf> {
    let text = path
        .to_str()
        .with_context(|| format!("path {} is not valid UTF-8", path.display()))?;
    let expanded = shellexpand::full(text)
        .with_context(|| format!("failed to expand path {text}"))?;

    Ok(PathBuf::from(expanded.into_owned()))
}
