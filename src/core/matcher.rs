//! The working sheet snapshot and the ordering/consuming matcher.
//!
//! The matrix may contain several physical rows that canonicalize to the
//! same numeric part number (vendor or length variants sharing a nominal
//! PN). Emission must be sorted ascending by canonical part number while
//! rows sharing one keep their original top-to-bottom order. The matcher
//! gets both by sorting the key list and then consuming rows: each matched
//! row is removed, so the i-th lookup of a duplicated key always lands on
//! the i-th surviving row carrying it.

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::classify::{ClassifyPolicy, classify};
use crate::core::partnum::canonical_part_number;
use crate::infra::grid::SheetRows;
use crate::infra::layout::ColumnLayout;

/// One worksheet row resolved through the active column layout. Fields the
/// layout does not carry resolve to empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based row in the source sheet, for diagnostics.
    pub sheet_row: u32,
    pub part_number: String,
    pub vendor: String,
    pub cable_type: String,
    pub shape: String,
    pub length: String,
    pub speed: String,
    pub ss200: String,
    pub vendor_pn: String,
    pub fw_major: String,
    pub fw_minor: String,
    pub fw_split_major: String,
    pub fw_split_minor: String,
}

impl RawRow {
    fn from_sheet(sheet: &SheetRows, row: u32, layout: &ColumnLayout) -> Self {
        let cell = |col: u32| sheet.cell(row, col).to_string();
        let optional = |col: Option<u32>| col.map(&cell).unwrap_or_default();

        Self {
            sheet_row: row,
            part_number: cell(layout.part_number),
            vendor: cell(layout.vendor),
            cable_type: cell(layout.cable_type),
            shape: cell(layout.shape),
            length: cell(layout.length),
            speed: optional(layout.speed),
            ss200: optional(layout.ss200),
            vendor_pn: optional(layout.vendor_pn),
            fw_major: optional(layout.fw_major),
            fw_minor: optional(layout.fw_minor),
            fw_split_major: optional(layout.fw_split_major),
            fw_split_minor: optional(layout.fw_split_minor),
        }
    }
}

/// Pass 2 found no remaining row for a key pass 1 counted. Only reachable
/// if the two passes observe different classifier decisions, which is an
/// internal bug, never a data problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no remaining row in sheet {sheet:?} matches part number {key}")]
pub struct MatcherInconsistency {
    pub sheet: String,
    pub key: u64,
}

/// Mutable ordered snapshot of one sheet's cable rows.
///
/// There is exactly one mutator: matched rows are removed, at most once
/// each, and removal never reorders the remainder.
#[derive(Debug, Clone)]
pub struct WorkingSheet {
    name: String,
    rows: Vec<RawRow>,
}

impl WorkingSheet {
    /// Snapshot the cable rows of a sheet: row 2 downward (row 1 is the
    /// header), ending at the first empty part-number cell.
    pub fn snapshot(sheet: &SheetRows, layout: &ColumnLayout) -> Self {
        let mut rows = Vec::new();
        let mut row = 2;

        while !sheet.cell(row, layout.part_number).is_empty() {
            rows.push(RawRow::from_sheet(sheet, row, layout));
            row += 1;
        }

        Self { name: sheet.name().to_string(), rows }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Pass 1: canonical keys of every valid row, in sheet order.
    /// Duplicates are kept; there is exactly one entry per valid row.
    pub fn part_numbers(&self, policy: &ClassifyPolicy) -> Result<Vec<u64>> {
        let mut keys = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            if classify(row, policy).is_some() {
                continue;
            }

            let key = canonical_part_number(&row.part_number)
                .with_context(|| format!("sheet {:?} row {}", self.name, row.sheet_row))?;
            keys.push(key);
        }

        Ok(keys)
    }

    /// Pass 2 step: consume the topmost remaining valid row whose canonical
    /// part number equals `key`. Removal is permanent; a consumed row can
    /// never satisfy a later lookup.
    pub fn take_match(&mut self, key: u64, policy: &ClassifyPolicy) -> Result<RawRow> {
        for (idx, row) in self.rows.iter().enumerate() {
            if classify(row, policy).is_some() {
                continue;
            }

            let candidate = canonical_part_number(&row.part_number)
                .with_context(|| format!("sheet {:?} row {}", self.name, row.sheet_row))?;

            if candidate == key {
                return Ok(self.rows.remove(idx));
            }
        }

        Err(MatcherInconsistency { sheet: self.name.clone(), key }.into())
    }

    /// Full ordering pass: collect keys, sort ascending, then pair each key
    /// with a consumed row. The sort is stable, so equal keys stay in sheet
    /// order and the consuming match pairs them with their own rows.
    pub fn into_emission_order(mut self, policy: &ClassifyPolicy) -> Result<Vec<(u64, RawRow)>> {
        let mut keys = self.part_numbers(policy)?;
        keys.sort();

        debug!(sheet = %self.name, rows = self.rows.len(), valid = keys.len(), "collected part numbers");

        let mut ordered = Vec::with_capacity(keys.len());

        for key in keys {
            let row = self.take_match(key, policy)?;
            ordered.push((key, row));
        }

        Ok(ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::layout::TransceiverPolicy;

    fn layout() -> ColumnLayout {
        ColumnLayout::builtin("r4").expect("builtin layout")
    }

    fn sheet(rows: &[&[&str]]) -> SheetRows {
        let cells = rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        SheetRows::new("test", cells)
    }

    /// Row with the r4 column positions filled (1-indexed: pn=1, ss200=4,
    /// shape=5, type=6, vendor=7, length=10, speed=11).
    fn cable(pn: &'static str, vendor: &'static str, length: &'static str) -> Vec<&'static str> {
        vec![pn, "", "", "", "Straight", "DAC", vendor, "", "", length, "200Gb"]
    }

    #[test]
    fn snapshot_ends_at_first_empty_part_number() {
        let grid = sheet(&[
            &["HPE PN"],
            &cable("A-1", "TE", "1M"),
            &cable("A-2", "TE", "1M"),
            &[""],
            &cable("A-3", "TE", "1M"),
        ]);

        let working = WorkingSheet::snapshot(&grid, &layout());

        assert_eq!(working.len(), 2);
        assert_eq!(working.rows()[0].part_number, "A-1");
        assert_eq!(working.rows()[1].sheet_row, 3);
    }

    #[test]
    fn duplicate_keys_pair_with_rows_in_sheet_order() {
        // "A-100" (row 3) and "B-100" (row 7) share canonical key 100.
        let grid = sheet(&[
            &["HPE PN"],
            &cable("C-500", "TE", "1M"),
            &cable("A-100", "Hisense", "2M"),
            &cable("D-300", "TE", "1M"),
            &cable("E-200", "TE", "1M"),
            &cable("F-400", "TE", "1M"),
            &cable("B-100", "Molex", "3M"),
        ]);

        let working = WorkingSheet::snapshot(&grid, &layout());
        let ordered = working
            .into_emission_order(&ClassifyPolicy::default())
            .expect("consistent sheet");

        let keys: Vec<u64> = ordered.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![100, 100, 200, 300, 400, 500]);

        // First 100 takes row 3's data, second takes row 7's.
        assert_eq!(ordered[0].1.vendor, "Hisense");
        assert_eq!(ordered[0].1.sheet_row, 3);
        assert_eq!(ordered[1].1.vendor, "Molex");
        assert_eq!(ordered[1].1.sheet_row, 7);
    }

    #[test]
    fn excluded_rows_produce_no_keys_and_are_never_matched() {
        let grid = sheet(&[
            &["HPE PN"],
            &cable("A-2", "?", "1M"),
            &cable("A-1", "TE", "1M"),
            &cable("?", "TE", "1M"),
        ]);

        let working = WorkingSheet::snapshot(&grid, &layout());
        let ordered = working
            .into_emission_order(&ClassifyPolicy::default())
            .expect("consistent sheet");

        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].0, 1);
    }

    #[test]
    fn malformed_part_number_is_fatal_with_row_context() {
        let grid = sheet(&[&["HPE PN"], &cable("????", "TE", "1M")]);

        let working = WorkingSheet::snapshot(&grid, &layout());
        let err = working
            .into_emission_order(&ClassifyPolicy::default())
            .expect_err("no digits");

        let chain = format!("{err:#}");
        assert!(chain.contains("row 2"), "missing row context: {chain}");
        assert!(chain.contains("malformed part number"), "missing cause: {chain}");
    }

    #[test]
    fn take_match_for_unknown_key_reports_inconsistency() {
        let grid = sheet(&[&["HPE PN"], &cable("A-1", "TE", "1M")]);
        let policy = ClassifyPolicy::new(
            ClassifyPolicy::default_kit_labels(),
            TransceiverPolicy::Include,
        );

        let mut working = WorkingSheet::snapshot(&grid, &layout());
        let err = working.take_match(999, &policy).expect_err("no such key");

        assert!(err.downcast_ref::<MatcherInconsistency>().is_some());
    }
}
