//! Worksheet grid sources.
//!
//! The conversion core only ever sees [`SheetRows`]: a rectangular grid of
//! cell text addressed 1-indexed like the source worksheet. Workbook format
//! handling stays behind the [`GridSource`] seam, with calamine for real
//! workbooks and [`MemoryGrid`] for tests.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx, open_workbook};
use indexmap::IndexMap;

/// Cell grid for one named worksheet.
#[derive(Debug, Clone)]
pub struct SheetRows {
    name: String,
    rows: Vec<Vec<String>>,
}

impl SheetRows {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self { name: name.into(), rows }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text at 1-indexed (row, column). Blank cells and out-of-range
    /// addresses read as empty text.
    pub fn cell(&self, row: u32, col: u32) -> &str {
        if row == 0 || col == 0 {
            return "";
        }

        self.rows
            .get(row as usize - 1)
            .and_then(|cells| cells.get(col as usize - 1))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Source of worksheet grids.
pub trait GridSource {
    fn sheet(&mut self, name: &str) -> Result<SheetRows>;
}

/// Workbook-backed grid source (.xlsx/.xlsm via calamine).
pub struct WorkbookGrid {
    path: PathBuf,
    workbook: Xlsx<BufReader<File>>,
}

impl WorkbookGrid {
    pub fn open(path: &Path) -> Result<Self> {
        let workbook: Xlsx<_> = open_workbook(path)
            .with_context(|| format!("failed to open workbook {}", path.display()))?;

        Ok(Self { path: path.to_path_buf(), workbook })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }
}

impl GridSource for WorkbookGrid {
    fn sheet(&mut self, name: &str) -> Result<SheetRows> {
        let names = self.sheet_names();
        let range = self.workbook.worksheet_range(name).with_context(|| {
            format!(
                "workbook {} has no sheet {name:?} (sheets: {})",
                self.path.display(),
                names.join(", ")
            )
        })?;

        // calamine ranges start at the first used cell, not A1; pad the
        // leading rows/columns back in so addressing stays 1-indexed.
        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset as usize];

        for cells in range.rows() {
            let mut row = vec![String::new(); col_offset as usize];
            row.extend(cells.iter().map(cell_text));
            rows.push(row);
        }

        Ok(SheetRows::new(name, rows))
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Part-number and version columns read as numbers when the sheet
        // forgets text formatting; render whole floats without ".0".
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// In-memory grid source for tests and programmatic callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    sheets: IndexMap<String, Vec<Vec<String>>>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: &str, rows: Vec<Vec<String>>) -> Self {
        self.sheets.insert(name.to_string(), rows);
        self
    }
}

impl GridSource for MemoryGrid {
    fn sheet(&mut self, name: &str) -> Result<SheetRows> {
        let Some(rows) = self.sheets.get(name) else {
            bail!(
                "no sheet {name:?} (sheets: {})",
                self.sheets.keys().cloned().collect::<Vec<_>>().join(", ")
            );
        };

        Ok(SheetRows::new(name, rows.clone()))
    }
}
