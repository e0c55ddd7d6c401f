//! Shared test utilities for integration tests
//!
//! Provides fixture workbook authoring for the r4 column layout so CLI
//! tests can drive the binary against real xlsx input.

use std::path::Path;

use rust_xlsxwriter::Workbook;

/// One fixture row in the r4 layout. Empty fields stay blank cells.
#[derive(Clone)]
pub struct MatrixRow
{
    pub pn: &'static str,
    pub ss200: &'static str,
    pub shape: &'static str,
    pub cable_type: &'static str,
    pub vendor: &'static str,
    pub length: &'static str,
    pub speed: &'static str,
    pub fw: [&'static str; 4],
}

impl Default for MatrixRow
{
    fn default() -> Self
    {
        Self {
            pn: "P-1000",
            ss200: "",
            shape: "Straight",
            cable_type: "DAC",
            vendor: "TE",
            length: "1M",
            speed: "200Gb",
            fw: ["", "", "", ""],
        }
    }
}

/// Write a workbook with one sheet laid out per the r4 revision
/// (1-indexed: pn=1, ss200=4, shape=5, type=6, vendor=7, length=10,
/// speed=11, firmware=17..20). Row 1 is a header; data starts at row 2.
pub fn write_matrix(
    path: &Path,
    sheet: &str,
    rows: &[MatrixRow],
)
{
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet)
        .expect("sheet name");

    worksheet
        .write_string(0, 0, "HPE PN")
        .expect("header cell");

    for (i, row) in rows
        .iter()
        .enumerate()
    {
        let r = (i + 1) as u32;
        let cells: [(u16, &str); 7] = [
            (0, row.pn),
            (3, row.ss200),
            (4, row.shape),
            (5, row.cable_type),
            (6, row.vendor),
            (9, row.length),
            (10, row.speed),
        ];

        for (col, text) in cells
        {
            if !text.is_empty()
            {
                worksheet
                    .write_string(r, col, text)
                    .expect("cell");
            }
        }

        for (j, fw) in row
            .fw
            .iter()
            .enumerate()
        {
            if !fw.is_empty()
            {
                worksheet
                    .write_string(r, 16 + j as u16, *fw)
                    .expect("firmware cell");
            }
        }
    }

    workbook
        .save(path)
        .expect("save workbook");
}
