//! End-to-end tests for the cablegen binary.

mod util;

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use util::{MatrixRow, write_matrix};

fn cablegen() -> Command {
    Command::cargo_bin("cablegen").expect("binary under test")
}

/// Expected text of one emitted record block, mirroring the field order of
/// the attribute table.
#[allow(clippy::too_many_arguments)]
fn record_block(
    pn: u64,
    vendor: &str,
    cable_type: &str,
    shape: &str,
    length_cm: u32,
    is_ss200: bool,
    speed: &str,
    serdes: [i32; 6],
    fw: [i32; 4],
) -> String {
    let mut block = String::from("\t{\n");
    {
        let mut attr = |name: &str, value: String| {
            block.push_str(&format!("\t\t.{name:<24}= {value},\n"));
        };

        attr("pn", pn.to_string());
        attr("vendor", vendor.to_string());
        attr("type", cable_type.to_string());
        attr("shape", shape.to_string());
        attr("length_cm", length_cm.to_string());
        attr("vendor_pn", "\"?\"".to_string());
        attr("is_ss200", is_ss200.to_string());
        attr("max_speed", speed.to_string());
        attr("serdes.pre1", serdes[0].to_string());
        attr("serdes.pre2", serdes[1].to_string());
        attr("serdes.pre3", serdes[2].to_string());
        attr("serdes.cursor", serdes[3].to_string());
        attr("serdes.post1", serdes[4].to_string());
        attr("serdes.post2", serdes[5].to_string());
        attr("fw_ver.major", fw[0].to_string());
        attr("fw_ver.minor", fw[1].to_string());
        attr("fw_ver.split_major", fw[2].to_string());
        attr("fw_ver.split_minor", fw[3].to_string());
    }
    block.push_str("\t},\n");
    block
}

fn fixture_rows() -> Vec<MatrixRow> {
    vec![
        MatrixRow {
            pn: "RX-123456",
            ss200: "SS200",
            length: "1.5M",
            fw: ["1A", "2", "N/A", ""],
            ..MatrixRow::default()
        },
        MatrixRow {
            pn: "A-100",
            shape: "Splitter (Y)",
            cable_type: "AOC",
            vendor: "Bizlink",
            length: "2m ",
            speed: "400Gb",
            ..MatrixRow::default()
        },
        MatrixRow {
            pn: "B-100",
            shape: "Bifurcated (H)",
            cable_type: "AEC",
            vendor: "Acme",
            length: "3M",
            speed: "800Gb",
            ..MatrixRow::default()
        },
    ]
}

#[test]
fn convert_emits_the_sorted_attribute_table() {
    // Given
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let workbook = tmp.child("matrix.xlsx");
    write_matrix(workbook.path(), "Cable List", &fixture_rows());

    // When
    cablegen()
        .current_dir(tmp.path())
        .args([
            "convert",
            "matrix.xlsx",
            "--sheet",
            "Cable List",
            "-o",
            "cable_db.h",
            "--no-color",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Convert: Cable List (3 cables, 0 skipped)"));

    // Then: duplicate key 100 emits sheet-order variants first, 123456 last.
    let mut expected = String::new();
    expected.push_str("/* SPDX-License-Identifier: GPL-2.0 */\n\n");
    expected.push_str("/* This file is auto-generated and should not be modified */\n");
    expected.push_str("/* source = Cable List */\n\n");
    expected.push_str("#ifndef _CABLE_DB_H_\n#define _CABLE_DB_H_\n\n");
    expected.push_str("#include \"cable_attr.h\"\n\n");
    expected.push_str("static struct cable_attr cable_db[] = {\n");
    expected.push_str(&record_block(
        100,
        "CABLE_VENDOR_BIZLINK",
        "CABLE_TYPE_AOC",
        "CABLE_SHAPE_SPLITTER",
        200,
        false,
        "CABLE_SPEED_400G",
        [-12, 0, 0, 98, -4, 0],
        [-1, -1, -1, -1],
    ));
    expected.push_str(&record_block(
        100,
        "CABLE_VENDOR_INVALID",
        "CABLE_TYPE_AEC",
        "CABLE_SHAPE_BIFURCATED",
        300,
        false,
        "CABLE_SPEED_800G",
        [-4, 0, 0, 98, 0, 0],
        [-1, -1, -1, -1],
    ));
    expected.push_str(&record_block(
        123456,
        "CABLE_VENDOR_TE",
        "CABLE_TYPE_PEC",
        "CABLE_SHAPE_STRAIGHT",
        150,
        true,
        "CABLE_SPEED_200G",
        [0, 0, 0, 100, 0, 0],
        [26, 2, -1, -1],
    ));
    expected.push_str("};\n\n");
    expected.push_str("#endif /* _CABLE_DB_H_ */\n");

    let written = std::fs::read_to_string(tmp.child("cable_db.h").path()).expect("output file");
    assert_eq!(written, expected);
}

#[test]
fn reruns_are_byte_identical() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let workbook = tmp.child("matrix.xlsx");
    write_matrix(workbook.path(), "Cable List", &fixture_rows());

    let run = || {
        cablegen()
            .current_dir(tmp.path())
            .args(["convert", "matrix.xlsx", "--sheet", "Cable List", "-o", "cable_db.h"])
            .assert()
            .success();
        std::fs::read(tmp.child("cable_db.h").path()).expect("output file")
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn malformed_part_number_aborts_without_output() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let workbook = tmp.child("matrix.xlsx");
    write_matrix(
        workbook.path(),
        "Cable List",
        &[MatrixRow { pn: "????", vendor: "TE", ..MatrixRow::default() }],
    );

    cablegen()
        .current_dir(tmp.path())
        .args(["convert", "matrix.xlsx", "--sheet", "Cable List", "-o", "cable_db.h"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed part number"))
        .stderr(predicate::str::contains("row 2"));

    tmp.child("cable_db.h").assert(predicate::path::missing());
}

#[test]
fn excluded_rows_are_counted_not_emitted() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let workbook = tmp.child("matrix.xlsx");
    write_matrix(
        workbook.path(),
        "Cable List",
        &[
            MatrixRow::default(),
            MatrixRow {
                pn: "K-1",
                length: "HPE Slingshot L1 1x16 Sw Cbl Kit Cray EX",
                ..MatrixRow::default()
            },
            MatrixRow { pn: "U-2", vendor: "?", ..MatrixRow::default() },
            MatrixRow { pn: "?", ..MatrixRow::default() },
        ],
    );

    let assert = cablegen()
        .current_dir(tmp.path())
        .args([
            "convert",
            "matrix.xlsx",
            "--sheet",
            "Cable List",
            "-o",
            "cable_db.h",
            "--json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout");
    let summary: serde_json::Value = serde_json::from_str(stdout.trim()).expect("summary JSON");

    assert_eq!(summary["records"], 1);
    assert_eq!(summary["skipped"], 3);
    assert_eq!(summary["sheets"][0]["rows"], 4);
    assert_eq!(summary["sheets"][0]["name"], "Cable List");
}

#[test]
fn transceiver_rows_follow_the_selected_policy() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let workbook = tmp.child("matrix.xlsx");
    write_matrix(
        workbook.path(),
        "Cable List",
        &[MatrixRow {
            pn: "X-900",
            cable_type: "XCVR",
            length: "N/A",
            ..MatrixRow::default()
        }],
    );

    // r4 keeps transceivers: zero length, AEC serdes preset.
    cablegen()
        .current_dir(tmp.path())
        .args(["convert", "matrix.xlsx", "--sheet", "Cable List", "-o", "cable_db.h"])
        .assert()
        .success();

    let written = std::fs::read_to_string(tmp.child("cable_db.h").path()).expect("output file");
    assert!(written.contains("\t\t.length_cm               = 0,\n"));
    assert!(written.contains("\t\t.serdes.pre1             = -4,\n"));
    assert!(written.contains("CABLE_TYPE_POC"));

    // An excluding policy drops the row entirely.
    cablegen()
        .current_dir(tmp.path())
        .args([
            "convert",
            "matrix.xlsx",
            "--sheet",
            "Cable List",
            "-o",
            "cable_db.h",
            "--transceivers",
            "exclude",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 cables, 1 skipped)"));
}

#[test]
fn dry_run_writes_nothing() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let workbook = tmp.child("matrix.xlsx");
    write_matrix(workbook.path(), "Cable List", &fixture_rows());

    cablegen()
        .current_dir(tmp.path())
        .args([
            "convert",
            "matrix.xlsx",
            "--sheet",
            "Cable List",
            "-o",
            "cable_db.h",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write 3 records"));

    tmp.child("cable_db.h").assert(predicate::path::missing());
}

#[test]
fn unknown_sheet_names_the_available_ones() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let workbook = tmp.child("matrix.xlsx");
    write_matrix(workbook.path(), "Cable List", &fixture_rows());

    cablegen()
        .current_dir(tmp.path())
        .args(["convert", "matrix.xlsx", "--sheet", "Wrong Name", "-o", "cable_db.h"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong Name"))
        .stderr(predicate::str::contains("Cable List"));
}

#[test]
fn config_file_supplies_sheet_and_layout_defaults() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let workbook = tmp.child("matrix.xlsx");
    write_matrix(workbook.path(), "Cable List", &fixture_rows());
    tmp.child("cablegen.toml")
        .write_str("sheets = [\"Cable List\"]\noutput = \"generated.h\"\n")
        .expect("config file");

    cablegen()
        .current_dir(tmp.path())
        .args(["convert", "matrix.xlsx"])
        .assert()
        .success();

    tmp.child("generated.h").assert(predicate::path::exists());
}

#[test]
fn layouts_lists_builtin_revisions() {
    cablegen()
        .args(["layouts"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("r1")
                .and(predicate::str::contains("r4"))
                .and(predicate::str::contains("exclude"))
                .and(predicate::str::contains("include")),
        );
}

#[test]
fn init_writes_a_default_config() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    cablegen()
        .current_dir(tmp.path())
        .args(["init"])
        .assert()
        .success();

    tmp.child("cablegen.toml")
        .assert(predicate::str::contains("layout = \"r4\""));

    // A second init without --force refuses to clobber.
    cablegen()
        .current_dir(tmp.path())
        .args(["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
