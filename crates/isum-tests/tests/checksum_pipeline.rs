//! End-to-end generation and verification scenarios driven through the
//! full CLI orchestration layer, with output captured via `-o`.

use std::fs;

use clap::Parser;

use isum_cli::{run, Cli};
use isum_code::IsccSumProcessor;
use isum_core::{decode_base32, IsccCode};
use isum_tests::harness::{lcg_bytes, TreeFixture};

fn run_cli(args: &[String]) -> i32 {
    let cli = Cli::try_parse_from(std::iter::once("isum".to_string()).chain(args.iter().cloned()))
        .expect("argument parsing");
    run(&cli).expect("run")
}

fn run_cli_capture(fixture: &TreeFixture, args: &[&str]) -> (i32, String) {
    let out_path = fixture.root().join("captured.out");
    let mut full: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    full.push("-o".to_string());
    full.push(out_path.display().to_string());
    let code = run_cli(&full);
    let output = fs::read_to_string(&out_path).expect("read captured output");
    (code, output)
}

#[test]
fn generate_then_verify_roundtrip() {
    let fixture = TreeFixture::new();
    let a = fixture.file("a.txt", &lcg_bytes(10_000, 1));
    let b = fixture.file("b.txt", &lcg_bytes(10_000, 2));

    let (code, listing) = run_cli_capture(
        &fixture,
        &[&a.display().to_string(), &b.display().to_string()],
    );
    assert_eq!(code, 0);
    assert_eq!(listing.lines().count(), 2);

    let sums = fixture.file("sums.txt", listing.as_bytes());
    let (code, report) = run_cli_capture(&fixture, &["-c", &sums.display().to_string()]);
    assert_eq!(code, 0);
    for line in report.lines() {
        assert!(line.ends_with(": OK"), "unexpected line: {line}");
    }
}

#[test]
fn verify_detects_single_modified_file() {
    let fixture = TreeFixture::new();
    let a = fixture.file("a.txt", b"alpha");
    let b = fixture.file("b.txt", b"beta");
    let c = fixture.file("c.txt", b"gamma");

    let (code, listing) = run_cli_capture(
        &fixture,
        &[
            &a.display().to_string(),
            &b.display().to_string(),
            &c.display().to_string(),
        ],
    );
    assert_eq!(code, 0);

    fs::write(&b, b"MODIFIED").unwrap();
    let sums = fixture.file("sums.txt", listing.as_bytes());
    let (code, report) = run_cli_capture(&fixture, &["-c", &sums.display().to_string()]);

    assert_eq!(code, 1);
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("a.txt: OK"));
    assert!(lines[1].ends_with("b.txt: FAILED"));
    assert!(lines[2].ends_with("c.txt: OK"));
}

#[test]
fn tree_mode_equals_concatenated_stream() {
    let fixture = TreeFixture::new();
    fixture.file("tree/a.txt", b"hello");
    fixture.file("tree/b.txt", b"world");
    let dir = fixture.root().join("tree");

    let (code, output) = run_cli_capture(&fixture, &["--tree", &dir.display().to_string()]);
    assert_eq!(code, 0);

    let line = output.lines().next().expect("one output line");
    let (iscc, path) = line.split_once(" *").expect("default format");
    assert!(path.ends_with('/'), "tree path must end with a slash: {path}");

    let mut concat = IsccSumProcessor::new();
    concat.update(b"helloworld");
    assert_eq!(iscc, concat.result(true, false).unwrap().iscc);
}

#[test]
fn tree_roundtrips_through_verification() {
    let fixture = TreeFixture::new();
    fixture.file("tree/x.bin", &lcg_bytes(5000, 3));
    fixture.file("tree/sub/y.bin", &lcg_bytes(5000, 4));
    let dir = fixture.root().join("tree");

    let (code, listing) = run_cli_capture(&fixture, &["--tree", &dir.display().to_string()]);
    assert_eq!(code, 0);

    let sums = fixture.file("sums.txt", listing.as_bytes());
    let (code, report) = run_cli_capture(&fixture, &["-c", &sums.display().to_string()]);
    assert_eq!(code, 0);
    assert!(report.lines().next().unwrap().ends_with(": OK"));
}

#[test]
fn directory_argument_expands_in_walk_order() {
    let fixture = TreeFixture::new();
    fixture.file("data/z.txt", b"z");
    fixture.file("data/a.txt", b"a");
    fixture.file("data/sub/m.txt", b"m");
    let dir = fixture.root().join("data");

    let (code, output) = run_cli_capture(&fixture, &[&dir.display().to_string()]);
    assert_eq!(code, 0);

    let paths: Vec<&str> = output
        .lines()
        .map(|l| l.split_once(" *").unwrap().1)
        .collect();
    assert_eq!(paths.len(), 3);
    assert!(paths[0].ends_with("data/a.txt"));
    assert!(paths[1].ends_with("data/z.txt"));
    assert!(paths[2].ends_with("data/sub/m.txt"));
}

#[test]
fn bsd_tag_output_verifies() {
    let fixture = TreeFixture::new();
    let a = fixture.file("a.txt", b"alpha");

    let (code, listing) = run_cli_capture(&fixture, &["--tag", &a.display().to_string()]);
    assert_eq!(code, 0);
    assert!(listing.starts_with("ISCC ("));

    let sums = fixture.file("sums.txt", listing.as_bytes());
    let (code, report) = run_cli_capture(&fixture, &["-c", &sums.display().to_string()]);
    assert_eq!(code, 0);
    assert!(report.lines().next().unwrap().ends_with(": OK"));
}

#[test]
fn units_emit_two_indented_lines() {
    let fixture = TreeFixture::new();
    let a = fixture.file("a.txt", b"alpha");

    let (code, output) = run_cli_capture(&fixture, &["--units", &a.display().to_string()]);
    assert_eq!(code, 0);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("  ISCC:"));
    assert!(lines[2].starts_with("  ISCC:"));

    // Data unit then instance unit, both 256-bit standalone codes.
    let data_unit = decode_base32(lines[1].trim().strip_prefix("ISCC:").unwrap()).unwrap();
    assert_eq!(data_unit[0], 0x30);
    let instance_unit = decode_base32(lines[2].trim().strip_prefix("ISCC:").unwrap()).unwrap();
    assert_eq!(instance_unit[0], 0x40);
}

#[test]
fn zero_terminates_records_with_nul() {
    let fixture = TreeFixture::new();
    let a = fixture.file("a.txt", b"alpha");

    let (code, output) = run_cli_capture(&fixture, &["-z", "--units", &a.display().to_string()]);
    assert_eq!(code, 0);

    assert!(!output.contains('\n'));
    assert_eq!(output.matches('\0').count(), 3);
    assert!(output.ends_with('\0'));
}

#[test]
fn narrow_flag_packs_18_bytes() {
    let fixture = TreeFixture::new();
    let a = fixture.file("a.txt", b"alpha");

    let (code, output) = run_cli_capture(&fixture, &["--narrow", &a.display().to_string()]);
    assert_eq!(code, 0);

    let iscc = output.lines().next().unwrap().split_once(" *").unwrap().0;
    let parsed: IsccCode = iscc.parse().unwrap();
    assert!(!parsed.is_wide());
    assert_eq!(parsed.as_bytes().len(), 18);
    assert_eq!(parsed.as_bytes()[0], 0x55);
    assert_eq!(parsed.as_bytes()[1], 0x00);
}

#[test]
fn wide_default_packs_34_bytes() {
    let fixture = TreeFixture::new();
    let a = fixture.file("a.txt", &[0u8; 32]);

    let (code, output) = run_cli_capture(&fixture, &[&a.display().to_string()]);
    assert_eq!(code, 0);

    let iscc = output.lines().next().unwrap().split_once(" *").unwrap().0;
    let parsed: IsccCode = iscc.parse().unwrap();
    assert!(parsed.is_wide());
    assert_eq!(parsed.as_bytes().len(), 34);
    assert_eq!(parsed.as_bytes()[0], 0x57);
    assert_eq!(parsed.as_bytes()[1], 0x00);
}

#[test]
fn ignored_files_stay_out_of_tree_code() {
    let fixture = TreeFixture::new();
    fixture.file("tree/a.txt", b"hello");
    fixture.file("tree/scratch.tmp", b"noise");
    fixture.ignore_file("tree/.isccignore", &["*.tmp"]);
    let dir = fixture.root().join("tree");

    let (code, output) = run_cli_capture(&fixture, &["--tree", &dir.display().to_string()]);
    assert_eq!(code, 0);
    let iscc = output.lines().next().unwrap().split_once(" *").unwrap().0;

    // The ignore file itself and the ignored file contribute nothing.
    let mut expected = IsccSumProcessor::new();
    expected.update(b"hello");
    assert_eq!(iscc, expected.result(true, false).unwrap().iscc);
}
