//! Front-end behaviour of the stub binary.

use std::fs::{self, OpenOptions};
use std::io::{Cursor, Write};
use std::process::Command;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use runsfx::Trailer;

const BIN: &str = env!("CARGO_BIN_EXE_runsfx");

#[test]
fn help_prints_usage_and_exits_zero() {
    let output = Command::new(BIN).arg("--help").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("DESTINATION"));
}

#[test]
fn version_prints_and_exits_zero() {
    let output = Command::new(BIN).arg("-V").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_destination_is_reported_with_a_hint() {
    let output = Command::new(BIN).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no destination specified"));
    assert!(stderr.contains("--help"));
}

#[test]
fn unknown_option_is_rejected() {
    let output = Command::new(BIN).arg("--bogus").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--help"));
}

#[test]
fn extra_positional_arguments_are_rejected() {
    let output = Command::new(BIN).args(["one", "two"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn stub_without_payload_reports_corruption() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(BIN)
        .arg(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no archive data found"));
}

#[test]
fn stub_with_appended_payload_extracts_itself() {
    let dir = tempfile::tempdir().unwrap();
    let stub = dir.path().join("archive.run");
    fs::copy(BIN, &stub).unwrap();

    let options = SimpleFileOptions::default();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file("greeting.txt", options).unwrap();
    writer.write_all(b"extracted by the stub itself\n").unwrap();
    let payload = writer.finish().unwrap().into_inner();

    let mut image = OpenOptions::new().append(true).open(&stub).unwrap();
    image.write_all(&payload).unwrap();
    let trailer = Trailer {
        payload_len: payload.len() as u64,
    };
    image.write_all(&trailer.to_bytes()).unwrap();
    drop(image);

    let dest = dir.path().join("unpacked");
    let output = Command::new(&stub)
        .args(["-c", "-v"])
        .arg(&dest)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("extracting: "));
    assert!(stdout.contains("Extraction completed successfully."));
    assert_eq!(
        fs::read_to_string(dest.join("greeting.txt")).unwrap(),
        "extracted by the stub itself\n"
    );
}
