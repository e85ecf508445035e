//! End-to-end tests over fabricated self-extracting images.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::{env, fs};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use runsfx::{Console, Error, ExtractOptions, Trailer, run};

/// Changing the working directory is process-global; tests that resolve a
/// destination hold this guard, which also restores the original directory
/// when dropped.
struct CwdGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    fn take() -> Self {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        let lock = LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Self {
            original: env::current_dir().unwrap(),
            _lock: lock,
        }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}

fn sample_zip() -> Vec<u8> {
    let options = SimpleFileOptions::default();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer.add_directory("docs/", options).unwrap();
    writer.start_file("docs/readme.txt", options).unwrap();
    writer.write_all(b"hello from the archive\n").unwrap();
    writer.start_file("data.bin", options).unwrap();
    writer.write_all(&[7u8; 2048]).unwrap();
    writer.finish().unwrap().into_inner()
}

fn write_image(path: &Path, payload: &[u8]) {
    let mut image = Vec::new();
    image.extend_from_slice(b"\x7fELF pretend stub machine code");
    image.extend_from_slice(payload);
    let trailer = Trailer {
        payload_len: payload.len() as u64,
    };
    image.extend_from_slice(&trailer.to_bytes());
    fs::write(path, image).unwrap();
}

#[test]
fn extracts_embedded_archive_into_created_destination() {
    let _guard = CwdGuard::take();
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("archive.run");
    write_image(&image, &sample_zip());
    let dest = dir.path().join("out");

    let console = Console::new("archive.run");
    let options = ExtractOptions {
        create_destination: true,
        verbose: true,
        ..ExtractOptions::default()
    };
    run(&image, dest.to_str().unwrap(), &options, &console).unwrap();

    assert_eq!(
        fs::read_to_string(dest.join("docs/readme.txt")).unwrap(),
        "hello from the archive\n"
    );
    assert_eq!(fs::read(dest.join("data.bin")).unwrap(), [7u8; 2048]);

    // Extraction happened in the resolved working directory.
    assert_eq!(
        env::current_dir().unwrap().canonicalize().unwrap(),
        dest.canonicalize().unwrap()
    );
}

#[test]
fn rerunning_over_the_same_destination_succeeds() {
    let _guard = CwdGuard::take();
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("archive.run");
    write_image(&image, &sample_zip());
    let dest = dir.path().join("out");

    let console = Console::new("archive.run");
    let options = ExtractOptions {
        create_destination: true,
        ..ExtractOptions::default()
    };
    run(&image, dest.to_str().unwrap(), &options, &console).unwrap();
    run(&image, dest.to_str().unwrap(), &options, &console).unwrap();

    assert_eq!(
        fs::read_to_string(dest.join("docs/readme.txt")).unwrap(),
        "hello from the archive\n"
    );
}

#[test]
fn missing_payload_fails_before_touching_the_destination() {
    let _guard = CwdGuard::take();
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("archive.run");
    fs::write(&image, b"an executable with nothing appended").unwrap();
    let dest = dir.path().join("out");
    fs::create_dir(&dest).unwrap();

    let console = Console::new("archive.run");
    let err = run(
        &image,
        dest.to_str().unwrap(),
        &ExtractOptions::default(),
        &console,
    )
    .unwrap_err();

    assert!(matches!(err, Error::MissingPayload));
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
}

#[test]
fn zero_length_payload_is_corruption() {
    let _guard = CwdGuard::take();
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("archive.run");
    write_image(&image, b"");
    let dest = dir.path().join("out");
    fs::create_dir(&dest).unwrap();

    let console = Console::new("archive.run");
    let err = run(
        &image,
        dest.to_str().unwrap(),
        &ExtractOptions::default(),
        &console,
    )
    .unwrap_err();

    assert!(matches!(err, Error::MissingPayload));
}

#[test]
fn destination_must_exist_without_create() {
    let _guard = CwdGuard::take();
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("archive.run");
    write_image(&image, &sample_zip());
    let dest = dir.path().join("nowhere");

    let console = Console::new("archive.run");
    let err = run(
        &image,
        dest.to_str().unwrap(),
        &ExtractOptions::default(),
        &console,
    )
    .unwrap_err();

    assert!(matches!(err, Error::EnterDestination { .. }));
    assert!(!dest.exists());
}
