#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes a zip archive with the given entries to `path`.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let bytes = zip_bytes(entries);
    std::fs::write(path, bytes)
        .unwrap_or_else(|e| panic!("Failed to write archive {:?}: {}", path, e));
}

/// Builds zip archive bytes in memory.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, content) in entries {
        writer
            .start_file(name.to_string(), options)
            .unwrap_or_else(|e| panic!("Failed to start entry {}: {}", name, e));
        writer
            .write_all(content)
            .unwrap_or_else(|e| panic!("Failed to write entry {}: {}", name, e));
    }

    writer
        .finish()
        .expect("Failed to finish zip archive")
        .into_inner()
}

pub fn run_gradiff(args: &[&str]) -> Command {
    let mut command = Command::cargo_bin("gradiff").expect("Failed to find gradiff binary");
    command.args(args);
    command
}

#[fixture]
pub fn work_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn starter_zip(work_dir: TempDir) -> (TempDir, String) {
    let path = work_dir.path().join("starter.zip");
    write_zip(
        &path,
        &[
            ("starter/main.py", b"x = 1\nprint(x)\n"),
            ("starter/util.py", b"def helper():\n    pass\n"),
        ],
    );

    let path = path.display().to_string();
    (work_dir, path)
}
