mod common;

use assert_fs::TempDir;
use common::{run_gradiff, starter_zip, write_zip};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn identical_archives_show_no_differences(starter_zip: (TempDir, String)) {
    let (_work_dir, starter) = starter_zip;

    run_gradiff(&["compare", &starter, &starter])
        .assert()
        .success()
        .stdout(predicate::str::contains("Starter: 2 file(s), submission: 2 file(s)"))
        .stdout(predicate::str::contains("No differences"));
}

#[rstest]
fn modified_file_is_shown_as_a_unified_hunk(starter_zip: (TempDir, String)) {
    let (work_dir, starter) = starter_zip;

    let submission = work_dir.path().join("submission.zip");
    write_zip(
        &submission,
        &[
            ("work/main.py", b"x = 2\nprint(x)\n"),
            ("work/util.py", b"def helper():\n    pass\n"),
        ],
    );

    run_gradiff(&["compare", &starter, &submission.display().to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) differ (0 added, 0 removed, 1 modified)"))
        .stdout(predicate::str::contains("main.py (modified)"))
        .stdout(predicate::str::contains("@@ -1,2 +1,2 @@"))
        .stdout(predicate::str::contains("-x = 1"))
        .stdout(predicate::str::contains("+x = 2"));
}

#[rstest]
fn added_and_removed_files_are_classified(starter_zip: (TempDir, String)) {
    let (work_dir, starter) = starter_zip;

    let submission = work_dir.path().join("submission.zip");
    write_zip(
        &submission,
        &[
            ("work/main.py", b"x = 1\nprint(x)\n"),
            ("work/extra.py", b"new = True\n"),
        ],
    );

    run_gradiff(&["compare", &starter, &submission.display().to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("util.py (removed)"))
        .stdout(predicate::str::contains("extra.py (added)"))
        .stdout(predicate::str::contains("+new = True"));
}

#[rstest]
fn directory_structure_inside_archives_is_discarded(starter_zip: (TempDir, String)) {
    let (work_dir, starter) = starter_zip;

    // same files, but nested under different directories and with macOS junk
    let submission = work_dir.path().join("submission.zip");
    write_zip(
        &submission,
        &[
            ("deep/nested/dirs/main.py", b"x = 1\nprint(x)\n"),
            ("other/util.py", b"def helper():\n    pass\n"),
            ("__MACOSX/._main.py", b"\x00\x05junk"),
        ],
    );

    run_gradiff(&["compare", &starter, &submission.display().to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No differences"));
}

#[rstest]
fn non_archive_input_fails_with_a_clear_error(starter_zip: (TempDir, String)) {
    let (work_dir, starter) = starter_zip;

    let not_a_zip = work_dir.path().join("essay.txt");
    std::fs::write(&not_a_zip, "this is not an archive").expect("Failed to write file");

    run_gradiff(&["compare", &starter, &not_a_zip.display().to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a zip archive"));
}

#[rstest]
fn missing_archive_path_fails_with_a_clear_error(starter_zip: (TempDir, String)) {
    let (work_dir, starter) = starter_zip;
    let missing = work_dir.path().join("nope.zip");

    run_gradiff(&["compare", &starter, &missing.display().to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read archive"));
}
