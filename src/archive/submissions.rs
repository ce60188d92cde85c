use crate::archive::ArchiveError;
use crate::archive::extractor::{
    SkippedEntry, extract_archive_report, normalized_key, open_archive, qualifies,
};
use crate::archive::file_set::FileSet;
use indexmap::IndexMap;
use std::io::Read;

/// Folder marker identifying a file-upload submission in a bulk download.
pub const SUBMISSION_MARKER: &str = "_assignsubmission_file";

/// Folder marker for the online-text submission mode, which is excluded.
pub const ONLINE_TEXT_MARKER: &str = "_assignsubmission_onlinetext";

/// Submitters may upload their files wrapped in a zip of their own.
pub const NESTED_ARCHIVE_SUFFIX: &str = ".zip";

const SUBMITTER_DELIMITER: char = '_';

/// Per-submitter file sets partitioned out of one bulk download archive.
/// Submitters appear in the order the archive first names them; a submitter
/// with zero qualifying files is never added.
#[derive(Debug, Default)]
pub struct SubmissionTable {
    submissions: IndexMap<String, FileSet>,
    skipped: Vec<SkippedEntry>,
}

impl SubmissionTable {
    pub fn get(&self, submitter: &str) -> Option<&FileSet> {
        self.submissions.get(submitter)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileSet)> {
        self.submissions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Submitter identifiers in sorted order, for listing and paging.
    pub fn submitter_ids(&self) -> Vec<&str> {
        let mut ids = self
            .submissions
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    /// Entries that qualified but could not be decoded, including entries of
    /// corrupt nested archives. One submitter's bad upload never aborts the
    /// others.
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    fn insert(&mut self, submitter: &str, key: &str, content: String) {
        self.submissions
            .entry(submitter.to_string())
            .or_default()
            .insert(key, content);
    }

    fn merge(&mut self, submitter: &str, files: FileSet) {
        if files.is_empty() {
            return;
        }
        self.submissions
            .entry(submitter.to_string())
            .or_default()
            .merge(files);
    }
}

/// Partitions a bulk download archive into per-submitter file sets.
///
/// An entry takes part only if its path carries the submission-folder marker
/// and is not an online-text submission. The submitter identity is the token
/// before the first `_` in the entry path. Direct source files are inserted
/// under their final path component; nested zips are run through the archive
/// extractor's filtering rule and merged into the same submitter's set, with
/// later files winning on key collision.
pub fn group_submissions(bytes: &[u8]) -> Result<SubmissionTable, ArchiveError> {
    let mut archive = open_archive(bytes)?;
    let mut table = SubmissionTable::default();

    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(err) => {
                table.skipped.push(SkippedEntry {
                    entry: format!("#{i}"),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let Some(submitter) = submitter_id(&name) else {
            continue;
        };
        let submitter = submitter.to_string();

        if name.ends_with(NESTED_ARCHIVE_SUFFIX) {
            let mut nested = Vec::new();
            if let Err(err) = entry.read_to_end(&mut nested) {
                table.skipped.push(SkippedEntry {
                    entry: name,
                    reason: err.to_string(),
                });
                continue;
            }

            match extract_archive_report(&nested) {
                Ok(outcome) => {
                    table.skipped.extend(outcome.skipped);
                    table.merge(&submitter, outcome.file_set);
                }
                // A corrupt nested upload is isolated to this entry.
                Err(err) => table.skipped.push(SkippedEntry {
                    entry: name,
                    reason: err.to_string(),
                }),
            }
        } else if qualifies(&name) {
            let mut content = String::new();
            match entry.read_to_string(&mut content) {
                Ok(_) => table.insert(&submitter, normalized_key(&name), content),
                Err(err) => table.skipped.push(SkippedEntry {
                    entry: name,
                    reason: err.to_string(),
                }),
            }
        }
    }

    Ok(table)
}

/// Derives the submitter identity from an entry path, or `None` when the
/// entry is not part of a file-upload submission. The delimiter convention
/// lives only here so it can be swapped without touching grouping logic.
pub(crate) fn submitter_id(entry_path: &str) -> Option<&str> {
    if !entry_path.contains(SUBMISSION_MARKER) || entry_path.contains(ONLINE_TEXT_MARKER) {
        return None;
    }

    entry_path.split(SUBMITTER_DELIMITER).next()
}

#[cfg(test)]
mod tests {
    use super::{group_submissions, submitter_id};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        for (name, content) in entries {
            writer
                .start_file(name.to_string(), options)
                .expect("Failed to start zip entry");
            writer
                .write_all(content)
                .expect("Failed to write zip entry");
        }

        writer
            .finish()
            .expect("Failed to finish zip archive")
            .into_inner()
    }

    #[rstest]
    #[case("alice_12_assignsubmission_file/main.py", Some("alice"))]
    #[case("bob_34_assignsubmission_file/sub.zip", Some("bob"))]
    #[case("carol_56_assignsubmission_onlinetext/onlinetext.html", None)]
    #[case("stray/main.py", None)]
    fn submitter_identity_derivation(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(submitter_id(path), expected);
    }

    #[test]
    fn groups_direct_files_and_nested_archives_by_submitter() {
        let nested = zip_bytes(&[("x.py", b"print('x')\n")]);
        let bytes = zip_bytes(&[
            ("alice_12_assignsubmission_file/main.py", b"print('a')\n"),
            ("bob_34_assignsubmission_file/sub.zip", nested.as_slice()),
        ]);

        let table = group_submissions(&bytes).expect("Failed to group submissions");

        assert_eq!(table.submitter_ids(), vec!["alice", "bob"]);
        assert_eq!(
            table.get("alice").and_then(|files| files.get("main.py")),
            Some("print('a')\n")
        );
        assert_eq!(
            table.get("bob").and_then(|files| files.get("x.py")),
            Some("print('x')\n")
        );
    }

    #[test]
    fn nested_archive_filtering_follows_extractor_rules() {
        let nested = zip_bytes(&[
            ("work/solution.py", b"answer = 42\n"),
            ("__MACOSX/._solution.py", b"\x00junk"),
            ("work/notes.txt", b"scratch\n"),
        ]);
        let bytes = zip_bytes(&[(
            "dana_78_assignsubmission_file/upload.zip",
            nested.as_slice(),
        )]);

        let table = group_submissions(&bytes).expect("Failed to group submissions");
        let files = table.get("dana").expect("dana should be present");

        assert_eq!(files.paths().collect::<Vec<_>>(), vec!["solution.py"]);
    }

    #[test]
    fn multiple_entries_for_one_submitter_are_merged() {
        let nested = zip_bytes(&[("extra.py", b"extra\n"), ("main.py", b"from zip\n")]);
        let bytes = zip_bytes(&[
            ("erin_90_assignsubmission_file/main.py", b"direct\n"),
            ("erin_90_assignsubmission_file/more.zip", nested.as_slice()),
        ]);

        let table = group_submissions(&bytes).expect("Failed to group submissions");
        let files = table.get("erin").expect("erin should be present");

        assert_eq!(files.len(), 2);
        // The nested archive came later, so its main.py wins.
        assert_eq!(files.get("main.py"), Some("from zip\n"));
        assert_eq!(files.get("extra.py"), Some("extra\n"));
    }

    #[test]
    fn corrupt_nested_archive_does_not_abort_other_submitters() {
        let bytes = zip_bytes(&[
            ("alice_12_assignsubmission_file/main.py", b"ok\n"),
            ("bob_34_assignsubmission_file/broken.zip", b"not a zip"),
        ]);

        let table = group_submissions(&bytes).expect("Failed to group submissions");

        assert_eq!(table.submitter_ids(), vec!["alice"]);
        assert_eq!(table.skipped().len(), 1);
        assert_eq!(
            table.skipped()[0].entry,
            "bob_34_assignsubmission_file/broken.zip"
        );
    }

    #[test]
    fn submitter_with_no_qualifying_files_is_never_added() {
        let bytes = zip_bytes(&[(
            "frank_11_assignsubmission_file/report.pdf",
            b"%PDF".as_slice(),
        )]);

        let table = group_submissions(&bytes).expect("Failed to group submissions");

        assert!(table.is_empty());
    }
}
