use crate::archive::ArchiveError;
use crate::archive::file_set::FileSet;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Files of interest end in this suffix; everything else in the archive is
/// ignored.
pub const SOURCE_SUFFIX: &str = ".py";

/// Finder/resource-fork entries macOS injects into zips it creates.
pub const MACOS_METADATA_PREFIX: &str = "__MACOSX/";

/// An archive entry that qualified for extraction but could not be decoded
/// as text. Surfaced so an empty file set is distinguishable from a lossy
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub entry: String,
    pub reason: String,
}

/// Extraction result: the decoded file set plus any entries that had to be
/// skipped.
#[derive(Debug, Default)]
pub struct ExtractOutcome {
    pub file_set: FileSet,
    pub skipped: Vec<SkippedEntry>,
}

/// Extracts all qualifying source files from zip bytes, discarding skip
/// diagnostics. See [`extract_archive_report`].
pub fn extract_archive(bytes: &[u8]) -> Result<FileSet, ArchiveError> {
    extract_archive_report(bytes).map(|outcome| outcome.file_set)
}

/// Extracts all qualifying source files from zip bytes.
///
/// Directory entries and macOS metadata entries are skipped, only entries
/// ending in [`SOURCE_SUFFIX`] are kept, and each kept entry is stored under
/// its final path component (enclosing directories are discarded; a later
/// entry wins when two entries normalize to the same key). Entries that fail
/// text decoding are reported in the outcome's `skipped` list rather than
/// aborting the extraction.
pub fn extract_archive_report(bytes: &[u8]) -> Result<ExtractOutcome, ArchiveError> {
    let mut archive = open_archive(bytes)?;
    let mut outcome = ExtractOutcome::default();

    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(err) => {
                outcome.skipped.push(SkippedEntry {
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
        if !qualifies(&name) {
            continue;
        }

        let mut content = String::new();
        match entry.read_to_string(&mut content) {
            Ok(_) => outcome
                .file_set
                .insert(normalized_key(&name), content),
            Err(err) => outcome.skipped.push(SkippedEntry {
                entry: name,
                reason: err.to_string(),
            }),
        }
    }

    Ok(outcome)
}

/// Opens zip bytes, distinguishing "not a zip at all" from a corrupt zip.
pub(crate) fn open_archive(bytes: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>, ArchiveError> {
    // Every zip variant (regular, empty, spanned) starts with the "PK"
    // signature.
    if bytes.len() < 4 || &bytes[..2] != b"PK" {
        return Err(ArchiveError::NotAnArchive);
    }

    Ok(ZipArchive::new(Cursor::new(bytes))?)
}

/// Whether an entry path is a file of interest: not macOS metadata, ends in
/// the source suffix.
pub(crate) fn qualifies(entry_path: &str) -> bool {
    !entry_path.starts_with(MACOS_METADATA_PREFIX) && entry_path.ends_with(SOURCE_SUFFIX)
}

/// Normalizes an entry path to its final component, discarding the directory
/// structure inside the archive.
pub(crate) fn normalized_key(entry_path: &str) -> &str {
    entry_path
        .rsplit('/')
        .next()
        .unwrap_or(entry_path)
}
