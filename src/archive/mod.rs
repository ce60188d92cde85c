//! Archive decoding and submission grouping
//!
//! This module turns uploaded zip bytes into comparable file sets:
//!
//! - `file_set`: normalized path -> text content mapping for one archive
//! - `extractor`: zip enumeration, metadata filtering and key normalization
//! - `submissions`: partitioning a bulk download into per-submitter file sets
//!
//! All functions here operate on in-memory bytes supplied by the caller and
//! have no side effects, so repeated extraction of the same input is
//! deterministic.

pub mod extractor;
pub mod file_set;
pub mod submissions;

use thiserror::Error;

/// Failure opening an archive. Per-entry decode problems are not errors at
/// this level; they are reported as skipped entries alongside the extracted
/// file set so one malformed entry cannot forfeit the rest.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("input is not a zip archive")]
    NotAnArchive,
    #[error("failed to open archive: {0}")]
    Open(#[from] zip::result::ZipError),
}
