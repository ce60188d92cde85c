//! Line-level diff engine
//!
//! - `myers`: Myers' shortest-edit-script algorithm over lines
//! - `hunk`: grouping an edit script into contiguous change regions
//! - `file_diff`: per-file diff with status classification and unified
//!   patch rendering
//!
//! The structured hunks are the single source of truth; the rendered patch
//! text is derived from them.

pub mod file_diff;
pub mod hunk;
pub mod myers;
