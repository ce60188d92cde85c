//! Comparison orchestration
//!
//! Pairs a baseline file set against candidate file sets and drives the diff
//! engine per differing file. Comparisons are pure functions of their
//! inputs; the per-submitter variant fans independent comparisons out over
//! spawned tasks.

use crate::archive::file_set::FileSet;
use crate::archive::submissions::SubmissionTable;
use crate::diff::file_diff::{DiffStatus, FileDiff, diff_files};
use anyhow::Context;

/// Ordered sequence of per-file diffs: baseline paths in their original
/// order, then candidate-only paths in theirs. Paths with identical content
/// on both sides never appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    diffs: Vec<FileDiff>,
}

/// Per-status totals for a one-line review summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl ComparisonResult {
    pub fn iter(&self) -> impl Iterator<Item = &FileDiff> {
        self.diffs.iter()
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn summary(&self) -> ChangeSummary {
        let mut summary = ChangeSummary::default();
        for diff in &self.diffs {
            match diff.status() {
                DiffStatus::Added => summary.added += 1,
                DiffStatus::Removed => summary.removed += 1,
                DiffStatus::Modified => summary.modified += 1,
            }
        }
        summary
    }
}

/// Compares a candidate file set against the baseline.
///
/// Walks the union of paths (baseline insertion order first, then
/// candidate-only paths), treating an absent file as empty content, and
/// diffs every path whose content differs.
pub fn compare(baseline: &FileSet, candidate: &FileSet) -> ComparisonResult {
    let mut paths = baseline.paths().collect::<Vec<_>>();
    paths.extend(candidate.paths().filter(|path| !baseline.contains(path)));

    let diffs = paths
        .into_iter()
        .filter_map(|path| {
            let a = baseline.get(path).unwrap_or_default();
            let b = candidate.get(path).unwrap_or_default();
            (a != b).then(|| diff_files(path, a, b))
        })
        .collect();

    ComparisonResult { diffs }
}

/// Compares every submitter's file set against the same baseline, one
/// spawned task per submitter. Results come back keyed by submitter, in the
/// table's submitter order.
pub async fn compare_submissions(
    baseline: &FileSet,
    submissions: &SubmissionTable,
) -> anyhow::Result<Vec<(String, ComparisonResult)>> {
    let handles = submissions
        .iter()
        .map(|(submitter, files)| {
            let submitter = submitter.to_string();
            let baseline = baseline.clone();
            let files = files.clone();

            tokio::spawn(async move { (submitter, compare(&baseline, &files)) })
        })
        .collect::<Vec<_>>();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(
            handle
                .await
                .context("Comparison task failed to complete")?,
        );
    }

    Ok(results)
}
