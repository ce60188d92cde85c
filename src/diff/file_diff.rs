use crate::diff::hunk::{Hunk, build_hunks};
use crate::diff::myers::LineDiff;

/// Default side labels used in patch headers.
pub const BASELINE_LABEL: &str = "starter";
pub const CANDIDATE_LABEL: &str = "submission";

/// How a file diverges between the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStatus {
    Added,
    Removed,
    Modified,
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DiffStatus::Added => "added",
            DiffStatus::Removed => "removed",
            DiffStatus::Modified => "modified",
        };
        write!(f, "{label}")
    }
}

/// Comparison result for one file path: its status and the hunks describing
/// the divergence. The unified patch text is rendered from the same hunks on
/// demand, so the two views can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    path: String,
    status: DiffStatus,
    a_label: String,
    b_label: String,
    hunks: Vec<Hunk>,
}

impl FileDiff {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn status(&self) -> DiffStatus {
        self.status
    }

    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    /// Renders the unified patch text for this file. Empty when the inputs
    /// were identical.
    pub fn patch(&self) -> String {
        if self.hunks.is_empty() {
            return String::new();
        }

        let mut patch = format!(
            "--- {}/{}\n+++ {}/{}\n",
            self.a_label, self.path, self.b_label, self.path
        );

        for hunk in &self.hunks {
            patch.push_str(&hunk.header());
            patch.push('\n');
            for line in hunk.lines() {
                patch.push_str(&line.to_string());
                patch.push('\n');
            }
        }

        patch
    }
}

/// Diffs two text blobs under the default side labels.
pub fn diff_files(path: &str, baseline: &str, candidate: &str) -> FileDiff {
    diff_files_labeled(path, baseline, candidate, BASELINE_LABEL, CANDIDATE_LABEL)
}

/// Diffs two text blobs for one file path.
///
/// The status is `Added` when the baseline side is empty and the candidate
/// is not, `Removed` in the mirrored case, and `Modified` otherwise.
/// Identical inputs produce zero hunks.
pub fn diff_files_labeled(
    path: &str,
    baseline: &str,
    candidate: &str,
    a_label: &str,
    b_label: &str,
) -> FileDiff {
    let status = if baseline.is_empty() && !candidate.is_empty() {
        DiffStatus::Added
    } else if candidate.is_empty() && !baseline.is_empty() {
        DiffStatus::Removed
    } else {
        DiffStatus::Modified
    };

    let a_lines = baseline.lines().collect::<Vec<_>>();
    let b_lines = candidate.lines().collect::<Vec<_>>();
    let hunks = build_hunks(&LineDiff::new(&a_lines, &b_lines).edits());

    FileDiff {
        path: path.to_string(),
        status,
        a_label: a_label.to_string(),
        b_label: b_label.to_string(),
        hunks,
    }
}
