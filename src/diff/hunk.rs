use crate::diff::myers::{Edit, LineTag};
use std::fmt::Display;

/// Unchanged lines kept around each change region, and the threshold for
/// merging nearby regions into one hunk. Fixed so the rendered patch and the
/// structured hunks always agree.
pub const HUNK_CONTEXT_LINES: usize = 3;

/// One line of a hunk: its tag plus the literal text, without any marker
/// character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    tag: LineTag,
    text: String,
}

impl DiffLine {
    pub fn tag(&self) -> LineTag {
        self.tag
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Display for DiffLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = match self.tag {
            LineTag::Context => ' ',
            LineTag::Added => '+',
            LineTag::Removed => '-',
        };
        write!(f, "{marker}{}", self.text)
    }
}

/// One contiguous change region. Starts are 1-indexed; a side that
/// contributes no lines reports a zero count and, following unified-diff
/// convention, the line number preceding the change as its start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    a_start: usize,
    a_lines: usize,
    b_start: usize,
    b_lines: usize,
    lines: Vec<DiffLine>,
}

impl Hunk {
    pub fn a_start(&self) -> usize {
        self.a_start
    }

    pub fn a_lines(&self) -> usize {
        self.a_lines
    }

    pub fn b_start(&self) -> usize {
        self.b_start
    }

    pub fn b_lines(&self) -> usize {
        self.b_lines
    }

    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.a_start, self.a_lines, self.b_start, self.b_lines
        )
    }

    fn from_edits(edits: &[Edit]) -> Self {
        let a_lines = edits
            .iter()
            .filter(|edit| edit.tag != LineTag::Added)
            .count();
        let b_lines = edits
            .iter()
            .filter(|edit| edit.tag != LineTag::Removed)
            .count();

        let first = &edits[0];
        let a_start = if a_lines > 0 { first.a_pos + 1 } else { first.a_pos };
        let b_start = if b_lines > 0 { first.b_pos + 1 } else { first.b_pos };

        Self {
            a_start,
            a_lines,
            b_start,
            b_lines,
            lines: edits
                .iter()
                .map(|edit| DiffLine {
                    tag: edit.tag,
                    text: edit.text.clone(),
                })
                .collect(),
        }
    }
}

/// Groups an edit script into hunks, ordered by increasing baseline start.
///
/// Change regions separated by more than `2 * HUNK_CONTEXT_LINES` unchanged
/// lines become separate hunks; each hunk carries up to `HUNK_CONTEXT_LINES`
/// of surrounding context. An all-context script yields no hunks.
pub fn build_hunks(edits: &[Edit]) -> Vec<Hunk> {
    let changes = edits
        .iter()
        .enumerate()
        .filter(|(_, edit)| edit.tag != LineTag::Context)
        .map(|(i, _)| i)
        .collect::<Vec<_>>();

    if changes.is_empty() {
        return Vec::new();
    }

    let mut groups: Vec<(usize, usize)> = Vec::new();
    for &change in &changes {
        match groups.last_mut() {
            Some((_, last)) if change - *last <= 2 * HUNK_CONTEXT_LINES + 1 => *last = change,
            _ => groups.push((change, change)),
        }
    }

    groups
        .into_iter()
        .map(|(first, last)| {
            let lo = first.saturating_sub(HUNK_CONTEXT_LINES);
            let hi = (last + HUNK_CONTEXT_LINES).min(edits.len() - 1);
            Hunk::from_edits(&edits[lo..=hi])
        })
        .collect()
}
