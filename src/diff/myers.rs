use derive_new::new;

/// Classification of one diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTag {
    Context,
    Added,
    Removed,
}

/// One step of the edit script. `a_pos`/`b_pos` are the 0-based cursors into
/// the baseline and candidate before this step; an added line does not
/// advance `a_pos` and a removed line does not advance `b_pos`, so hunk
/// building can recover 1-indexed line ranges on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub tag: LineTag,
    pub text: String,
    pub(crate) a_pos: usize,
    pub(crate) b_pos: usize,
}

/// Myers' shortest-edit-script diff over lines.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LineDiff<'d> {
    a: &'d [&'d str],
    b: &'d [&'d str],
}

impl LineDiff<'_> {
    /// Computes the minimal edit script, ordered by baseline position with
    /// removals preceding additions at the same position.
    pub fn edits(&self) -> Vec<Edit> {
        if self.a.is_empty() && self.b.is_empty() {
            return Vec::new();
        }

        let mut edits = self
            .backtrack()
            .into_iter()
            .filter_map(|(prev_x, prev_y, x, y)| self.edit_for_step(prev_x, prev_y, x, y))
            .collect::<Vec<_>>();

        edits.reverse();
        edits
    }

    fn edit_for_step(&self, prev_x: isize, prev_y: isize, x: isize, y: isize) -> Option<Edit> {
        let (a_pos, b_pos) = (prev_x as usize, prev_y as usize);

        if x == prev_x {
            // only y advanced: a line was added from the candidate
            (b_pos < self.b.len()).then(|| Edit {
                tag: LineTag::Added,
                text: self.b[b_pos].to_string(),
                a_pos,
                b_pos,
            })
        } else if y == prev_y {
            // only x advanced: a baseline line was removed
            (a_pos < self.a.len()).then(|| Edit {
                tag: LineTag::Removed,
                text: self.a[a_pos].to_string(),
                a_pos,
                b_pos,
            })
        } else {
            // diagonal: the line is present on both sides
            (a_pos < self.a.len()).then(|| Edit {
                tag: LineTag::Context,
                text: self.a[a_pos].to_string(),
                a_pos,
                b_pos,
            })
        }
    }

    /// Forward pass of the greedy algorithm: one snapshot of the furthest-x
    /// vector per edit distance `d`, stopping once the end of both inputs is
    /// reachable.
    fn shortest_edit_trace(&self) -> Vec<Vec<isize>> {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let offset = (n + m) as usize;

        let mut furthest = vec![0isize; 2 * offset + 1];
        let mut trace = Vec::new();

        for d in 0..=(n + m) {
            trace.push(furthest.clone());

            for k in (-d..=d).step_by(2) {
                let idx = (offset as isize + k) as usize;

                let mut x = if k == -d {
                    // only reachable from k+1, an addition
                    furthest[idx + 1]
                } else if k == d {
                    // only reachable from k-1, a removal
                    furthest[idx - 1] + 1
                } else {
                    // whichever of removal (k-1) and addition (k+1) got further
                    (furthest[idx - 1] + 1).max(furthest[idx + 1])
                };

                let mut y = x - k;
                while x < n && y < m && self.a[x as usize] == self.b[y as usize] {
                    x += 1;
                    y += 1;
                }

                furthest[idx] = x;

                if x >= n && y >= m {
                    return trace;
                }
            }
        }

        trace
    }

    /// Walks the trace backwards from the end of both inputs, yielding one
    /// `(prev_x, prev_y, x, y)` step per line in reverse order.
    fn backtrack(&self) -> Vec<(isize, isize, isize, isize)> {
        let (mut x, mut y) = (self.a.len() as isize, self.b.len() as isize);
        let offset = (x + y) as usize;
        let mut steps = Vec::new();

        let trace = self.shortest_edit_trace();

        for (d, furthest) in trace.iter().enumerate().rev() {
            let k = x - y;

            let prev_k = if k == -(d as isize) {
                k + 1
            } else if k == d as isize {
                k - 1
            } else {
                let from_removal = furthest[(offset as isize + k - 1) as usize] + 1;
                let from_addition = furthest[(offset as isize + k + 1) as usize];
                if from_removal > from_addition { k - 1 } else { k + 1 }
            };

            let prev_x = furthest[(offset as isize + prev_k) as usize];
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                steps.push((x - 1, y - 1, x, y));
                x -= 1;
                y -= 1;
            }

            if d > 0 {
                steps.push((prev_x, prev_y, x, y));
            }

            (x, y) = (prev_x, prev_y);
        }

        steps
    }
}
