use super::matrix::{argmax, ScoreMatrix};

/// Jump costs applied between consecutive segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpPenalty {
    pub per_page: f64,
    pub backward_weight: f64,
}

impl JumpPenalty {
    pub fn new(per_page: f64, backward_weight: f64) -> Self {
        Self {
            per_page,
            backward_weight,
        }
    }

    /// Cost of moving from page `from` on the previous segment to page `to`.
    ///
    /// Staying put and advancing by exactly one page are free. Forward skips
    /// pay per skipped page; backward moves pay per page, times
    /// `backward_weight`.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        if from < to {
            (to - from - 1) as f64 * self.per_page
        } else if from > to {
            (from - to) as f64 * self.per_page * self.backward_weight
        } else {
            0.0
        }
    }
}

/// Full DP output: the optimal path plus the tables it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Zero-based page per segment.
    pub path: Vec<usize>,
    /// Accumulated `dp[i][j]`, row-major `rows × cols`.
    pub dp: Vec<f64>,
    /// Predecessor page for each cell; row 0 is all zeros.
    pub trace: Vec<usize>,
    /// `max_j dp[rows-1][j]`.
    pub path_score: f64,
    pub cols: usize,
}

impl Solution {
    pub fn dp_row(&self, row: usize) -> &[f64] {
        &self.dp[row * self.cols..(row + 1) * self.cols]
    }
}

/// Finds the page path maximizing summed scores net of jump penalties.
///
/// O(rows · cols²) time, O(rows · cols) space. Ties between predecessors
/// and in the final column pick go to the lowest page index.
pub fn solve(scores: &ScoreMatrix, penalty: &JumpPenalty) -> Solution {
    let n = scores.rows();
    let m = scores.cols();

    let mut dp = vec![f64::NEG_INFINITY; n * m];
    let mut trace = vec![0usize; n * m];

    dp[..m].copy_from_slice(scores.row(0));

    for i in 1..n {
        let row = scores.row(i);
        let prev_offset = (i - 1) * m;
        let offset = i * m;
        for j in 0..m {
            let (best, from) = best_predecessor(&dp[prev_offset..offset], row[j], j, penalty);
            dp[offset + j] = best;
            trace[offset + j] = from;
        }
    }

    let last_offset = (n - 1) * m;
    let last = &dp[last_offset..];
    let mut page = argmax(last);
    let path_score = last[page];

    let mut path = vec![0usize; n];
    path[n - 1] = page;
    for i in (1..n).rev() {
        page = trace[i * m + page];
        path[i - 1] = page;
    }

    tracing::debug!(segments = n, pages = m, path_score, "DP alignment solved");

    Solution {
        path,
        dp,
        trace,
        path_score,
        cols: m,
    }
}

/// Evaluated as `dp[i-1][k] + score - cost` in that order, so candidates
/// that tie exactly keep the lowest `k`.
#[inline(always)]
fn best_predecessor(prev: &[f64], score: f64, to: usize, penalty: &JumpPenalty) -> (f64, usize) {
    let mut best = f64::NEG_INFINITY;
    let mut from = 0usize;
    for (k, &value) in prev.iter().enumerate() {
        let cand = value + score - penalty.cost(k, to);
        if cand > best {
            best = cand;
            from = k;
        }
    }
    (best, from)
}
