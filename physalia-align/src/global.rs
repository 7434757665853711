//! Global pairwise alignment with a linear gap penalty.
//!
//! Classic Needleman-Wunsch over a single `(|a|+1) x (|b|+1)` score
//! matrix. Each cell considers three moves: diagonal (match/mismatch
//! scored by the substitution matrix), a gap in `b` (consuming `a`), and
//! a gap in `a` (consuming `b`). Gap cost is per position with no
//! open/extend distinction.
//!
//! Tie-break: when moves tie for the best score, the fill prefers
//! diagonal, then gap-in-`b`, then gap-in-`a`. The chosen move is stored
//! per cell and the traceback replays it, so identical inputs always
//! produce the identical path. The order is observable through the
//! matched-position sets derived downstream and must not change.

use crate::scoring::SubstitutionMatrix;
use crate::types::{AlignmentPath, GAP};

/// One traceback move per DP cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    /// Consume one symbol on each side.
    Diagonal,
    /// Consume `a[i-1]`, emit a gap on the `b` side.
    GapInB,
    /// Consume `b[j-1]`, emit a gap on the `a` side.
    GapInA,
}

/// Align two sequences end-to-end under the given substitution matrix.
///
/// Total function: there are no error conditions. An empty sequence on
/// either side yields a path that is all gaps against the other side,
/// with score `other_len * gap_penalty`; two empty sequences yield the
/// empty path with score 0.
///
/// O(|a|*|b|) time and space.
pub fn align_global(a: &[u8], b: &[u8], matrix: &SubstitutionMatrix) -> AlignmentPath {
    let m = a.len();
    let n = b.len();
    let gap = matrix.gap_penalty();

    let cols = n + 1;
    let mut score = vec![0i32; (m + 1) * cols];
    let mut trace = vec![Move::Diagonal; (m + 1) * cols];

    let idx = |i: usize, j: usize| -> usize { i * cols + j };

    for i in 1..=m {
        score[idx(i, 0)] = i as i32 * gap;
        trace[idx(i, 0)] = Move::GapInB;
    }
    for j in 1..=n {
        score[idx(0, j)] = j as i32 * gap;
        trace[idx(0, j)] = Move::GapInA;
    }

    for i in 1..=m {
        for j in 1..=n {
            let diag = score[idx(i - 1, j - 1)] + matrix.score_pair(a[i - 1], b[j - 1]);
            let up = score[idx(i - 1, j)] + gap; // gap in b
            let left = score[idx(i, j - 1)] + gap; // gap in a

            let (best, mv) = if diag >= up && diag >= left {
                (diag, Move::Diagonal)
            } else if up >= left {
                (up, Move::GapInB)
            } else {
                (left, Move::GapInA)
            };
            score[idx(i, j)] = best;
            trace[idx(i, j)] = mv;
        }
    }

    // Traceback from (m, n), replaying the stored moves
    let mut aligned_a = Vec::with_capacity(m.max(n));
    let mut aligned_b = Vec::with_capacity(m.max(n));
    let mut i = m;
    let mut j = n;

    while i > 0 || j > 0 {
        match trace[idx(i, j)] {
            Move::Diagonal => {
                aligned_a.push(a[i - 1]);
                aligned_b.push(b[j - 1]);
                i -= 1;
                j -= 1;
            }
            Move::GapInB => {
                aligned_a.push(a[i - 1]);
                aligned_b.push(GAP);
                i -= 1;
            }
            Move::GapInA => {
                aligned_a.push(GAP);
                aligned_b.push(b[j - 1]);
                j -= 1;
            }
        }
    }

    aligned_a.reverse();
    aligned_b.reverse();

    AlignmentPath {
        score: score[idx(m, n)],
        aligned_a,
        aligned_b,
    }
}
