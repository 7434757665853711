//! Core types for global alignment paths.

/// Gap symbol used in aligned sequences.
pub const GAP: u8 = b'-';

/// The result of a global pairwise alignment: both input sequences padded
/// with [`GAP`] symbols to a common length, plus the raw DP score.
///
/// Invariant: stripping every gap from `aligned_a` (resp. `aligned_b`)
/// reproduces the first (resp. second) input sequence exactly, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentPath {
    /// Score from the final DP cell (not normalized by length).
    pub score: i32,
    /// First sequence with `-` for gaps.
    pub aligned_a: Vec<u8>,
    /// Second sequence with `-` for gaps.
    pub aligned_b: Vec<u8>,
}

impl AlignmentPath {
    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.aligned_a.len()
    }

    /// Whether the alignment has no columns (both inputs were empty).
    pub fn is_empty(&self) -> bool {
        self.aligned_a.is_empty()
    }

    /// First input sequence with gaps removed.
    pub fn ungapped_a(&self) -> Vec<u8> {
        self.aligned_a.iter().copied().filter(|&c| c != GAP).collect()
    }

    /// Second input sequence with gaps removed.
    pub fn ungapped_b(&self) -> Vec<u8> {
        self.aligned_b.iter().copied().filter(|&c| c != GAP).collect()
    }

    /// Whether no column carries a gap on either side.
    pub fn is_gap_free(&self) -> bool {
        !self.aligned_a.contains(&GAP) && !self.aligned_b.contains(&GAP)
    }

    /// Number of columns where both sides carry the same residue code.
    /// Case-insensitive; gap columns never count.
    pub fn matches(&self) -> usize {
        self.aligned_a
            .iter()
            .zip(&self.aligned_b)
            .filter(|(&a, &b)| a != GAP && a.eq_ignore_ascii_case(&b))
            .count()
    }

    /// Fraction of columns that are exact matches, in `[0.0, 1.0]`.
    ///
    /// Returns 0.0 for an empty alignment.
    pub fn identity(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.matches() as f64 / self.len() as f64
    }
}

impl physalia_core::Scored for AlignmentPath {
    fn score(&self) -> f64 {
        self.score as f64
    }
}
