//! Bridging gapped alignment paths back to residue-list indices.
//!
//! The alignment engine works on dense one-letter sequences; structures
//! live in residue lists where the representative atom may be absent.
//! This module walks an [`AlignmentPath`] column by column with one
//! cursor per side and records the pairs of original-list indices that
//! are matched in the alignment and carry coordinates on both sides.

use physalia_align::{AlignmentPath, GAP};
use physalia_core::{PhysaliaError, Result};

use crate::types::{Point3D, Residue};

/// Matched residue positions: `a[k]` pairs with `b[k]`.
///
/// Both index vectors have equal length and are strictly increasing, and
/// every indexed residue is guaranteed to carry a representative-atom
/// coordinate.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchedPositions {
    /// Indices into the first residue list.
    pub a: Vec<usize>,
    /// Indices into the second residue list.
    pub b: Vec<usize>,
}

impl MatchedPositions {
    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Whether no pair survived filtering.
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

/// Walk an alignment path against the two residue lists it was computed
/// from and collect the matched, coordinate-bearing position pairs.
///
/// Each cursor advances exactly once per non-gap symbol on its side. A
/// pair is recorded only when the column is non-gap on both sides and
/// both residues have a coordinate; pairs with a missing coordinate are
/// skipped without disturbing the cursors, so later indices stay correct.
///
/// # Errors
///
/// Returns [`PhysaliaError::Inconsistent`] when the path's non-gap symbol
/// counts do not reconcile with the residue list lengths. That means the
/// caller paired a path with the wrong residue lists; truncating silently
/// would corrupt the superposition, so this fails loudly instead.
pub fn matched_positions(
    path: &AlignmentPath,
    residues_a: &[Residue],
    residues_b: &[Residue],
) -> Result<MatchedPositions> {
    if path.aligned_a.len() != path.aligned_b.len() {
        return Err(PhysaliaError::Inconsistent(format!(
            "alignment sides differ in length: {} vs {}",
            path.aligned_a.len(),
            path.aligned_b.len()
        )));
    }

    let mut cursor_a = 0usize;
    let mut cursor_b = 0usize;
    let mut matched = MatchedPositions::default();

    for col in 0..path.len() {
        let take_a = path.aligned_a[col] != GAP;
        let take_b = path.aligned_b[col] != GAP;

        if take_a && cursor_a >= residues_a.len() {
            return Err(PhysaliaError::Inconsistent(format!(
                "alignment consumes more than {} residues on side A",
                residues_a.len()
            )));
        }
        if take_b && cursor_b >= residues_b.len() {
            return Err(PhysaliaError::Inconsistent(format!(
                "alignment consumes more than {} residues on side B",
                residues_b.len()
            )));
        }

        if take_a && take_b && residues_a[cursor_a].has_coord() && residues_b[cursor_b].has_coord()
        {
            matched.a.push(cursor_a);
            matched.b.push(cursor_b);
        }

        if take_a {
            cursor_a += 1;
        }
        if take_b {
            cursor_b += 1;
        }
    }

    if cursor_a != residues_a.len() || cursor_b != residues_b.len() {
        return Err(PhysaliaError::Inconsistent(format!(
            "alignment consumed {cursor_a}/{} residues on side A and {cursor_b}/{} on side B",
            residues_a.len(),
            residues_b.len()
        )));
    }

    Ok(matched)
}

/// Gather representative-atom coordinates for one matched side.
///
/// # Errors
///
/// Returns [`PhysaliaError::Inconsistent`] on an out-of-range index or an
/// absent coordinate; [`matched_positions`] guarantees neither can occur,
/// so either means the positions were not produced from these residues.
pub fn extract_coordinates(residues: &[Residue], positions: &[usize]) -> Result<Vec<Point3D>> {
    positions
        .iter()
        .map(|&i| {
            residues.get(i).and_then(|r| r.coord).ok_or_else(|| {
                PhysaliaError::Inconsistent(format!("matched position {i} has no coordinate"))
            })
        })
        .collect()
}
