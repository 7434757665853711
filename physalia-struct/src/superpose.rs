//! End-to-end alignment and superposition of residue lists.
//!
//! Orchestrates the full pipeline: matrix selection, global sequence
//! alignment, alignment-to-index mapping, coordinate extraction, and the
//! rigid fit. Every call is a pure function of its inputs; independent
//! pairs may be processed concurrently with no coordination.

use physalia_align::{align_global, MoleculeClass, SubstitutionMatrix};
use physalia_core::{PhysaliaError, Result, Scored, Summarizable};

use crate::mapping::{extract_coordinates, matched_positions};
use crate::superposition::superpose_points;
use crate::types::{residue_codes, Point3D, Residue};

/// The combined result of sequence alignment plus rigid superposition.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Superposition {
    /// 3x3 rotation matrix (row-major) to apply to structure A.
    pub rotation: [[f64; 3]; 3],
    /// Translation to apply to structure A after rotation.
    pub translation: Point3D,
    /// RMSD over the matched representative atoms after the fit.
    pub rmsd: f64,
    /// Raw global alignment score (not length-normalized).
    pub alignment_score: i32,
    /// Number of matched residue pairs that entered the fit.
    pub aligned_len: usize,
}

impl Superposition {
    /// Rotation as a flat row-major array.
    pub fn rotation_flat(&self) -> [f64; 9] {
        let r = &self.rotation;
        [
            r[0][0], r[0][1], r[0][2], r[1][0], r[1][1], r[1][2], r[2][0], r[2][1], r[2][2],
        ]
    }
}

impl Scored for Superposition {
    fn score(&self) -> f64 {
        -self.rmsd
    }
}

impl Summarizable for Superposition {
    fn summary(&self) -> String {
        format!(
            "superposed {} residue pair(s), RMSD {:.3}, alignment score {}",
            self.aligned_len, self.rmsd, self.alignment_score
        )
    }
}

/// Align two residue lists by sequence and superpose the matched
/// representative atoms.
///
/// `residues_a` is the mobile side: applying the returned rotation and
/// translation to structure A brings it onto structure B. The molecule
/// class is taken as supplied (by convention derived from the first
/// structure); both sides are scored under the matrix it selects.
///
/// # Errors
///
/// Returns [`PhysaliaError::NoAlignableResidues`] when no matched pair
/// with coordinates on both sides survives the alignment, and
/// [`PhysaliaError::Inconsistent`] if the inputs contradict the computed
/// alignment path (a caller bug, never recoverable).
pub fn align_and_superpose(
    residues_a: &[Residue],
    residues_b: &[Residue],
    class: MoleculeClass,
) -> Result<Superposition> {
    let matrix = SubstitutionMatrix::for_class(class);
    let path = align_global(
        &residue_codes(residues_a),
        &residue_codes(residues_b),
        &matrix,
    );

    let matched = matched_positions(&path, residues_a, residues_b)?;
    if matched.is_empty() {
        return Err(PhysaliaError::NoAlignableResidues);
    }

    let points_a = extract_coordinates(residues_a, &matched.a)?;
    let points_b = extract_coordinates(residues_b, &matched.b)?;
    let fit = superpose_points(&points_a, &points_b)?;

    Ok(Superposition {
        rotation: fit.rotation,
        translation: fit.translation,
        rmsd: fit.rmsd,
        alignment_score: path.score,
        aligned_len: matched.len(),
    })
}

/// Superpose several mobile targets onto one reference.
///
/// Each target is aligned and fitted independently against `reference`;
/// results are returned in input order. The first failure aborts the
/// batch.
pub fn align_and_superpose_many(
    reference: &[Residue],
    targets: &[&[Residue]],
    class: MoleculeClass,
) -> Result<Vec<Superposition>> {
    targets
        .iter()
        .map(|target| align_and_superpose(target, reference, class))
        .collect()
}
