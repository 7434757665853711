//! Structural superposition for physalia.
//!
//! Aligns two residue lists by sequence with a class-appropriate
//! substitution matrix, maps the alignment back to coordinate-bearing
//! residues, and computes the optimal rigid-body fit (Kabsch) with its
//! RMSD. Inputs arrive as plain [`Residue`] snapshots so any structure
//! provider can feed the pipeline.
//!
//! # Example
//!
//! ```
//! use physalia_align::MoleculeClass;
//! use physalia_struct::{align_and_superpose, Point3D, Residue};
//!
//! let a: Vec<Residue> = "MKV"
//!     .chars()
//!     .enumerate()
//!     .map(|(i, c)| {
//!         Residue::new(c.to_string(), i as i32 + 1, Some(Point3D::new(i as f64 * 3.8, 0.0, 0.0)))
//!     })
//!     .collect();
//! let result = align_and_superpose(&a, &a, MoleculeClass::Protein).unwrap();
//! assert_eq!(result.aligned_len, 3);
//! assert!(result.rmsd < 1e-9);
//! ```

mod linalg;
pub mod mapping;
pub mod superpose;
pub mod superposition;
pub mod types;

pub use mapping::{extract_coordinates, matched_positions, MatchedPositions};
pub use superpose::{align_and_superpose, align_and_superpose_many, Superposition};
pub use superposition::{superpose_points, RigidFit};
pub use types::{one_letter_code, residue_codes, Point3D, Residue};

#[cfg(test)]
mod proptests {
    use super::*;
    use physalia_align::MoleculeClass;
    use proptest::prelude::*;

    const AA: &[u8] = b"ARNDCQEGHILKMFPSTWYV";

    fn arb_structure(max_len: usize) -> impl Strategy<Value = Vec<Residue>> {
        prop::collection::vec(
            (0..AA.len(), prop::option::weighted(0.9, (0.0f64..50.0, 0.0f64..50.0, 0.0f64..50.0))),
            1..=max_len,
        )
        .prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (aa, coord))| {
                    Residue::new(
                        (AA[aa] as char).to_string(),
                        i as i32 + 1,
                        coord.map(|(x, y, z)| Point3D::new(x, y, z)),
                    )
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn superposition_never_panics(a in arb_structure(24), b in arb_structure(24)) {
            let _ = align_and_superpose(&a, &b, MoleculeClass::Protein);
        }

        #[test]
        fn rotation_is_always_orthonormal(a in arb_structure(16), b in arb_structure(16)) {
            if let Ok(result) = align_and_superpose(&a, &b, MoleculeClass::Protein) {
                let r = result.rotation;
                for i in 0..3 {
                    for j in 0..3 {
                        let dot: f64 = (0..3).map(|k| r[k][i] * r[k][j]).sum();
                        let expected = if i == j { 1.0 } else { 0.0 };
                        prop_assert!((dot - expected).abs() < 1e-6);
                    }
                }
            }
        }

        #[test]
        fn rmsd_is_nonnegative_and_finite(a in arb_structure(16), b in arb_structure(16)) {
            if let Ok(result) = align_and_superpose(&a, &b, MoleculeClass::Protein) {
                prop_assert!(result.rmsd.is_finite());
                prop_assert!(result.rmsd >= 0.0);
            }
        }

        #[test]
        fn self_superposition_is_exact(a in arb_structure(16)) {
            match align_and_superpose(&a, &a, MoleculeClass::Protein) {
                Ok(result) => prop_assert!(result.rmsd < 1e-6),
                Err(e) => prop_assert!(matches!(
                    e,
                    physalia_core::PhysaliaError::NoAlignableResidues
                )),
            }
        }
    }
}
