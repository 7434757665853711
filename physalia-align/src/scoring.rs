//! Substitution matrices for residue alignment.
//!
//! Provides the standard BLOSUM62 amino acid matrix ([`ProteinMatrix`]),
//! a simple match/mismatch matrix for nucleic acids and generic polymers
//! ([`IdentityMatrix`]), and a unified [`SubstitutionMatrix`] selected by
//! [`MoleculeClass`]. All matrices use a linear gap model: one per-position
//! penalty, with no open/extend distinction.

use physalia_core::{PhysaliaError, Result};

/// Coarse molecule classification used to select a substitution matrix.
///
/// Selection considers only the class supplied by the caller (derived from
/// the first structure of a pair); mismatched classes between the two sides
/// are not detected. Foreign alphabets degrade to the worst score in the
/// chosen matrix rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoleculeClass {
    /// Polypeptides — scored with BLOSUM62.
    Protein,
    /// Nucleic acids, ligands, generic polymers, and anything unrecognized.
    Other,
}

// ---------------------------------------------------------------------------
// Simple scoring (non-protein polymers)
// ---------------------------------------------------------------------------

/// A simple match/mismatch matrix with a linear gap penalty.
///
/// Suitable when no substitution statistics apply: all matches score the
/// same and all mismatches score the same.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdentityMatrix {
    pub match_score: i32,
    pub mismatch_score: i32,
    /// Per-position gap penalty (negative).
    pub gap: i32,
}

impl IdentityMatrix {
    /// Create a new identity matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if `match_score` is not positive or if
    /// `mismatch_score`/`gap` are not negative.
    pub fn new(match_score: i32, mismatch_score: i32, gap: i32) -> Result<Self> {
        if match_score <= 0 {
            return Err(PhysaliaError::InvalidInput(
                "match_score must be positive".into(),
            ));
        }
        if mismatch_score >= 0 {
            return Err(PhysaliaError::InvalidInput(
                "mismatch_score must be negative".into(),
            ));
        }
        if gap >= 0 {
            return Err(PhysaliaError::InvalidInput("gap must be negative".into()));
        }
        Ok(Self {
            match_score,
            mismatch_score,
            gap,
        })
    }

    /// Default scoring for generic polymers: +5 match, -3 mismatch, -10 gap.
    pub fn default_scores() -> Self {
        Self {
            match_score: 5,
            mismatch_score: -3,
            gap: -10,
        }
    }

    /// Score a pair of residue codes. Case-insensitive.
    pub fn score_pair(&self, a: u8, b: u8) -> i32 {
        if a.eq_ignore_ascii_case(&b) {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

// ---------------------------------------------------------------------------
// Amino acid index mapping
// ---------------------------------------------------------------------------

/// Maps an amino acid letter to a 0-based index in the substitution table.
///
/// Standard 20 amino acids + B (Asx), Z (Glx), X (unknown), * (stop).
/// Returns `None` for unrecognized characters.
fn aa_to_index(aa: u8) -> Option<usize> {
    match aa.to_ascii_uppercase() {
        b'A' => Some(0),
        b'R' => Some(1),
        b'N' => Some(2),
        b'D' => Some(3),
        b'C' => Some(4),
        b'Q' => Some(5),
        b'E' => Some(6),
        b'G' => Some(7),
        b'H' => Some(8),
        b'I' => Some(9),
        b'L' => Some(10),
        b'K' => Some(11),
        b'M' => Some(12),
        b'F' => Some(13),
        b'P' => Some(14),
        b'S' => Some(15),
        b'T' => Some(16),
        b'W' => Some(17),
        b'Y' => Some(18),
        b'V' => Some(19),
        b'B' => Some(20),
        b'Z' => Some(21),
        b'X' => Some(22),
        b'*' => Some(23),
        _ => None,
    }
}

/// Matrix dimension: 24 amino acid symbols.
const AA_DIM: usize = 24;

// ---------------------------------------------------------------------------
// Protein substitution matrix
// ---------------------------------------------------------------------------

/// An amino acid substitution matrix with a linear gap penalty.
///
/// Stores a 24x24 lookup table covering the 20 standard amino acids plus
/// B (Asx), Z (Glx), X (unknown), and * (stop codon).
#[derive(Debug, Clone)]
pub struct ProteinMatrix {
    /// 24x24 flattened score table (row-major).
    scores: &'static [i32; AA_DIM * AA_DIM],
    /// Per-position gap penalty (negative).
    pub gap: i32,
    name: &'static str,
}

impl ProteinMatrix {
    /// BLOSUM62 substitution matrix with linear gap penalty -10.
    pub fn blosum62() -> Self {
        Self {
            scores: &BLOSUM62,
            gap: -10,
            name: "BLOSUM62",
        }
    }

    /// Score a pair of amino acids. Case-insensitive.
    ///
    /// Returns the worst score in the table for unrecognized residues.
    pub fn score_pair(&self, a: u8, b: u8) -> i32 {
        match (aa_to_index(a), aa_to_index(b)) {
            (Some(i), Some(j)) => self.scores[i * AA_DIM + j],
            _ => self.worst_score(),
        }
    }

    fn worst_score(&self) -> i32 {
        self.scores.iter().copied().min().unwrap_or(-4)
    }

    /// Matrix name (e.g. "BLOSUM62").
    pub fn name(&self) -> &str {
        self.name
    }
}

// ---------------------------------------------------------------------------
// Unified matrix
// ---------------------------------------------------------------------------

/// A unified substitution matrix accepted by the alignment engine.
#[derive(Debug, Clone)]
pub enum SubstitutionMatrix {
    /// Simple match/mismatch scoring (nucleic acids, generic polymers).
    Identity(IdentityMatrix),
    /// Amino acid substitution scoring (BLOSUM62).
    Protein(ProteinMatrix),
}

impl SubstitutionMatrix {
    /// Select the matrix for a molecule class.
    ///
    /// Total: [`MoleculeClass::Other`] (the fallback for anything that is
    /// not a protein) maps to the default identity matrix.
    pub fn for_class(class: MoleculeClass) -> Self {
        match class {
            MoleculeClass::Protein => SubstitutionMatrix::Protein(ProteinMatrix::blosum62()),
            MoleculeClass::Other => SubstitutionMatrix::Identity(IdentityMatrix::default_scores()),
        }
    }

    /// Score a pair of residue codes under this matrix.
    pub fn score_pair(&self, a: u8, b: u8) -> i32 {
        match self {
            SubstitutionMatrix::Identity(m) => m.score_pair(a, b),
            SubstitutionMatrix::Protein(m) => m.score_pair(a, b),
        }
    }

    /// Per-position gap penalty (negative).
    pub fn gap_penalty(&self) -> i32 {
        match self {
            SubstitutionMatrix::Identity(m) => m.gap,
            SubstitutionMatrix::Protein(m) => m.gap,
        }
    }
}

impl From<IdentityMatrix> for SubstitutionMatrix {
    fn from(m: IdentityMatrix) -> Self {
        SubstitutionMatrix::Identity(m)
    }
}

impl From<ProteinMatrix> for SubstitutionMatrix {
    fn from(m: ProteinMatrix) -> Self {
        SubstitutionMatrix::Protein(m)
    }
}

// ===========================================================================
// NCBI substitution matrix data
// Row/column order: A R N D C Q E G H I L K M F P S T W Y V B Z X *
// ===========================================================================

/// BLOSUM62 — 24x24 flattened, NCBI reference.
#[rustfmt::skip]
const BLOSUM62: [i32; AA_DIM * AA_DIM] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4, // A
    -1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4, // R
    -2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4, // N
    -2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4, // D
     0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4, // C
    -1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4, // Q
    -1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // E
     0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4, // G
    -2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4, // H
    -1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4, // I
    -1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4, // L
    -1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4, // K
    -1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4, // M
    -2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4, // F
    -1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4, // P
     1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4, // S
     0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4, // T
    -3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4, // W
    -2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4, // Y
     0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4, // V
    -2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4, // B
    -1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // Z
     0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4, // X
    -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1, // *
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_defaults() {
        let m = IdentityMatrix::default_scores();
        assert_eq!(m.match_score, 5);
        assert_eq!(m.mismatch_score, -3);
        assert_eq!(m.gap, -10);
    }

    #[test]
    fn identity_score_pair_case_insensitive() {
        let m = IdentityMatrix::default_scores();
        assert_eq!(m.score_pair(b'A', b'A'), 5);
        assert_eq!(m.score_pair(b'a', b'A'), 5);
        assert_eq!(m.score_pair(b'A', b'G'), -3);
    }

    #[test]
    fn identity_validation() {
        assert!(IdentityMatrix::new(0, -3, -10).is_err());
        assert!(IdentityMatrix::new(5, 0, -10).is_err());
        assert!(IdentityMatrix::new(5, -3, 0).is_err());
        assert!(IdentityMatrix::new(5, -3, -10).is_ok());
    }

    #[test]
    fn blosum62_diagonal_spot_checks() {
        let m = ProteinMatrix::blosum62();
        assert_eq!(m.score_pair(b'A', b'A'), 4);
        assert_eq!(m.score_pair(b'W', b'W'), 11);
        assert_eq!(m.score_pair(b'R', b'R'), 5);
        // Case insensitive
        assert_eq!(m.score_pair(b'a', b'a'), 4);
    }

    #[test]
    fn blosum62_symmetry() {
        let m = ProteinMatrix::blosum62();
        assert_eq!(m.score_pair(b'A', b'R'), -1);
        assert_eq!(m.score_pair(b'R', b'A'), -1);
        assert_eq!(m.score_pair(b'D', b'E'), m.score_pair(b'E', b'D'));
    }

    #[test]
    fn blosum62_gap_penalty() {
        let m = ProteinMatrix::blosum62();
        assert_eq!(m.gap, -10);
        assert_eq!(m.name(), "BLOSUM62");
    }

    #[test]
    fn unrecognized_residue_returns_worst() {
        let m = ProteinMatrix::blosum62();
        let worst = m.worst_score();
        assert_eq!(m.score_pair(b'?', b'A'), worst);
        assert_eq!(worst, -4);
    }

    #[test]
    fn for_class_selection() {
        match SubstitutionMatrix::for_class(MoleculeClass::Protein) {
            SubstitutionMatrix::Protein(m) => assert_eq!(m.name(), "BLOSUM62"),
            _ => panic!("protein class must select the protein matrix"),
        }
        match SubstitutionMatrix::for_class(MoleculeClass::Other) {
            SubstitutionMatrix::Identity(m) => assert_eq!(m.match_score, 5),
            _ => panic!("other class must select the identity matrix"),
        }
    }

    #[test]
    fn unified_delegation() {
        let protein = SubstitutionMatrix::for_class(MoleculeClass::Protein);
        assert_eq!(protein.score_pair(b'W', b'W'), 11);
        assert_eq!(protein.gap_penalty(), -10);

        let other = SubstitutionMatrix::for_class(MoleculeClass::Other);
        assert_eq!(other.score_pair(b'G', b'G'), 5);
        assert_eq!(other.gap_penalty(), -10);
    }

    #[test]
    fn from_conversions() {
        let _m: SubstitutionMatrix = IdentityMatrix::default_scores().into();
        let _m: SubstitutionMatrix = ProteinMatrix::blosum62().into();
    }
}
