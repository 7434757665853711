//! Sequence alignment for the Physalia structural alignment engine.
//!
//! Provides global (Needleman-Wunsch) pairwise alignment under a linear
//! gap model, with BLOSUM62 scoring for proteins and identity scoring for
//! everything else, selected by [`MoleculeClass`].
//!
//! # Quick start
//!
//! ```
//! use physalia_align::{align_global, MoleculeClass, SubstitutionMatrix};
//!
//! let matrix = SubstitutionMatrix::for_class(MoleculeClass::Protein);
//! let path = align_global(b"ARND", b"ARND", &matrix);
//! assert_eq!(path.score, 21);
//! assert!(path.is_gap_free());
//! ```

pub mod global;
pub mod scoring;
pub mod types;

pub use global::align_global;
pub use scoring::{IdentityMatrix, MoleculeClass, ProteinMatrix, SubstitutionMatrix};
pub use types::{AlignmentPath, GAP};
