//! Core types for residue lists and 3D coordinates.

/// A point in 3D Cartesian space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    /// Create a new point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin.
    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point3D) -> f64 {
        self.sub(other).norm()
    }

    /// Dot product.
    pub fn dot(&self, other: &Point3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    pub fn cross(&self, other: &Point3D) -> Point3D {
        Point3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Vector magnitude.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or zero if magnitude is zero.
    pub fn normalize(&self) -> Point3D {
        let n = self.norm();
        if n < 1e-15 {
            Point3D::zero()
        } else {
            self.scale(1.0 / n)
        }
    }

    /// Vector addition.
    pub fn add(&self, other: &Point3D) -> Point3D {
        Point3D {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    /// Vector subtraction.
    pub fn sub(&self, other: &Point3D) -> Point3D {
        Point3D {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// Scalar multiplication.
    pub fn scale(&self, s: f64) -> Point3D {
        Point3D {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Whether all three components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A residue snapshot as supplied by a structure provider.
///
/// Carries the monomer code, a stable identifier (sequence number plus
/// optional insertion code), and the position of the representative atom
/// (e.g. the alpha-carbon), or `None` when that atom is absent in this
/// residue. The core borrows these read-only for the duration of one
/// alignment call and never mutates them.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Residue {
    /// One- or three-letter monomer code (e.g. "A", "ALA", "DG").
    pub code: String,
    /// Author sequence number.
    pub seq_num: i32,
    /// Insertion code.
    pub i_code: Option<char>,
    /// Representative-atom coordinates, if present.
    pub coord: Option<Point3D>,
}

impl Residue {
    /// Create a new residue snapshot.
    pub fn new(code: impl Into<String>, seq_num: i32, coord: Option<Point3D>) -> Self {
        Self {
            code: code.into(),
            seq_num,
            i_code: None,
            coord,
        }
    }

    /// Attach an insertion code.
    pub fn with_insertion_code(mut self, i_code: char) -> Self {
        self.i_code = Some(i_code);
        self
    }

    /// One-letter code used for sequence alignment.
    pub fn one_letter(&self) -> u8 {
        one_letter_code(&self.code)
    }

    /// Whether the representative atom is present.
    pub fn has_coord(&self) -> bool {
        self.coord.is_some()
    }
}

/// Normalize a residue code to a one-letter alignment symbol.
///
/// One-letter codes pass through uppercased. Standard three-letter amino
/// acid names are mapped (plus MSE, ASX, GLX, UNK), as are the two-letter
/// deoxynucleotide names DA/DC/DG/DT/DU. Anything else becomes `b'X'`.
pub fn one_letter_code(code: &str) -> u8 {
    let code = code.trim();
    if code.len() == 1 {
        return code.as_bytes()[0].to_ascii_uppercase();
    }
    let upper = code.to_ascii_uppercase();
    match upper.as_str() {
        "ALA" => b'A',
        "ARG" => b'R',
        "ASN" => b'N',
        "ASP" => b'D',
        "CYS" => b'C',
        "GLN" => b'Q',
        "GLU" => b'E',
        "GLY" => b'G',
        "HIS" => b'H',
        "ILE" => b'I',
        "LEU" => b'L',
        "LYS" => b'K',
        "MET" => b'M',
        "PHE" => b'F',
        "PRO" => b'P',
        "SER" => b'S',
        "THR" => b'T',
        "TRP" => b'W',
        "TYR" => b'Y',
        "VAL" => b'V',
        // Selenomethionine is aligned as methionine
        "MSE" => b'M',
        "ASX" => b'B',
        "GLX" => b'Z',
        "UNK" => b'X',
        "DA" | "DC" | "DG" | "DT" | "DU" => upper.as_bytes()[1],
        _ => b'X',
    }
}

/// Extract the alignment sequence from an ordered residue list.
///
/// Position `i` of the result corresponds to `residues[i]`; the output
/// always has the same length as the input, regardless of missing
/// coordinates.
pub fn residue_codes(residues: &[Residue]) -> Vec<u8> {
    residues.iter().map(Residue::one_letter).collect()
}
