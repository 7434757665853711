//! Private 3x3 linear algebra for rigid superposition.
//!
//! Implements a Jacobi eigenvalue algorithm and SVD decomposition for 3x3
//! matrices without requiring an external linear algebra crate. Columns of
//! `U` belonging to vanishing singular values are reconstructed so that
//! `U` stays orthonormal even for rank-deficient input (collinear or
//! coplanar point sets).

use crate::types::Point3D;

/// Singular values below this are treated as zero.
const SV_TOL: f64 = 1e-10;

/// A 3x3 matrix stored in row-major order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Matrix3x3 {
    pub data: [[f64; 3]; 3],
}

impl Matrix3x3 {
    /// Zero matrix.
    pub fn zeros() -> Self {
        Self {
            data: [[0.0; 3]; 3],
        }
    }

    /// Identity matrix.
    pub fn identity() -> Self {
        Self {
            data: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Matrix multiplication: self * other.
    pub fn multiply(&self, other: &Matrix3x3) -> Matrix3x3 {
        let mut result = Matrix3x3::zeros();
        for i in 0..3 {
            for j in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += self.data[i][k] * other.data[k][j];
                }
                result.data[i][j] = sum;
            }
        }
        result
    }

    /// Transpose.
    pub fn transpose(&self) -> Matrix3x3 {
        let mut result = Matrix3x3::zeros();
        for i in 0..3 {
            for j in 0..3 {
                result.data[i][j] = self.data[j][i];
            }
        }
        result
    }

    /// Determinant.
    pub fn determinant(&self) -> f64 {
        let d = &self.data;
        d[0][0] * (d[1][1] * d[2][2] - d[1][2] * d[2][1])
            - d[0][1] * (d[1][0] * d[2][2] - d[1][2] * d[2][0])
            + d[0][2] * (d[1][0] * d[2][1] - d[1][1] * d[2][0])
    }

    /// Apply this matrix to a point: M * p.
    pub fn apply(&self, p: &Point3D) -> Point3D {
        Point3D {
            x: self.data[0][0] * p.x + self.data[0][1] * p.y + self.data[0][2] * p.z,
            y: self.data[1][0] * p.x + self.data[1][1] * p.y + self.data[1][2] * p.z,
            z: self.data[2][0] * p.x + self.data[2][1] * p.y + self.data[2][2] * p.z,
        }
    }

    fn column(&self, col: usize) -> Point3D {
        Point3D::new(self.data[0][col], self.data[1][col], self.data[2][col])
    }

    fn set_column(&mut self, col: usize, v: &Point3D) {
        self.data[0][col] = v.x;
        self.data[1][col] = v.y;
        self.data[2][col] = v.z;
    }
}

/// Result of a 3x3 SVD decomposition: A = U * diag(s) * Vt.
#[derive(Debug, Clone)]
pub(crate) struct Svd3x3 {
    pub u: Matrix3x3,
    pub s: [f64; 3],
    pub vt: Matrix3x3,
}

/// Compute the SVD of a 3x3 matrix via the Jacobi eigenvalue method.
///
/// A^T*A is symmetric positive semi-definite; its Jacobi eigendecomposition
/// gives V and the squared singular values, and U is recovered as
/// A*V*S^{-1}. Singular values are sorted descending.
pub(crate) fn svd_3x3(matrix: &Matrix3x3) -> Svd3x3 {
    let ata = matrix.transpose().multiply(matrix);
    let (eigenvectors, eigenvalues) = jacobi_eigenvalue(&ata);

    // Sort by descending singular value
    let mut indices = [0usize, 1, 2];
    indices.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

    let mut s = [0.0f64; 3];
    let mut v = Matrix3x3::zeros();
    for (col, &idx) in indices.iter().enumerate() {
        s[col] = eigenvalues[idx].max(0.0).sqrt();
        v.set_column(col, &eigenvectors.column(idx));
    }

    // U = A * V * S^{-1} for the well-determined columns
    let av = matrix.multiply(&v);
    let mut u = Matrix3x3::zeros();
    let mut filled = [false; 3];
    for col in 0..3 {
        if s[col] > SV_TOL {
            u.set_column(col, &av.column(col).scale(1.0 / s[col]));
            filled[col] = true;
        }
    }
    complete_orthonormal(&mut u, &mut filled);

    Svd3x3 {
        u,
        s,
        vt: v.transpose(),
    }
}

/// Fill the unfilled columns of `u` with unit vectors orthogonal to every
/// filled column. For each missing column the coordinate axis with the
/// largest residual after projection is chosen, which keeps the result
/// deterministic for degenerate inputs.
fn complete_orthonormal(u: &mut Matrix3x3, filled: &mut [bool; 3]) {
    const AXES: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    for col in 0..3 {
        if filled[col] {
            continue;
        }
        let mut best = Point3D::zero();
        let mut best_norm = -1.0;
        for axis in AXES {
            let mut cand = Point3D::new(axis[0], axis[1], axis[2]);
            for other in 0..3 {
                if !filled[other] {
                    continue;
                }
                let basis = u.column(other);
                cand = cand.sub(&basis.scale(cand.dot(&basis)));
            }
            let n = cand.norm();
            if n > best_norm {
                best_norm = n;
                best = cand;
            }
        }
        u.set_column(col, &best.normalize());
        filled[col] = true;
    }
}

/// Jacobi eigenvalue algorithm for a 3x3 symmetric matrix.
///
/// Returns (eigenvectors as columns of a matrix, eigenvalues).
fn jacobi_eigenvalue(matrix: &Matrix3x3) -> (Matrix3x3, [f64; 3]) {
    let mut a = *matrix;
    let mut v = Matrix3x3::identity();

    let max_iter = 100;
    let tol = 1e-15;

    for _ in 0..max_iter {
        // Largest off-diagonal element
        let mut max_val = 0.0f64;
        let mut p = 0;
        let mut q = 1;
        for i in 0..3 {
            for j in (i + 1)..3 {
                if a.data[i][j].abs() > max_val {
                    max_val = a.data[i][j].abs();
                    p = i;
                    q = j;
                }
            }
        }

        if max_val < tol {
            break;
        }

        let app = a.data[p][p];
        let aqq = a.data[q][q];
        let apq = a.data[p][q];

        let theta = if (app - aqq).abs() < tol {
            core::f64::consts::FRAC_PI_4
        } else {
            0.5 * (2.0 * apq / (app - aqq)).atan()
        };

        let c = theta.cos();
        let s = theta.sin();

        // Givens rotation: A' = G^T * A * G
        let mut new_a = a;
        for i in 0..3 {
            if i != p && i != q {
                let aip = a.data[i][p];
                let aiq = a.data[i][q];
                new_a.data[i][p] = c * aip + s * aiq;
                new_a.data[p][i] = new_a.data[i][p];
                new_a.data[i][q] = -s * aip + c * aiq;
                new_a.data[q][i] = new_a.data[i][q];
            }
        }
        new_a.data[p][p] = c * c * app + 2.0 * c * s * apq + s * s * aqq;
        new_a.data[q][q] = s * s * app - 2.0 * c * s * apq + c * c * aqq;
        new_a.data[p][q] = 0.0;
        new_a.data[q][p] = 0.0;
        a = new_a;

        // Accumulate rotation into V
        let mut new_v = v;
        for i in 0..3 {
            let vip = v.data[i][p];
            let viq = v.data[i][q];
            new_v.data[i][p] = c * vip + s * viq;
            new_v.data[i][q] = -s * vip + c * viq;
        }
        v = new_v;
    }

    let eigenvalues = [a.data[0][0], a.data[1][1], a.data[2][2]];
    (v, eigenvalues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(m: &Matrix3x3) {
        for i in 0..3 {
            for j in 0..3 {
                let dot = m.column(i).dot(&m.column(j));
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (dot - expected).abs() < 1e-8,
                    "columns {i},{j}: dot = {dot}"
                );
            }
        }
    }

    #[test]
    fn multiply_identity() {
        let a = Matrix3x3 {
            data: [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]],
        };
        let result = a.multiply(&Matrix3x3::identity());
        for i in 0..3 {
            for j in 0..3 {
                assert!((result.data[i][j] - a.data[i][j]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn transpose_swaps() {
        let a = Matrix3x3 {
            data: [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]],
        };
        let t = a.transpose();
        assert!((t.data[0][1] - 4.0).abs() < 1e-10);
        assert!((t.data[1][0] - 2.0).abs() < 1e-10);
        assert!((t.data[2][0] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn determinant_known_value() {
        let a = Matrix3x3 {
            data: [[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]],
        };
        assert!((a.determinant() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn svd_of_rotation_has_unit_singular_values() {
        let angle: f64 = 0.5;
        let c = angle.cos();
        let s = angle.sin();
        let rot = Matrix3x3 {
            data: [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
        };

        let svd = svd_3x3(&rot);
        for &sv in &svd.s {
            assert!((sv - 1.0).abs() < 1e-6, "singular value {sv} should be ~1");
        }

        // U * diag(s) * Vt reconstructs the input
        let mut reconstructed = Matrix3x3::zeros();
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    reconstructed.data[i][j] += svd.u.data[i][k] * svd.s[k] * svd.vt.data[k][j];
                }
            }
        }
        for i in 0..3 {
            for j in 0..3 {
                assert!((reconstructed.data[i][j] - rot.data[i][j]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn svd_rank_one_still_orthonormal() {
        // Outer product of a single direction: rank 1, two zero singular values
        let mut m = Matrix3x3::zeros();
        let d = [1.0, 2.0, -1.0];
        for i in 0..3 {
            for j in 0..3 {
                m.data[i][j] = d[i] * d[j];
            }
        }
        let svd = svd_3x3(&m);
        assert!(svd.s[0] > 1.0);
        assert!(svd.s[1].abs() < 1e-8);
        assert!(svd.s[2].abs() < 1e-8);
        assert_orthonormal(&svd.u);
        assert_orthonormal(&svd.vt);
    }

    #[test]
    fn svd_zero_matrix_orthonormal() {
        let svd = svd_3x3(&Matrix3x3::zeros());
        assert_orthonormal(&svd.u);
        for &sv in &svd.s {
            assert!(sv.abs() < 1e-12);
        }
    }
}
