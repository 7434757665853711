//! Optimal rigid superposition via the Kabsch algorithm.
//!
//! Finds the rotation and translation that minimize RMSD between two sets
//! of corresponding points.

use physalia_core::{PhysaliaError, Result};

use crate::linalg::{svd_3x3, Matrix3x3};
use crate::types::Point3D;

/// An optimal rigid-body fit of a mobile point set onto a reference set.
///
/// Applying `rotation` then `translation` to the mobile points minimizes
/// the RMSD against the reference points.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RigidFit {
    /// 3x3 rotation matrix (row-major), always orthonormal.
    pub rotation: [[f64; 3]; 3],
    /// Translation applied after rotation.
    pub translation: Point3D,
    /// RMSD of the residual after applying the fit.
    pub rmsd: f64,
}

impl RigidFit {
    /// Apply the fit to a point: `R*p + t`.
    pub fn apply(&self, p: &Point3D) -> Point3D {
        Matrix3x3 {
            data: self.rotation,
        }
        .apply(p)
        .add(&self.translation)
    }

    /// Rotation as a flat row-major array.
    pub fn rotation_flat(&self) -> [f64; 9] {
        let r = &self.rotation;
        [
            r[0][0], r[0][1], r[0][2], r[1][0], r[1][1], r[1][2], r[2][0], r[2][1], r[2][2],
        ]
    }
}

/// Compute the optimal rigid superposition of `mobile` onto `reference`.
///
/// Kabsch: center both sets on their centroids, accumulate the
/// cross-covariance `H = sum(a_c * b_c^T)`, decompose `H = U S V^T`, and
/// take `R = V * diag(1, 1, d) * U^T` with `d = sign(det(V U^T))` to
/// exclude reflections. The translation recovers the centroid offset and
/// the RMSD is measured from the residual after applying the fit.
///
/// For a single point the rotation is underdetermined and fixed to the
/// identity. Degenerate sets (collinear or coplanar points) still yield a
/// valid orthonormal rotation minimizing RMSD, though not necessarily a
/// unique one.
///
/// # Errors
///
/// Returns [`PhysaliaError::InvalidInput`] if the sets differ in length,
/// are empty, or contain a non-finite coordinate. Empty matched sets must
/// be short-circuited by the caller before reaching this solver.
pub fn superpose_points(mobile: &[Point3D], reference: &[Point3D]) -> Result<RigidFit> {
    if mobile.len() != reference.len() {
        return Err(PhysaliaError::InvalidInput(format!(
            "point set sizes differ: {} vs {}",
            mobile.len(),
            reference.len()
        )));
    }
    if mobile.is_empty() {
        return Err(PhysaliaError::InvalidInput(
            "cannot superpose empty point sets".into(),
        ));
    }
    if let Some(p) = mobile.iter().chain(reference).find(|p| !p.is_finite()) {
        return Err(PhysaliaError::InvalidInput(format!(
            "non-finite coordinate ({}, {}, {})",
            p.x, p.y, p.z
        )));
    }

    let n = mobile.len();

    if n == 1 {
        return Ok(RigidFit {
            rotation: Matrix3x3::identity().data,
            translation: reference[0].sub(&mobile[0]),
            rmsd: 0.0,
        });
    }

    let centroid_a = centroid(mobile);
    let centroid_b = centroid(reference);

    // Cross-covariance H = sum over pairs of (a - ca) * (b - cb)^T
    let mut h = Matrix3x3::zeros();
    for (pa, pb) in mobile.iter().zip(reference) {
        let a = pa.sub(&centroid_a);
        let b = pb.sub(&centroid_b);
        h.data[0][0] += a.x * b.x;
        h.data[0][1] += a.x * b.y;
        h.data[0][2] += a.x * b.z;
        h.data[1][0] += a.y * b.x;
        h.data[1][1] += a.y * b.y;
        h.data[1][2] += a.y * b.z;
        h.data[2][0] += a.z * b.x;
        h.data[2][1] += a.z * b.y;
        h.data[2][2] += a.z * b.z;
    }

    let svd = svd_3x3(&h);
    let mut v = svd.vt.transpose();
    let ut = svd.u.transpose();

    let mut r = v.multiply(&ut);
    // Reflection fix: flip the column of V tied to the smallest singular
    // value (column 2 after sorting) when det(V U^T) is negative
    if r.determinant() < 0.0 {
        for row in 0..3 {
            v.data[row][2] = -v.data[row][2];
        }
        r = v.multiply(&ut);
    }

    let translation = centroid_b.sub(&r.apply(&centroid_a));

    let mut sum_sq = 0.0;
    for (pa, pb) in mobile.iter().zip(reference) {
        let moved = r.apply(pa).add(&translation);
        let diff = moved.sub(pb);
        sum_sq += diff.dot(&diff);
    }
    let rmsd = (sum_sq / n as f64).sqrt();

    Ok(RigidFit {
        rotation: r.data,
        translation,
        rmsd,
    })
}

fn centroid(points: &[Point3D]) -> Point3D {
    let mut sum = Point3D::zero();
    for p in points {
        sum = sum.add(p);
    }
    sum.scale(1.0 / points.len() as f64)
}
