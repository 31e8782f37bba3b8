//! Vector type alias for 3D positions and directions.

use nalgebra::Vector3;

/// 3D vector type for positions, displacements, and directions.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, used throughout
/// the rig for hand positions, head forward vectors, and mover displacements.
pub type Vec3 = Vector3<f32>;

/// Project `vector` onto the plane whose normal is `normal`.
///
/// The normal does not need to be unit length. A zero (or subnormal) normal
/// defines no plane, so the vector is returned unchanged. The result is not
/// renormalized: a head looking mostly downwards yields a short horizontal
/// component.
#[inline]
pub fn project_on_plane(vector: Vec3, normal: Vec3) -> Vec3 {
    let normal_sq = normal.norm_squared();
    if normal_sq < f32::EPSILON {
        return vector;
    }
    vector - normal * (vector.dot(&normal) / normal_sq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_removes_vertical_component() {
        let forward = Vec3::new(0.0, 0.6, 0.8);
        let projected = project_on_plane(forward, Vec3::y());
        assert_relative_eq!(projected, Vec3::new(0.0, 0.0, 0.8), epsilon = 1e-6);
    }

    #[test]
    fn test_projection_with_unnormalized_normal() {
        let forward = Vec3::new(1.0, 1.0, 0.0);
        let projected = project_on_plane(forward, Vec3::new(0.0, 4.0, 0.0));
        assert_relative_eq!(projected, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_projection_of_straight_down_is_zero() {
        let projected = project_on_plane(-Vec3::y(), Vec3::y());
        assert_relative_eq!(projected.norm(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_normal_leaves_vector_untouched() {
        let forward = Vec3::new(0.3, -0.2, 0.9);
        assert_eq!(project_on_plane(forward, Vec3::zeros()), forward);
    }
}
