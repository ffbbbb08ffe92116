use std::{f32::consts::PI, fmt};

use nalgebra::{Matrix4, Point3, Rotation3, Translation3, Vector3};

/// Object space of a tube or capsule running from `a` to `b`.
///
/// `matrix` takes world coordinates to the local frame, where `a` sits at the
/// origin and `b` lies on the positive z axis. `matrix_inverse` goes back.
#[derive(Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub matrix: Matrix4<f32>,
    pub matrix_inverse: Matrix4<f32>,
}

impl fmt::Debug for LocalFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.matrix;
        writeln!(f, "LocalFrame")?;
        writeln!(f, "  t {} {} {}", m[(0, 3)], m[(1, 3)], m[(2, 3)])?;
        for (r, name) in ["x", "y", "z"].iter().enumerate() {
            writeln!(f, "  {name} {} {} {}", m[(r, 0)], m[(r, 1)], m[(r, 2)])?;
        }
        Ok(())
    }
}

impl Default for LocalFrame {
    fn default() -> Self {
        Self {
            matrix: Matrix4::identity(),
            matrix_inverse: Matrix4::identity(),
        }
    }
}

/// Returned when the combined transform cannot be inverted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SingularFrame {
    pub matrix: Matrix4<f32>,
}

impl SingularFrame {
    /// Keeps the forward transform when it is finite and pairs it with an
    /// identity inverse.
    pub fn fallback(self) -> LocalFrame {
        let matrix = if self.matrix.iter().all(|c| c.is_finite()) {
            self.matrix
        } else {
            Matrix4::identity()
        };
        LocalFrame {
            matrix,
            matrix_inverse: Matrix4::identity(),
        }
    }
}

impl fmt::Display for SingularFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "local frame transform is not invertible")
    }
}

impl std::error::Error for SingularFrame {}

impl LocalFrame {
    /// Frame for the segment `a -> b`, substituting an identity inverse when
    /// the transform turns out to be singular.
    pub fn between(a: &Point3<f32>, b: &Point3<f32>) -> Self {
        Self::try_between(a, b).unwrap_or_else(|singular| {
            log::warn!("singular local frame for {a} -> {b}, using identity inverse");
            singular.fallback()
        })
    }

    pub fn try_between(a: &Point3<f32>, b: &Point3<f32>) -> Result<Self, SingularFrame> {
        let matrix = canonical_transform(a, b);
        match matrix.try_inverse() {
            Some(matrix_inverse) if matrix_inverse.iter().all(|c| c.is_finite()) => Ok(Self {
                matrix,
                matrix_inverse,
            }),
            _ => Err(SingularFrame { matrix }),
        }
    }

    pub fn to_local(&self, p: &Point3<f32>) -> Point3<f32> {
        self.matrix.transform_point(p)
    }

    pub fn to_world(&self, p: &Point3<f32>) -> Point3<f32> {
        self.matrix_inverse.transform_point(p)
    }
}

/// World to local transform for the segment `a -> b`.
///
/// Translate `a` to the origin, rotate about y to bring `b` into the yz plane,
/// rotate about x to bring it onto the z axis, then turn half way around x if
/// `b` still ended up behind `a`. The shaders rely on this exact order, so the
/// resulting xy orientation around the segment axis must not change.
pub fn canonical_transform(a: &Point3<f32>, b: &Point3<f32>) -> Matrix4<f32> {
    let translation = Translation3::from(-a.coords).to_homogeneous();

    let b1 = translation.transform_point(b);
    let angle_y = (-b1.x).atan2(b1.z);
    let rotation_y = Rotation3::from_axis_angle(&Vector3::y_axis(), angle_y).to_homogeneous();
    let mut combined = rotation_y * translation;

    let b2 = combined.transform_point(b);
    let angle_x = b2.y.atan2(b2.z);
    let rotation_x = Rotation3::from_axis_angle(&Vector3::x_axis(), angle_x).to_homogeneous();
    combined = rotation_x * combined;

    let a3 = combined.transform_point(a);
    let b3 = combined.transform_point(b);
    if b3.z < a3.z {
        let flip = Rotation3::from_axis_angle(&Vector3::x_axis(), PI).to_homogeneous();
        combined = flip * combined;
    }

    combined
}
