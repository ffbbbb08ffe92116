use nalgebra::{Point3, Vector4};

use crate::local_frame::LocalFrame;

/// Helper primitive drawn next to the streamlines: axes, cube corners and
/// projection frame outlines.
#[derive(Clone, Debug, PartialEq)]
pub struct Cylinder {
    pub radius: f32,
    pub position_a: Point3<f32>,
    pub position_b: Point3<f32>,
    pub color: Vector4<f32>,
    pub frame: LocalFrame,
}

impl Cylinder {
    pub fn new(
        position_a: Point3<f32>,
        position_b: Point3<f32>,
        radius: f32,
        color: Vector4<f32>,
    ) -> Self {
        Self {
            radius,
            position_a,
            position_b,
            color,
            frame: LocalFrame::default(),
        }
    }

    pub fn set_endpoints(&mut self, position_a: Point3<f32>, position_b: Point3<f32>) {
        self.position_a = position_a;
        self.position_b = position_b;
    }

    pub fn calculate_frame(&mut self) {
        self.frame = LocalFrame::between(&self.position_a, &self.position_b);
    }

    pub fn length(&self) -> f32 {
        (self.position_b - self.position_a).norm()
    }
}
