use itertools::iproduct;
use nalgebra::{Point3, Vector3, Vector4};
use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};

use crate::cylinder::Cylinder;

const AXES_RADIUS: f32 = 0.01;
const ORIGIN_AXES_RADIUS: f32 = 0.015;
const AXES_LENGTH: f32 = 0.25;
const FRAME_RADIUS: f32 = 0.01;

const CYLINDERS_PER_CORNER: usize = 3;
const MOVABLE_CORNERS: usize = 2;
const CUBE_CORNERS: usize = 8;

const RED: Vector4<f32> = Vector4::new(1.0, 0.0, 0.0, 1.0);
const GREEN: Vector4<f32> = Vector4::new(0.0, 1.0, 0.0, 1.0);
const BLUE: Vector4<f32> = Vector4::new(0.0, 0.0, 1.0, 1.0);
const CYAN: Vector4<f32> = Vector4::new(0.0, 1.0, 1.0, 1.0);
const MAGENTA: Vector4<f32> = Vector4::new(1.0, 0.0, 1.0, 1.0);
const YELLOW: Vector4<f32> = Vector4::new(1.0, 1.0, 0.0, 1.0);
const FRAME_GREY: Vector4<f32> = Vector4::new(0.75, 0.75, 0.75, 1.0);

/// Colors of the x, y and z cylinders of an axes corner.
fn axes_palette(invert_color: bool) -> [Vector4<f32>; 3] {
    if invert_color {
        [CYAN, MAGENTA, YELLOW]
    } else {
        [RED, GREEN, BLUE]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxesWidget {
    Main,
    Side,
}

impl AxesWidget {
    fn slot(self) -> usize {
        match self {
            AxesWidget::Main => 0,
            AxesWidget::Side => 1,
        }
    }
}

/// Radius and length of the cube corner axes and of the fat origin axes, and
/// the palette of the camera orientation axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxesSettings {
    radius: f32,
    origin_radius: f32,
    length: f32,
    origin_length: f32,
    invert_color: bool,
}

impl Default for AxesSettings {
    fn default() -> Self {
        Self {
            radius: AXES_RADIUS,
            origin_radius: ORIGIN_AXES_RADIUS,
            length: AXES_LENGTH,
            origin_length: AXES_LENGTH,
            invert_color: false,
        }
    }
}

impl AxesSettings {
    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn origin_radius(mut self, radius: f32) -> Self {
        self.origin_radius = radius;
        self
    }

    pub fn length(mut self, length: f32) -> Self {
        self.length = length;
        self
    }

    pub fn origin_length(mut self, length: f32) -> Self {
        self.origin_length = length;
        self
    }

    /// Draws the camera orientation axes in cyan/magenta/yellow.
    pub fn invert_color(mut self, invert_color: bool) -> Self {
        self.invert_color = invert_color;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct WidgetIndices {
    movable_axes: usize,
    cube_axes: usize,
}

/// All helper cylinders of the scene, laid out as: main widget, side widget,
/// projection frames. Each widget holds two movable axes corners (the movable
/// axes, then the camera orientation), eight cube corner axes and one origin
/// axes.
#[derive(Clone, Debug)]
pub struct CylinderSet {
    cylinders: Vec<Cylinder>,
    widgets: [WidgetIndices; 2],
    settings: [AxesSettings; 2],
    first_projection_frame: usize,
    dirty: bool,
}

impl Default for CylinderSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CylinderSet {
    pub fn new() -> Self {
        let mut set = Self {
            cylinders: Vec::new(),
            widgets: Default::default(),
            settings: Default::default(),
            first_projection_frame: 0,
            dirty: true,
        };
        set.add_axes(AxesWidget::Main);
        set.add_axes(AxesWidget::Side);
        set.add_projection_frames();
        set.calculate_matrices();
        set
    }

    pub fn cylinders(&self) -> &[Cylinder] {
        &self.cylinders
    }

    pub fn movable_axes_start(&self, widget: AxesWidget) -> usize {
        self.widgets[widget.slot()].movable_axes
    }

    pub fn camera_axes_start(&self, widget: AxesWidget) -> usize {
        self.movable_axes_start(widget) + CYLINDERS_PER_CORNER
    }

    pub fn cube_axes_start(&self, widget: AxesWidget) -> usize {
        self.widgets[widget.slot()].cube_axes
    }

    pub fn projection_frames_start(&self) -> usize {
        self.first_projection_frame
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The three cylinders driven by the widget's movable axes state. Borrowing
    /// them marks the set for recalculation.
    pub fn movable_axes_mut(&mut self, widget: AxesWidget) -> &mut [Cylinder] {
        self.dirty = true;
        let start = self.movable_axes_start(widget);
        &mut self.cylinders[start..start + CYLINDERS_PER_CORNER]
    }

    pub fn set_axes_parameters(&mut self, main: AxesSettings, side: AxesSettings) {
        if self.settings == [main, side] {
            return;
        }
        self.settings = [main, side];
        self.recalculate_axes(AxesWidget::Main, main);
        self.recalculate_axes(AxesWidget::Side, side);
    }

    pub fn calculate_matrices(&mut self) {
        log::debug!("calculating matrices of {} cylinders", self.cylinders.len());
        self.cylinders
            .par_iter_mut()
            .for_each(Cylinder::calculate_frame);
        self.dirty = false;
    }

    /// Recalculates the frames if anything changed since the last pass.
    pub fn update(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.calculate_matrices();
        true
    }

    fn add_axes(&mut self, widget: AxesWidget) {
        let center = Point3::new(0.5, 0.5, 0.5);
        let movable_axes = self.cylinders.len();
        for _ in 0..MOVABLE_CORNERS {
            self.add_axes_corner(center, Vector3::repeat(1.0), false, AXES_RADIUS);
        }

        let cube_axes = self.cylinders.len();
        for (position, directions) in cube_corners() {
            self.add_axes_corner(position, directions, false, AXES_RADIUS);
        }
        debug_assert_eq!(self.cylinders.len() - cube_axes, CUBE_CORNERS * CYLINDERS_PER_CORNER);
        self.add_axes_corner(Point3::origin(), Vector3::repeat(1.0), false, ORIGIN_AXES_RADIUS);

        self.widgets[widget.slot()] = WidgetIndices {
            movable_axes,
            cube_axes,
        };
    }

    fn add_axes_corner(
        &mut self,
        position: Point3<f32>,
        directions: Vector3<f32>,
        invert_color: bool,
        radius: f32,
    ) {
        let ends = corner_endpoints(position, directions, AXES_LENGTH);
        for (end, color) in ends.into_iter().zip(axes_palette(invert_color)) {
            self.cylinders.push(Cylinder::new(position, end, radius, color));
        }
    }

    fn add_projection_frames(&mut self) {
        self.first_projection_frame = self.cylinders.len();
        self.add_projection_frame([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ]);
        self.add_projection_frame([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ]);
        self.add_projection_frame([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
    }

    fn add_projection_frame(&mut self, corners: [Point3<f32>; 4]) {
        for (i, from) in corners.iter().enumerate() {
            let to = corners[(i + 1) % corners.len()];
            self.cylinders.push(Cylinder::new(*from, to, FRAME_RADIUS, FRAME_GREY));
        }
    }

    fn recalculate_axes(&mut self, widget: AxesWidget, settings: AxesSettings) {
        log::debug!("recalculating {widget:?} axes with {settings:?}");
        let camera = self.camera_axes_start(widget);
        let palette = axes_palette(settings.invert_color);
        for (cylinder, color) in self.cylinders[camera..camera + CYLINDERS_PER_CORNER]
            .iter_mut()
            .zip(palette)
        {
            cylinder.color = color;
        }

        let mut start = self.cube_axes_start(widget);
        for (position, directions) in cube_corners() {
            start = self.recalculate_axes_corner(
                start,
                position,
                directions,
                settings.radius,
                settings.length,
            );
        }
        self.recalculate_axes_corner(
            start,
            Point3::origin(),
            Vector3::repeat(1.0),
            settings.origin_radius,
            settings.origin_length,
        );
        self.dirty = true;
    }

    fn recalculate_axes_corner(
        &mut self,
        start: usize,
        position: Point3<f32>,
        directions: Vector3<f32>,
        radius: f32,
        length: f32,
    ) -> usize {
        let ends = corner_endpoints(position, directions, length);
        for (cylinder, end) in self.cylinders[start..start + CYLINDERS_PER_CORNER]
            .iter_mut()
            .zip(ends)
        {
            cylinder.radius = radius;
            cylinder.set_endpoints(position, end);
        }
        start + CYLINDERS_PER_CORNER
    }
}

/// Unit cube corners with the axis directions pointing into the cube.
fn cube_corners() -> impl Iterator<Item = (Point3<f32>, Vector3<f32>)> {
    let inward = |c: u8| if c == 0 { 1.0 } else { -1.0 };
    iproduct!(0..2u8, 0..2u8, 0..2u8).map(move |(x, y, z)| {
        (
            Point3::new(f32::from(x), f32::from(y), f32::from(z)),
            Vector3::new(inward(x), inward(y), inward(z)),
        )
    })
}

fn corner_endpoints(
    position: Point3<f32>,
    directions: Vector3<f32>,
    length: f32,
) -> [Point3<f32>; 3] {
    [
        position + Vector3::x() * (length * directions.x),
        position + Vector3::y() * (length * directions.y),
        position + Vector3::z() * (length * directions.z),
    ]
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use nalgebra::Point3;

    use super::{
        AxesSettings, AxesWidget, CylinderSet, BLUE, CUBE_CORNERS, CYAN, GREEN, MAGENTA, RED,
        YELLOW,
    };

    #[test]
    fn layout_matches_widget_order() {
        let set = CylinderSet::new();
        assert_eq!(set.cylinders().len(), 2 * 33 + 12);
        assert_eq!(set.movable_axes_start(AxesWidget::Main), 0);
        assert_eq!(set.cube_axes_start(AxesWidget::Main), 6);
        assert_eq!(set.movable_axes_start(AxesWidget::Side), 33);
        assert_eq!(set.cube_axes_start(AxesWidget::Side), 39);
        assert_eq!(set.projection_frames_start(), 66);
        assert!(!set.is_dirty());
    }

    #[test]
    fn cube_corner_axes_point_inward() {
        let set = CylinderSet::new();
        let start = set.cube_axes_start(AxesWidget::Main);
        for cylinder in &set.cylinders()[start..start + CUBE_CORNERS * 3] {
            let mid = nalgebra::center(&cylinder.position_a, &cylinder.position_b);
            assert!(mid.coords.iter().all(|c| (0.0..=1.0).contains(c)));
            assert_abs_diff_eq!(cylinder.length(), 0.25, epsilon = 1e-6);
        }
        let origin = &set.cylinders()[start + CUBE_CORNERS * 3];
        assert_eq!(origin.position_a, Point3::origin());
        assert_abs_diff_eq!(origin.radius, 0.015);
    }

    #[test]
    fn every_frame_puts_b_on_positive_z() {
        let set = CylinderSet::new();
        for cylinder in set.cylinders() {
            let b = cylinder.frame.to_local(&cylinder.position_b);
            assert_abs_diff_eq!(b.x, 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(b.y, 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(b.z, cylinder.length(), epsilon = 1e-5);
        }
    }

    #[test]
    fn projection_frames_are_closed_loops() {
        let set = CylinderSet::new();
        let frames = &set.cylinders()[set.projection_frames_start()..];
        assert_eq!(frames.len(), 12);
        for outline in frames.chunks(4) {
            assert_eq!(outline[3].position_b, outline[0].position_a);
            for pair in outline.windows(2) {
                assert_eq!(pair[0].position_b, pair[1].position_a);
            }
        }
    }

    #[test]
    fn axes_parameters_only_touch_cube_axes() {
        let mut set = CylinderSet::new();
        let before = set.cylinders().to_vec();
        let main = AxesSettings::default().radius(0.02).length(0.5);
        set.set_axes_parameters(main, AxesSettings::default());
        assert!(set.is_dirty());
        assert!(set.update());
        assert!(!set.update());

        let start = set.cube_axes_start(AxesWidget::Main);
        assert_eq!(&set.cylinders()[..start], &before[..start]);
        let first = &set.cylinders()[start];
        assert_abs_diff_eq!(first.radius, 0.02);
        assert_abs_diff_eq!(first.length(), 0.5, epsilon = 1e-6);

        let side = set.cube_axes_start(AxesWidget::Side);
        assert_eq!(&set.cylinders()[side..], &before[side..]);

        set.set_axes_parameters(main, AxesSettings::default());
        assert!(!set.is_dirty());
    }

    #[test]
    fn moving_axes_marks_dirty() {
        let mut set = CylinderSet::new();
        let axes = set.movable_axes_mut(AxesWidget::Side);
        axes[0].set_endpoints(Point3::new(0.1, 0.2, 0.3), Point3::new(0.6, 0.2, 0.3));
        assert!(set.is_dirty());
        assert!(set.update());
        let moved = &set.cylinders()[set.movable_axes_start(AxesWidget::Side)];
        assert_abs_diff_eq!(
            moved.frame.to_local(&moved.position_b),
            Point3::new(0.0, 0.0, 0.5),
            epsilon = 1e-5
        );
    }

    #[test]
    fn camera_axes_switch_palette() {
        let colors = |set: &CylinderSet, start: usize| {
            set.cylinders()[start..start + 3]
                .iter()
                .map(|c| c.color)
                .collect::<Vec<_>>()
        };
        let mut set = CylinderSet::new();
        let camera = set.camera_axes_start(AxesWidget::Main);
        assert_eq!(camera, 3);
        assert_eq!(colors(&set, camera), vec![RED, GREEN, BLUE]);

        let inverted = AxesSettings::default().invert_color(true);
        set.set_axes_parameters(inverted, AxesSettings::default());
        assert!(set.is_dirty());
        assert_eq!(colors(&set, camera), vec![CYAN, MAGENTA, YELLOW]);
        assert_eq!(colors(&set, 0), vec![RED, GREEN, BLUE]);
        let cube = set.cube_axes_start(AxesWidget::Main);
        assert_eq!(colors(&set, cube), vec![RED, GREEN, BLUE]);
        let side = set.camera_axes_start(AxesWidget::Side);
        assert_eq!(colors(&set, side), vec![RED, GREEN, BLUE]);

        set.set_axes_parameters(AxesSettings::default(), AxesSettings::default());
        assert_eq!(colors(&set, camera), vec![RED, GREEN, BLUE]);
    }
}
