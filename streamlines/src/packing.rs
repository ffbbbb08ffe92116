use std::collections::HashMap;

use anyhow::{anyhow, Context};
use nalgebra::Vector3;

use crate::{raw_data::RawSample, segment::LineSegment};

pub const DIR_LIGHTS: &str = "dir_lights";
pub const POSITIONS: &str = "positions";
pub const LINE_SEGMENTS: &str = "line_segments";
pub const TREE_NODES: &str = "tree_nodes";

/// Split of an element into the integer and float buffers read by the
/// shaders. Field order is part of the shader contract.
pub trait PackedLayout {
    const INT_FIELDS: usize;
    const FLOAT_FIELDS: usize;

    fn write_ints(&self, out: &mut Vec<i32>) -> anyhow::Result<()>;

    fn write_floats(&self, out: &mut Vec<f32>);
}

/// Serializes named collections into parallel integer and float buffers.
pub trait DataPacker {
    fn reset(&mut self);

    fn pack<T: PackedLayout>(&mut self, name: &str, items: &[T]) -> anyhow::Result<()>;

    fn int_start(&self, name: &str) -> Option<usize>;

    fn float_start(&self, name: &str) -> Option<usize>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirLight {
    pub direction: Vector3<f32>,
    pub color: Vector3<f32>,
}

fn gpu_index(index: usize) -> anyhow::Result<i32> {
    i32::try_from(index).with_context(|| format!("index {index} does not fit the int buffer"))
}

impl PackedLayout for LineSegment {
    const INT_FIELDS: usize = 5;
    const FLOAT_FIELDS: usize = 32;

    fn write_ints(&self, out: &mut Vec<i32>) -> anyhow::Result<()> {
        out.extend([
            gpu_index(self.index_a)?,
            gpu_index(self.index_b)?,
            gpu_index(self.multi_poly_id)?,
            self.copy,
            i32::from(self.is_beginning),
        ]);
        Ok(())
    }

    fn write_floats(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(self.frame.matrix.as_slice());
        out.extend_from_slice(self.frame.matrix_inverse.as_slice());
    }
}

impl PackedLayout for RawSample {
    const INT_FIELDS: usize = 0;
    const FLOAT_FIELDS: usize = 4;

    fn write_ints(&self, _out: &mut Vec<i32>) -> anyhow::Result<()> {
        Ok(())
    }

    fn write_floats(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(self.position.coords.as_slice());
        out.push(self.flag as f32);
    }
}

impl PackedLayout for DirLight {
    const INT_FIELDS: usize = 0;
    const FLOAT_FIELDS: usize = 6;

    fn write_ints(&self, _out: &mut Vec<i32>) -> anyhow::Result<()> {
        Ok(())
    }

    fn write_floats(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(self.direction.as_slice());
        out.extend_from_slice(self.color.as_slice());
    }
}

/// Packer keeping both buffers in memory, ready for upload.
#[derive(Clone, Debug, Default)]
pub struct DataUnit {
    name: String,
    ints: Vec<i32>,
    floats: Vec<f32>,
    starts: HashMap<String, (usize, usize)>,
}

impl DataUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ints(&self) -> &[i32] {
        &self.ints
    }

    pub fn floats(&self) -> &[f32] {
        &self.floats
    }
}

impl DataPacker for DataUnit {
    fn reset(&mut self) {
        self.ints.clear();
        self.floats.clear();
        self.starts.clear();
    }

    fn pack<T: PackedLayout>(&mut self, name: &str, items: &[T]) -> anyhow::Result<()> {
        if self.starts.contains_key(name) {
            return Err(anyhow!("collection `{name}` is already packed in {}", self.name));
        }
        let int_start = self.ints.len();
        let float_start = self.floats.len();
        self.ints.reserve(items.len() * T::INT_FIELDS);
        self.floats.reserve(items.len() * T::FLOAT_FIELDS);
        let written = items.iter().try_for_each(|item| -> anyhow::Result<()> {
            item.write_ints(&mut self.ints)?;
            item.write_floats(&mut self.floats);
            Ok(())
        });
        if let Err(err) = written {
            // a failed collection leaves no trace in either buffer
            self.ints.truncate(int_start);
            self.floats.truncate(float_start);
            return Err(err.context(format!("packing `{name}` into {}", self.name)));
        }
        self.starts.insert(name.to_owned(), (int_start, float_start));
        Ok(())
    }

    fn int_start(&self, name: &str) -> Option<usize> {
        self.starts.get(name).map(|&(ints, _)| ints)
    }

    fn float_start(&self, name: &str) -> Option<usize> {
        self.starts.get(name).map(|&(_, floats)| floats)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{Point3, Vector3};

    use super::{DataPacker, DataUnit, DirLight, PackedLayout, LINE_SEGMENTS, POSITIONS};
    use crate::{raw_data::RawSample, segment::LineSegment};

    #[test]
    fn segment_fields_keep_their_order() {
        let mut segment = LineSegment::new(4, 5, 2, true);
        segment.frame.matrix[(0, 3)] = 7.0;

        let mut ints = Vec::new();
        let mut floats = Vec::new();
        segment.write_ints(&mut ints).unwrap();
        segment.write_floats(&mut floats);

        assert_eq!(ints, vec![4, 5, 2, 0, 1]);
        assert_eq!(floats.len(), LineSegment::FLOAT_FIELDS);
        // column major, translation sits in the last column
        assert_eq!(floats[12], 7.0);
        assert_eq!(floats[16], 1.0);
    }

    #[test]
    fn start_offsets_follow_packing_order() {
        let lights = vec![DirLight {
            direction: Vector3::new(0.0, -1.0, 0.0),
            color: Vector3::repeat(1.0),
        }];
        let samples = vec![RawSample::new(Point3::new(1.0, 2.0, 3.0), 1); 3];
        let segments = vec![LineSegment::new(0, 1, 0, true), LineSegment::new(1, 2, 0, false)];

        let mut unit = DataUnit::new("lod");
        unit.pack("dir_lights", &lights).unwrap();
        unit.pack(POSITIONS, &samples).unwrap();
        unit.pack(LINE_SEGMENTS, &segments).unwrap();

        assert_eq!(unit.float_start("dir_lights"), Some(0));
        assert_eq!(unit.float_start(POSITIONS), Some(6));
        assert_eq!(unit.float_start(LINE_SEGMENTS), Some(18));
        assert_eq!(unit.int_start(LINE_SEGMENTS), Some(0));
        assert_eq!(unit.ints().len(), 10);
        assert_eq!(unit.floats().len(), 18 + 64);
        assert_eq!(&unit.floats()[6..10], &[1.0, 2.0, 3.0, 1.0]);
        assert_eq!(unit.int_start("tree_nodes"), None);

        assert!(unit.pack(POSITIONS, &samples).is_err());
        unit.reset();
        assert!(unit.floats().is_empty());
        assert_eq!(unit.float_start(POSITIONS), None);
    }

    #[test]
    fn oversized_index_is_rejected() {
        let segment = LineSegment::new(usize::MAX, 0, 0, true);
        assert!(segment.write_ints(&mut Vec::new()).is_err());
    }

    #[test]
    fn failed_collection_is_rolled_back() {
        let segments = vec![
            LineSegment::new(0, 1, 0, true),
            LineSegment::new(usize::MAX, 2, 0, false),
        ];
        let samples = vec![RawSample::new(Point3::origin(), 2); 2];

        let mut unit = DataUnit::new("lod");
        let err = unit.pack(LINE_SEGMENTS, &segments).unwrap_err();
        assert!(format!("{err:#}").contains("line_segments"));
        assert!(unit.ints().is_empty());
        assert!(unit.floats().is_empty());
        assert_eq!(unit.int_start(LINE_SEGMENTS), None);

        unit.pack(POSITIONS, &samples).unwrap();
        assert_eq!(unit.float_start(POSITIONS), Some(0));
        assert_eq!(unit.floats().len(), 8);

        unit.pack(LINE_SEGMENTS, &segments[..1]).unwrap();
        assert_eq!(unit.int_start(LINE_SEGMENTS), Some(0));
        assert_eq!(unit.float_start(LINE_SEGMENTS), Some(8));
    }
}
