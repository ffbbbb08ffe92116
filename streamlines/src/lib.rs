mod diagnostics;
mod direction;
mod flag;
mod frames;
mod lod;
mod packing;
mod polyline;
mod raw_data;
mod reconstruct;
mod segment;
mod spatial;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use direction::{DirectionMode, SeedDirection};
pub use flag::SampleFlag;
pub use frames::calculate_matrices;
pub use lod::LodData;
pub use packing::{
    DataPacker, DataUnit, DirLight, PackedLayout, DIR_LIGHTS, LINE_SEGMENTS, POSITIONS, TREE_NODES,
};
pub use polyline::{MultiPolyLine, PolyLine};
pub use raw_data::{RawData, RawSample, SampleProvider};
pub use reconstruct::{extract_multi_poly_lines, reconstruct, Reconstruction};
pub use segment::{generate_line_segments, LineSegment};
pub use spatial::{BvhSettings, GrowthPolicy, SpatialIndexBuilder};
