use std::f32::consts::TAU;

use clap::Parser;
use geometry::CylinderSet;
use nalgebra::{Point3, Vector3};
use streamlines::{
    DataPacker, DataUnit, DirLight, DirectionMode, LodData, PackedLayout, RawData, RawSample,
    LINE_SEGMENTS, POSITIONS,
};

mod cli;

/// Tree nodes come from an external builder; the demo packs an empty tree.
#[derive(Clone)]
struct ExternalNode;

impl PackedLayout for ExternalNode {
    const INT_FIELDS: usize = 0;
    const FLOAT_FIELDS: usize = 0;

    fn write_ints(&self, _out: &mut Vec<i32>) -> anyhow::Result<()> {
        Ok(())
    }

    fn write_floats(&self, _out: &mut Vec<f32>) {}
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let cli = cli::Command::parse();

    let seeds = (0..cli.seeds)
        .map(|seed| trace_seed(seed, &cli))
        .collect::<Vec<_>>();
    let raw_data = RawData::from_seeds(seeds)?;
    log::info!(
        "traced {} seeds of {} points, direction {}",
        cli.seeds,
        cli.points_per_seed,
        cli.direction
    );

    let mut lod = LodData::<ExternalNode>::new("demo");
    let diagnostics = lod.rebuild(&raw_data, cli.direction)?;
    for diagnostic in diagnostics {
        println!("warning: {diagnostic}");
    }

    let cylinders = CylinderSet::new();

    let lights = [DirLight {
        direction: Vector3::new(-1.0, -1.0, -1.0).normalize(),
        color: Vector3::repeat(1.0),
    }];
    let mut unit = DataUnit::new(lod.name());
    lod.update_data_unit(&mut unit, &lights, &raw_data)?;

    println!(
        "{} multi polylines, {} segments, {} helper cylinders",
        lod.multi_poly_lines().len(),
        lod.line_segments().len(),
        cylinders.cylinders().len()
    );
    println!(
        "packed {} ints and {} floats, segments start at int {:?} / float {:?}, positions at float {:?}",
        unit.ints().len(),
        unit.floats().len(),
        unit.int_start(LINE_SEGMENTS),
        unit.float_start(LINE_SEGMENTS),
        unit.float_start(POSITIONS),
    );
    Ok(())
}

/// One seed's samples: a helix that stops early for some seeds, padded with
/// skipped samples. In `both` mode odd seeds trace backwards.
fn trace_seed(seed: usize, cli: &cli::Command) -> Vec<RawSample> {
    let backward = match cli.direction {
        DirectionMode::Forward => false,
        DirectionMode::Backward => true,
        DirectionMode::Both => seed % 2 == 1,
    };
    let n = cli.points_per_seed;
    let live = n - (seed % 4) * n / 8;
    let center = Point3::new(
        0.5 + 0.3 * (seed as f32 * 0.7).cos(),
        0.5 + 0.3 * (seed as f32 * 0.7).sin(),
        0.5,
    );
    let sign = if backward { -1.0 } else { 1.0 };

    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            let angle = t * cli.turns * TAU;
            let position = center
                + Vector3::new(0.05 * angle.cos(), 0.05 * angle.sin(), sign * 0.4 * t);
            let flag = match i {
                0 if backward => -1,
                0 => 1,
                i if i + 1 == live => 3,
                i if i < live => 2,
                _ => 0,
            };
            RawSample::new(position, flag)
        })
        .collect()
}
