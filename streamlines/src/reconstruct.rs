use std::mem;

use anyhow::anyhow;

use crate::{
    diagnostics::{Diagnostic, Diagnostics},
    direction::{DirectionMode, SeedDirection},
    flag::SampleFlag,
    polyline::{MultiPolyLine, PolyLine},
    raw_data::{sample_count, SampleProvider},
};

#[derive(Clone, Debug, Default)]
pub struct Reconstruction {
    pub multi_poly_lines: Vec<MultiPolyLine>,
    pub diagnostics: Diagnostics,
}

pub fn extract_multi_poly_lines<P>(
    provider: &P,
    direction: DirectionMode,
) -> anyhow::Result<Reconstruction>
where
    P: SampleProvider + ?Sized,
{
    reconstruct(
        provider.num_seeds(),
        provider.points_per_seed(),
        |index| provider.sample(index).map(|s| s.flag),
        direction,
    )
}

/// Rebuilds the polylines from the flag of every sample, seed after seed.
///
/// Only a terminal flag closes a polyline, so a polyline left open at the end
/// of a seed continues into the next one. Multi polylines end after every seed,
/// or in [`DirectionMode::Both`] after every seed whose last run went backward.
/// A missing sample is fatal; malformed flags are only reported.
pub fn reconstruct(
    num_seeds: usize,
    points_per_seed: usize,
    flag_at: impl Fn(usize) -> Option<i32>,
    direction: DirectionMode,
) -> anyhow::Result<Reconstruction> {
    log::debug!("extracting multi polylines from {num_seeds} seeds, direction {direction}");
    sample_count(num_seeds, points_per_seed)?;
    let mut scan = Scan::default();
    for seed in 0..num_seeds {
        let start = seed * points_per_seed;
        for index in start..start + points_per_seed {
            let flag =
                flag_at(index).ok_or_else(|| anyhow!("sample {index} of seed {seed} is missing"))?;
            scan.read(index, flag);
        }
        scan.end_seed(direction);
    }
    let reconstruction = scan.finish();
    log::info!(
        "extracted {} multi polylines",
        reconstruction.multi_poly_lines.len()
    );
    Ok(reconstruction)
}

#[derive(Default)]
struct Scan {
    multi_poly_lines: Vec<MultiPolyLine>,
    multi: MultiPolyLine,
    poly: PolyLine,
    current: Option<SeedDirection>,
    previous_flag: Option<i32>,
    diagnostics: Diagnostics,
}

impl Scan {
    fn read(&mut self, index: usize, flag: i32) {
        match SampleFlag::try_from(flag) {
            Ok(SampleFlag::BeginBackward) => {
                self.current = Some(SeedDirection::Backward);
                self.poly.point_indices.push(index);
            }
            Ok(SampleFlag::Skip) => {}
            Ok(SampleFlag::BeginForward) => {
                self.current = Some(SeedDirection::Forward);
                self.poly.point_indices.push(index);
            }
            Ok(SampleFlag::Interior) => self.poly.point_indices.push(index),
            Ok(SampleFlag::End) => {
                self.poly.point_indices.push(index);
                if self.poly.len() == 1 {
                    self.diagnostics.report(Diagnostic::SinglePointPolyLine { index });
                }
                let poly = mem::take(&mut self.poly);
                self.multi.poly_lines.push(poly);
            }
            Err(flag) => self.diagnostics.report(Diagnostic::UnknownFlag { index, flag }),
        }

        let boundary = SampleFlag::try_from(flag).is_ok_and(SampleFlag::is_boundary);
        if boundary && self.previous_flag == Some(flag) {
            self.diagnostics.report(Diagnostic::ConsecutiveFlags { index, flag });
        }
        self.previous_flag = Some(flag);
    }

    fn end_seed(&mut self, direction: DirectionMode) {
        self.previous_flag = None;
        if direction.closes_after(self.current) {
            let multi = mem::take(&mut self.multi);
            self.multi_poly_lines.push(multi);
        }
    }

    fn finish(mut self) -> Reconstruction {
        if !self.poly.is_empty() {
            self.diagnostics.report(Diagnostic::UnterminatedPolyLine {
                points: self.poly.len(),
            });
        }
        if !self.multi.poly_lines.is_empty() {
            self.diagnostics.report(Diagnostic::UnclosedMultiPolyLine {
                poly_lines: self.multi.poly_lines.len(),
            });
        }
        for (id, multi) in self.multi_poly_lines.iter_mut().enumerate() {
            multi.multi_poly_id = id;
        }
        Reconstruction {
            multi_poly_lines: self.multi_poly_lines,
            diagnostics: self.diagnostics,
        }
    }
}
