use geometry::LocalFrame;
use rayon::iter::{
    IndexedParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator, ParallelIterator,
};

use crate::{
    diagnostics::{Diagnostic, Diagnostics},
    raw_data::SampleProvider,
    segment::LineSegment,
};

/// Stores the local frame of every segment, resolving its endpoints through
/// `provider`. Segments are independent, so they are processed in parallel.
///
/// A segment pointing outside the provider aborts the whole pass before any
/// frame is written.
pub fn calculate_matrices<P>(
    segments: &mut [LineSegment],
    provider: &P,
) -> anyhow::Result<Diagnostics>
where
    P: SampleProvider + ?Sized,
{
    log::debug!("calculating matrices of {} segments", segments.len());
    let endpoints = segments
        .par_iter()
        .map(|segment| -> anyhow::Result<_> {
            let a = provider.position(segment.index_a)?;
            let b = provider.position(segment.index_b)?;
            Ok((a, b))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let singular = segments
        .par_iter_mut()
        .zip(endpoints)
        .enumerate()
        .map(|(i, (segment, (a, b)))| {
            let (frame, singular) = match LocalFrame::try_between(&a, &b) {
                Ok(frame) => (frame, None),
                Err(singular) => (singular.fallback(), Some(i)),
            };
            segment.frame = frame;
            singular
        })
        .collect::<Vec<_>>();

    let mut diagnostics = Diagnostics::default();
    for segment in singular.into_iter().flatten() {
        diagnostics.report(Diagnostic::SingularFrame { segment });
    }
    Ok(diagnostics)
}
