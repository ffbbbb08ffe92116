use geometry::LocalFrame;
use itertools::Itertools;

use crate::polyline::MultiPolyLine;

/// One renderable piece of a polyline, between two consecutive samples.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSegment {
    pub index_a: usize,
    pub index_b: usize,
    pub multi_poly_id: usize,
    /// Set for the first segment of every polyline.
    pub is_beginning: bool,
    /// Reserved for stages that duplicate segments. Always 0 here, but part of
    /// the packed layout.
    pub copy: i32,
    pub frame: LocalFrame,
}

impl LineSegment {
    pub fn new(index_a: usize, index_b: usize, multi_poly_id: usize, is_beginning: bool) -> Self {
        Self {
            index_a,
            index_b,
            multi_poly_id,
            is_beginning,
            copy: 0,
            frame: LocalFrame::default(),
        }
    }
}

/// Flattens the polylines into segments, keeping multi polyline, polyline and
/// traversal order.
pub fn generate_line_segments(multi_poly_lines: &[MultiPolyLine]) -> Vec<LineSegment> {
    log::debug!("generating line segments");
    let segments = multi_poly_lines
        .iter()
        .flat_map(|multi| {
            multi.poly_lines.iter().flat_map(move |poly| {
                poly.point_indices
                    .iter()
                    .tuple_windows()
                    .enumerate()
                    .map(move |(k, (&a, &b))| {
                        LineSegment::new(a, b, multi.multi_poly_id, k == 0)
                    })
            })
        })
        .collect::<Vec<_>>();
    log::info!("generated {} line segments", segments.len());
    segments
}

#[cfg(test)]
mod tests {
    use super::generate_line_segments;
    use crate::polyline::{MultiPolyLine, PolyLine};

    fn multi(id: usize, polys: &[&[usize]]) -> MultiPolyLine {
        MultiPolyLine {
            poly_lines: polys
                .iter()
                .map(|p| PolyLine {
                    point_indices: p.to_vec(),
                })
                .collect(),
            multi_poly_id: id,
        }
    }

    #[test]
    fn n_points_give_n_minus_one_segments() {
        let multis = vec![
            multi(0, &[&[0, 1, 2, 3], &[5]]),
            multi(1, &[]),
            multi(2, &[&[10, 11], &[]]),
        ];
        let segments = generate_line_segments(&multis);
        let pairs: Vec<_> = segments
            .iter()
            .map(|s| (s.index_a, s.index_b, s.multi_poly_id, s.is_beginning))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (0, 1, 0, true),
                (1, 2, 0, false),
                (2, 3, 0, false),
                (10, 11, 2, true),
            ]
        );
        assert!(segments.iter().all(|s| s.copy == 0));
    }

    #[test]
    fn every_polyline_starts_a_new_beginning() {
        let multis = vec![multi(0, &[&[0, 1, 2], &[4, 5, 6]])];
        let beginnings: Vec<_> = generate_line_segments(&multis)
            .iter()
            .map(|s| s.is_beginning)
            .collect();
        assert_eq!(beginnings, vec![true, false, true, false]);
    }
}
