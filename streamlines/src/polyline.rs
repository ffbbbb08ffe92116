/// Sample indices in traversal order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolyLine {
    pub point_indices: Vec<usize>,
}

impl PolyLine {
    pub fn len(&self) -> usize {
        self.point_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point_indices.is_empty()
    }
}

/// Polylines belonging to one traced curve. With both directions traced the
/// forward and backward halves end up in the same multi polyline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultiPolyLine {
    pub poly_lines: Vec<PolyLine>,
    /// Position in the extracted collection.
    pub multi_poly_id: usize,
}
