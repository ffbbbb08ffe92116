use crate::{packing::PackedLayout, raw_data::SampleProvider, segment::LineSegment};

const TUBE_RADIUS: f32 = 0.005;
const VOLUME_THRESHOLD: f32 = 0.0001;

/// Opaque identifier of the tree growth strategy; `-1` leaves the choice to
/// the builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy(pub i32);

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self(-1)
    }
}

/// Parameters handed to the spatial index over the segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BvhSettings {
    pub tube_radius: f32,
    /// `None` means no cost limit.
    pub max_cost: Option<f32>,
    pub growth_policy: GrowthPolicy,
    pub volume_threshold: f32,
}

impl Default for BvhSettings {
    fn default() -> Self {
        Self {
            tube_radius: TUBE_RADIUS,
            max_cost: None,
            growth_policy: GrowthPolicy::default(),
            volume_threshold: VOLUME_THRESHOLD,
        }
    }
}

impl BvhSettings {
    pub fn tube_radius(mut self, radius: f32) -> Self {
        self.tube_radius = radius;
        self
    }

    pub fn max_cost(mut self, cost: f32) -> Self {
        self.max_cost = Some(cost);
        self
    }

    pub fn growth_policy(mut self, policy: GrowthPolicy) -> Self {
        self.growth_policy = policy;
        self
    }

    pub fn volume_threshold(mut self, threshold: f32) -> Self {
        self.volume_threshold = threshold;
        self
    }

    /// Cost limit in the encoding the tree builders expect, `-1` for none.
    pub fn max_cost_or_sentinel(&self) -> f32 {
        self.max_cost.unwrap_or(-1.0)
    }
}

/// Builds the acceleration tree the renderer traverses. The nodes are stored
/// as returned and never interpreted here.
pub trait SpatialIndexBuilder {
    type Node: PackedLayout + Clone;

    fn build(
        &self,
        samples: &dyn SampleProvider,
        segments: &[LineSegment],
        settings: &BvhSettings,
    ) -> anyhow::Result<Vec<Self::Node>>;
}
