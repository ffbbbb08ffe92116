use crate::{
    diagnostics::Diagnostics,
    direction::DirectionMode,
    frames::calculate_matrices,
    packing::{
        DataPacker, DirLight, PackedLayout, DIR_LIGHTS, LINE_SEGMENTS, POSITIONS, TREE_NODES,
    },
    polyline::MultiPolyLine,
    raw_data::{RawData, SampleProvider},
    reconstruct::extract_multi_poly_lines,
    segment::{generate_line_segments, LineSegment},
    spatial::{BvhSettings, SpatialIndexBuilder},
};

/// Everything derived from the raw samples for one level of detail.
///
/// Each stage replaces what it produces; diagnostics accumulate from the last
/// [`LodData::reset`] on.
#[derive(Clone, Debug)]
pub struct LodData<N> {
    name: String,
    multi_poly_lines: Vec<MultiPolyLine>,
    line_segments: Vec<LineSegment>,
    tree_nodes: Vec<N>,
    bvh_settings: BvhSettings,
    diagnostics: Diagnostics,
}

impl<N> LodData<N> {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        log::debug!("creating lod {name}");
        Self {
            name,
            multi_poly_lines: Vec::new(),
            line_segments: Vec::new(),
            tree_nodes: Vec::new(),
            bvh_settings: BvhSettings::default(),
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn with_bvh_settings(mut self, settings: BvhSettings) -> Self {
        self.bvh_settings = settings;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn multi_poly_lines(&self) -> &[MultiPolyLine] {
        &self.multi_poly_lines
    }

    pub fn line_segments(&self) -> &[LineSegment] {
        &self.line_segments
    }

    pub fn tree_nodes(&self) -> &[N] {
        &self.tree_nodes
    }

    pub fn bvh_settings(&self) -> &BvhSettings {
        &self.bvh_settings
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn reset(&mut self) {
        self.multi_poly_lines.clear();
        self.line_segments.clear();
        self.tree_nodes.clear();
        self.diagnostics.clear();
    }

    pub fn extract_multi_poly_lines<P>(
        &mut self,
        provider: &P,
        direction: DirectionMode,
    ) -> anyhow::Result<()>
    where
        P: SampleProvider + ?Sized,
    {
        self.reset();
        let reconstruction = extract_multi_poly_lines(provider, direction)?;
        self.multi_poly_lines = reconstruction.multi_poly_lines;
        self.diagnostics.append(reconstruction.diagnostics);
        Ok(())
    }

    pub fn generate_line_segments(&mut self) {
        self.line_segments = generate_line_segments(&self.multi_poly_lines);
    }

    pub fn calculate_matrices<P>(&mut self, provider: &P) -> anyhow::Result<()>
    where
        P: SampleProvider + ?Sized,
    {
        let diagnostics = calculate_matrices(&mut self.line_segments, provider)?;
        self.diagnostics.append(diagnostics);
        Ok(())
    }

    /// Extraction, flattening and frame assignment in one go.
    pub fn rebuild<P>(
        &mut self,
        provider: &P,
        direction: DirectionMode,
    ) -> anyhow::Result<&Diagnostics>
    where
        P: SampleProvider + ?Sized,
    {
        self.extract_multi_poly_lines(provider, direction)?;
        self.generate_line_segments();
        self.calculate_matrices(provider)?;
        log::info!(
            "lod {}: {} multi polylines, {} segments, {} diagnostics",
            self.name,
            self.multi_poly_lines.len(),
            self.line_segments.len(),
            self.diagnostics.len()
        );
        Ok(&self.diagnostics)
    }

    pub fn calculate_bvh<B>(
        &mut self,
        provider: &dyn SampleProvider,
        builder: &B,
    ) -> anyhow::Result<()>
    where
        B: SpatialIndexBuilder<Node = N>,
    {
        log::debug!("building spatial index for lod {}", self.name);
        self.tree_nodes = builder.build(provider, &self.line_segments, &self.bvh_settings)?;
        log::debug!("spatial index of lod {} has {} nodes", self.name, self.tree_nodes.len());
        Ok(())
    }
}

impl<N: PackedLayout> LodData<N> {
    /// Hands the four collections the shaders read to `packer`.
    pub fn update_data_unit<D>(
        &self,
        packer: &mut D,
        lights: &[DirLight],
        raw_data: &RawData,
    ) -> anyhow::Result<()>
    where
        D: DataPacker,
    {
        log::debug!("updating data unit of lod {}", self.name);
        packer.reset();
        packer.pack(DIR_LIGHTS, lights)?;
        packer.pack(POSITIONS, raw_data.samples())?;
        packer.pack(LINE_SEGMENTS, &self.line_segments)?;
        packer.pack(TREE_NODES, &self.tree_nodes)?;
        Ok(())
    }
}
