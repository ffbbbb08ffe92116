use clap::Parser;
use streamlines::DirectionMode;

/// Traces synthetic helix streamlines and prepares their tube segments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Command {
    #[arg(long, default_value_t = 16)]
    pub seeds: usize,

    #[arg(long, default_value_t = 64)]
    pub points_per_seed: usize,

    /// forward, backward or both
    #[arg(long, default_value_t = DirectionMode::Forward)]
    pub direction: DirectionMode,

    /// Helix turns per seed.
    #[arg(long, default_value_t = 2.0)]
    pub turns: f32,
}
