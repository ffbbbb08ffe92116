use std::{fmt, str::FromStr};

use anyhow::anyhow;

/// Which directions the streamlines were traced in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DirectionMode {
    #[default]
    Forward,
    Backward,
    /// Seeds alternate forward and backward; each pair forms one multi polyline.
    Both,
}

/// Direction of the polyline run currently being read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedDirection {
    Forward,
    Backward,
}

impl DirectionMode {
    /// Whether the multi polyline ends after a seed whose last run went in
    /// `current` direction.
    pub fn closes_after(self, current: Option<SeedDirection>) -> bool {
        match self {
            DirectionMode::Forward | DirectionMode::Backward => true,
            DirectionMode::Both => current == Some(SeedDirection::Backward),
        }
    }
}

impl FromStr for DirectionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            "both" => Ok(Self::Both),
            other => Err(anyhow!("unknown direction mode `{other}`")),
        }
    }
}

impl fmt::Display for DirectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionMode::Forward => write!(f, "forward"),
            DirectionMode::Backward => write!(f, "backward"),
            DirectionMode::Both => write!(f, "both"),
        }
    }
}
