pub mod axes;
pub mod cylinder;
pub mod local_frame;

pub use axes::{AxesSettings, AxesWidget, CylinderSet};
pub use cylinder::Cylinder;
pub use local_frame::{canonical_transform, LocalFrame, SingularFrame};
