pub mod buffer;
pub mod depth;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod projection;
pub mod rasterizer;
pub mod shading;
pub mod viewport;

pub use buffer::{Buffer, FrameBuffer, TermBuffer};
pub use depth::DepthBuffer;
pub use pipeline::{FrameStats, Pipeline};
pub use projection::Projection;
pub use shading::ShadeMode;
pub use viewport::Viewport;
