pub mod surface;
pub mod shapes;
pub mod commands;
#[cfg(feature = "vectors")]
pub mod vector;

pub use surface::{Surface, ShapeDraw, LineDraw};
pub use commands::{CommandSurface, DrawCommand};
#[cfg(feature = "vectors")]
pub use vector::{VectorSurface, VectorVertex};
