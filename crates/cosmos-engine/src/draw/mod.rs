pub mod color;
pub mod frame;
#[cfg(feature = "vectors")]
pub mod tessellate;

pub use color::Color;
pub use frame::{DrawCommand, Frame, GradientStop, Paint};
#[cfg(feature = "vectors")]
pub use tessellate::{Tessellator, VectorVertex};
