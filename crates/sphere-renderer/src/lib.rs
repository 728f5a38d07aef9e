//! # Sphere Renderer
//!
//! Drawing surface abstraction, the frame render pipeline and the surfaces
//! it ships with.

pub mod canvas;
pub mod color;
pub mod pipeline;
pub mod presenter;
pub mod recording;
pub mod style;
pub mod surface;

pub use canvas::*;
pub use color::*;
pub use pipeline::*;
pub use presenter::*;
pub use recording::*;
pub use style::*;
pub use surface::*;
