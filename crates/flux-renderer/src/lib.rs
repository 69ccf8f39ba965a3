//! # Flux Renderer
//!
//! Software rasterizer for the flux field plus a wgpu presenter that puts
//! the finished canvas on screen.

pub mod bodies;
pub mod canvas;
pub mod compositor;
pub mod gradient;
pub mod presenter;

pub use bodies::*;
pub use canvas::*;
pub use compositor::*;
pub use gradient::*;
pub use presenter::*;
