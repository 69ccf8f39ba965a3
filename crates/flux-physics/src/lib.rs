//! # Flux Physics
//!
//! Data model and force laws for the flux field: ambient particles, comets,
//! stars, celestial bodies, shockwaves, plus the color codec used to turn
//! palette hex strings into drawable colors.

pub mod body;
pub mod color;
pub mod constants;
pub mod forces;
pub mod palette;
pub mod particle;
pub mod shockwave;
pub mod star;

pub use body::*;
pub use color::*;
pub use constants::*;
pub use forces::*;
pub use palette::*;
pub use particle::*;
pub use shockwave::*;
pub use star::*;
