//! # Flux Simulation
//!
//! CPU simulation of the flux field. The host feeds input as [`Command`]s;
//! each [`FluxSimulation::tick`] drains them, then advances bodies,
//! shockwaves, spawning and every particle by one frame.

pub mod commands;
pub mod config;
pub mod dynamics;
pub mod epoch;
pub mod params;
pub mod proximity;
pub mod simulation;
pub mod spawner;

pub use commands::*;
pub use config::*;
pub use dynamics::{BlackHoleView, StepContext};
pub use epoch::{particle_count, star_count, Viewport};
pub use params::*;
pub use proximity::*;
pub use simulation::*;
pub use spawner::ScreenEdge;
