//! Host input, queued between ticks

use flux_physics::Palette;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the particle layer is drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Proximity edges between ambient particles
    Connections,
    /// Edges plus filled triangles
    #[default]
    Mesh,
    /// Dots and comets only
    Particles,
}

impl RenderMode {
    pub const ALL: [RenderMode; 3] = [RenderMode::Connections, RenderMode::Mesh, RenderMode::Particles];

    pub fn draws_edges(self) -> bool {
        self != RenderMode::Particles
    }

    pub fn fills_triangles(self) -> bool {
        self == RenderMode::Mesh
    }

    pub fn next(self) -> Self {
        match self {
            RenderMode::Connections => RenderMode::Mesh,
            RenderMode::Mesh => RenderMode::Particles,
            RenderMode::Particles => RenderMode::Connections,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Connections => "connections",
            RenderMode::Mesh => "mesh",
            RenderMode::Particles => "particles",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown render mode `{0}` (expected connections, mesh or particles)")]
pub struct ParseRenderModeError(String);

impl FromStr for RenderMode {
    type Err = ParseRenderModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "connections" | "net" => Ok(RenderMode::Connections),
            "mesh" => Ok(RenderMode::Mesh),
            "particles" => Ok(RenderMode::Particles),
            _ => Err(ParseRenderModeError(s.to_owned())),
        }
    }
}

/// Last known pointer position, as seen by the next tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
    pub active: bool,
}

/// Everything the host may ask of the simulation.
///
/// Commands are applied in arrival order at the start of the next tick.
/// `Resize`, `SetPalette` and `SetRenderMode` start a new epoch.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Resize { width: u32, height: u32 },
    PointerMove(Vec2),
    PointerLeave,
    PointerPress(Vec2),
    SetPalette(Palette),
    SetRenderMode(RenderMode),
}
