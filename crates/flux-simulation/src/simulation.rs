//! Simulation state and the per-tick update
//!
//! The host never touches populations directly: it queues [`Command`]s,
//! which are drained once at the start of the next tick. Palette, render
//! mode and viewport changes start a new epoch (everything regenerated).

use crate::commands::{Command, PointerState, RenderMode};
use crate::dynamics::{self, BlackHoleView, StepContext};
use crate::epoch::{self, Viewport};
use crate::params::SimulationParams;
use crate::spawner;
use flux_physics::{CelestialBody, Palette, Particle, Shockwave, Star};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

pub struct FluxSimulation {
    params: SimulationParams,
    rng: StdRng,

    palette: Palette,
    render_mode: RenderMode,
    viewport: Viewport,
    pointer: PointerState,
    commands: VecDeque<Command>,

    particles: Vec<Particle>,
    stars: Vec<Star>,
    bodies: Vec<CelestialBody>,
    shockwaves: Vec<Shockwave>,
    black_hole: Option<BlackHoleView>,

    tick: u64,
    epoch: u64,
}

impl FluxSimulation {
    pub fn new(params: SimulationParams, palette: Palette, render_mode: RenderMode, viewport: Viewport) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut simulation = Self {
            params,
            rng,
            palette,
            render_mode,
            viewport,
            pointer: PointerState::default(),
            commands: VecDeque::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            bodies: Vec::new(),
            shockwaves: Vec::new(),
            black_hole: None,
            tick: 0,
            epoch: 0,
        };
        simulation.reinitialize();
        simulation
    }

    /// Queue a command for the next tick
    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Apply every queued command in arrival order.
    ///
    /// Called at the start of [`tick`](Self::tick); public so a host can
    /// observe the effect of input without advancing time.
    pub fn drain_commands(&mut self) {
        let mut new_epoch = false;
        // Presses queued after the last epoch trigger; earlier ones are wiped
        // by the reset anyway
        let mut presses = Vec::new();

        while let Some(command) = self.commands.pop_front() {
            let changed = match command {
                Command::Resize { width, height } => {
                    let viewport = Viewport::new(width, height);
                    let changed = viewport != self.viewport;
                    self.viewport = viewport;
                    changed
                }
                Command::PointerMove(position) => {
                    self.pointer = PointerState {
                        position,
                        active: true,
                    };
                    false
                }
                Command::PointerLeave => {
                    self.pointer.active = false;
                    false
                }
                Command::PointerPress(position) => {
                    presses.push(position);
                    false
                }
                Command::SetPalette(palette) => {
                    let changed = palette != self.palette;
                    self.palette = palette;
                    changed
                }
                Command::SetRenderMode(mode) => {
                    let changed = mode != self.render_mode;
                    self.render_mode = mode;
                    changed
                }
            };

            if changed {
                new_epoch = true;
                presses.clear();
            }
        }

        if new_epoch {
            self.reinitialize();
        }
        for position in presses {
            self.press(position);
        }
    }

    /// Advance one frame. Returns `false` when there was nothing to simulate
    /// (empty viewport).
    pub fn tick(&mut self) -> bool {
        self.drain_commands();
        if self.viewport.is_empty() {
            return false;
        }

        self.tick += 1;
        self.update_bodies();
        self.age_shockwaves();

        if spawner::roll_ambient(&mut self.rng, &self.params) {
            let comet = spawner::edge_comet(&mut self.rng, self.viewport, &self.params);
            self.particles.push(comet);
        }

        self.step_particles();
        true
    }

    /// Throw away every population and generate a fresh epoch
    fn reinitialize(&mut self) {
        self.epoch += 1;
        self.shockwaves.clear();
        self.black_hole = None;

        if self.viewport.is_empty() {
            self.particles.clear();
            self.stars.clear();
            self.bodies.clear();
            log::debug!("Epoch {}: empty viewport, nothing to spawn", self.epoch);
            return;
        }

        self.particles = epoch::spawn_particles(&mut self.rng, self.viewport, &self.params);
        self.stars = epoch::spawn_stars(&mut self.rng, self.viewport, &self.params);
        self.bodies = CelestialBody::layout_for(&self.palette, self.viewport.center());

        log::debug!(
            "Epoch {}: {}x{} theme={} mode={} particles={} stars={} bodies={}",
            self.epoch,
            self.viewport.width,
            self.viewport.height,
            self.palette.name,
            self.render_mode,
            self.particles.len(),
            self.stars.len(),
            self.bodies.len()
        );
    }

    fn press(&mut self, position: Vec2) {
        let shockwave = &self.params.shockwave;
        self.shockwaves
            .push(Shockwave::new(position, shockwave.max_radius, shockwave.growth));
        let comets = spawner::burst(&mut self.rng, position, &self.params);
        self.particles.extend(comets);
    }

    fn update_bodies(&mut self) {
        let center = self.viewport.center();
        let parallax = self.parallax();
        let factor = self.params.parallax.body;

        self.black_hole = None;
        for body in &mut self.bodies {
            body.update_orbit(center);
            if body.is_black_hole() {
                self.black_hole = Some(BlackHoleView {
                    position: body.screen_position(parallax, factor),
                    radius: body.radius,
                });
            }
        }
    }

    fn age_shockwaves(&mut self) {
        self.shockwaves.retain_mut(|wave| {
            wave.age();
            !wave.is_expired()
        });
    }

    fn step_particles(&mut self) {
        let Self {
            params,
            rng,
            viewport,
            pointer,
            particles,
            shockwaves,
            black_hole,
            ..
        } = self;

        let ctx = StepContext {
            bounds: viewport.size(),
            black_hole: *black_hole,
            pointer: *pointer,
            shockwaves,
            params,
        };
        particles.retain_mut(|particle| dynamics::step(particle, &ctx, &mut *rng));
    }

    /// Offset from the pointer to the viewport center, zero when the pointer
    /// is outside the window.
    pub fn parallax(&self) -> Vec2 {
        if self.pointer.active {
            self.viewport.center() - self.pointer.position
        } else {
            Vec2::ZERO
        }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn comet_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_comet()).count()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn shockwaves(&self) -> &[Shockwave] {
        &self.shockwaves
    }

    /// Black hole screen position cached by the last tick
    pub fn black_hole(&self) -> Option<BlackHoleView> {
        self.black_hole
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
