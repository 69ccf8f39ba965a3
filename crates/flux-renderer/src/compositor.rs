//! Frame compositor
//!
//! Draws one tick of a [`FluxSimulation`] onto a [`Canvas`], back to front:
//! background, stars, celestial bodies, shockwaves, proximity graph,
//! particles and comets. Rendering only reads the simulation; the tick that
//! produced the state has already run.

use crate::bodies::draw_body;
use crate::canvas::Canvas;
use flux_physics::{lensing_offset, Particle, PaletteColors, ParticleKind, Rgb};
use flux_simulation::{BlackHoleView, FluxSimulation, ProximityGraph};
use glam::Vec2;

const SHOCKWAVE_WIDTH: f32 = 2.0;
const EDGE_WIDTH: f32 = 1.0;
const TRAIL_ALPHA: f32 = 0.6;

/// Radial lens around the black hole's screen position
#[derive(Clone, Copy, Debug)]
struct Lens {
    hole: BlackHoleView,
    factor: f32,
}

impl Lens {
    fn apply(lens: Option<Lens>, position: Vec2) -> Vec2 {
        match lens {
            Some(lens) => position + lensing_offset(position, lens.hole.position, lens.hole.radius, lens.factor),
            None => position,
        }
    }
}

#[derive(Default)]
pub struct Compositor {
    graph: ProximityGraph,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph built by the last [`render`](Self::render)
    pub fn graph(&self) -> &ProximityGraph {
        &self.graph
    }

    /// Draw the current state. The canvas is resized to the viewport; an
    /// empty viewport draws nothing.
    pub fn render(&mut self, sim: &FluxSimulation, canvas: &mut Canvas) {
        let viewport = sim.viewport();
        if viewport.is_empty() {
            return;
        }
        canvas.resize(viewport.width, viewport.height);

        let colors = sim.palette().colors();
        let params = sim.params();
        let parallax = sim.parallax();
        let lens = sim.black_hole().map(|hole| Lens {
            hole,
            factor: params.black_hole.lensing_radius_factor,
        });

        canvas.set_offset(Vec2::ZERO);
        canvas.clear(colors.background);

        // Stars
        let size = viewport.size();
        for star in sim.stars() {
            let position = star.parallax_position(parallax, params.parallax.star, size);
            let alpha = star.alpha(sim.tick_count());
            canvas.fill_circle(Lens::apply(lens, position), star.size, Rgb::WHITE.with_alpha(alpha));
        }

        // Celestial bodies. The black hole itself is never lensed.
        for body in sim.bodies() {
            let position = body.screen_position(parallax, params.parallax.body);
            let position = if body.is_black_hole() {
                position
            } else {
                Lens::apply(lens, position)
            };
            draw_body(canvas, body, position, colors.secondary);
        }

        for wave in sim.shockwaves() {
            let color = colors.primary.with_alpha(wave.opacity());
            canvas.stroke_circle(wave.origin, wave.radius, SHOCKWAVE_WIDTH, color);
        }

        canvas.set_offset(parallax * params.parallax.hud);

        let particles = sim.particles();
        self.graph.rebuild(particles, sim.render_mode(), &params.graph);
        self.draw_graph(canvas, particles, &colors, params.graph.edge_alpha, params.graph.triangle_alpha);

        for particle in particles {
            draw_particle(canvas, particle, &colors);
        }

        canvas.set_offset(Vec2::ZERO);
    }

    fn draw_graph(
        &self,
        canvas: &mut Canvas,
        particles: &[Particle],
        colors: &PaletteColors,
        edge_alpha: f32,
        triangle_alpha: f32,
    ) {
        for triangle in &self.graph.triangles {
            canvas.fill_triangle(
                particles[triangle.a].position,
                particles[triangle.b].position,
                particles[triangle.c].position,
                colors.primary.with_alpha(triangle.opacity * triangle_alpha),
            );
        }
        for edge in &self.graph.edges {
            canvas.line(
                particles[edge.a].position,
                particles[edge.b].position,
                EDGE_WIDTH,
                colors.secondary.with_alpha(edge.opacity * edge_alpha),
            );
        }
    }
}

fn draw_particle(canvas: &mut Canvas, particle: &Particle, colors: &PaletteColors) {
    match &particle.kind {
        ParticleKind::Normal => {
            canvas.fill_circle(particle.position, particle.size, colors.primary.opaque());
        }
        ParticleKind::Comet(comet) => {
            // Oldest segment first, thin and faint, widening towards the head
            let segments = comet.trail.len().saturating_sub(1);
            for (i, (from, to)) in comet.trail.iter().zip(comet.trail.iter().skip(1)).enumerate() {
                let fraction = (i + 1) as f32 / segments as f32;
                canvas.line(
                    *from,
                    *to,
                    particle.size * fraction,
                    colors.accent.with_alpha(TRAIL_ALPHA * fraction),
                );
            }
            canvas.fill_circle(particle.position, particle.size, colors.accent.opaque());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flux_physics::Palette;
    use flux_simulation::{Command, RenderMode, SimulationParams, Viewport};

    fn simulation(name: &str, mode: RenderMode) -> FluxSimulation {
        let mut params = SimulationParams::default();
        params.seed = Some(21);
        params.spawner.ambient_probability = 0.0;
        let palette = Palette {
            name: name.into(),
            background: "#102030".into(),
            ..Palette::default()
        };
        FluxSimulation::new(params, palette, mode, Viewport::new(320, 240))
    }

    #[test]
    fn test_canvas_follows_viewport() {
        let mut sim = simulation("OCEAN", RenderMode::Connections);
        let mut canvas = Canvas::new(1, 1);
        let mut compositor = Compositor::new();

        sim.tick();
        compositor.render(&sim, &mut canvas);
        assert_eq!((canvas.width(), canvas.height()), (320, 240));

        sim.push(Command::Resize { width: 100, height: 50 });
        sim.tick();
        compositor.render(&sim, &mut canvas);
        assert_eq!((canvas.width(), canvas.height()), (100, 50));
        assert_eq!(canvas.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_background_is_cleared() {
        let mut sim = simulation("OCEAN", RenderMode::Particles);
        let mut canvas = Canvas::new(320, 240);
        sim.tick();
        Compositor::new().render(&sim, &mut canvas);

        let background = [0x10, 0x20, 0x30, 255];
        let cleared = canvas
            .as_bytes()
            .chunks(4)
            .filter(|p| *p == background)
            .count();
        assert!(cleared > 320 * 240 / 4);
    }

    #[test]
    fn test_graph_follows_render_mode() {
        let mut canvas = Canvas::new(320, 240);

        let mut sim = simulation("OCEAN", RenderMode::Particles);
        let mut compositor = Compositor::new();
        sim.tick();
        compositor.render(&sim, &mut canvas);
        assert!(compositor.graph().edges.is_empty());

        let mut sim = simulation("OCEAN", RenderMode::Connections);
        sim.tick();
        compositor.render(&sim, &mut canvas);
        // 8 particles on 320x240 are almost always within 150px of someone
        assert!(!compositor.graph().edges.is_empty());
        assert!(compositor.graph().triangles.is_empty());
    }

    #[test]
    fn test_empty_viewport_draws_nothing() {
        let mut sim = simulation("DEEP_SPACE", RenderMode::Mesh);
        sim.push(Command::Resize { width: 0, height: 0 });
        sim.tick();

        let mut canvas = Canvas::new(4, 4);
        canvas.clear(Rgb::new(9, 9, 9));
        Compositor::new().render(&sim, &mut canvas);
        assert!(canvas.as_bytes().chunks(4).all(|p| p == [9, 9, 9, 255]));
    }

    #[test]
    fn test_lens_pushes_away_from_hole() {
        let lens = Some(Lens {
            hole: BlackHoleView {
                position: Vec2::new(100.0, 100.0),
                radius: 60.0,
            },
            factor: 6.0,
        });
        let shifted = Lens::apply(lens, Vec2::new(150.0, 100.0));
        assert!(shifted.x > 150.0);
        assert_eq!(shifted.y, 100.0);
        assert_eq!(Lens::apply(lens, Vec2::new(900.0, 100.0)), Vec2::new(900.0, 100.0));
        assert_eq!(Lens::apply(None, Vec2::new(150.0, 100.0)), Vec2::new(150.0, 100.0));
    }
}
