//! Proximity graph over the ambient population
//!
//! Pairs are O(n²) and triangles O(n³) in the worst case, so every candidate
//! is first rejected on its axis-aligned deltas before paying for the full
//! squared distance.

use crate::commands::RenderMode;
use crate::params::GraphParams;
use flux_physics::Particle;
use glam::Vec2;

/// Two particle indices joined by a translucent line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    /// `1 - distance / max_distance`, in (0, 1]
    pub opacity: f32,
}

/// Three mutually close particles; carries the opacity of its base edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub opacity: f32,
}

/// Edges and triangles for one frame.
///
/// Indices refer to the particle slice the graph was built from. Buffers
/// are reused between frames.
#[derive(Clone, Debug, Default)]
pub struct ProximityGraph {
    pub edges: Vec<Edge>,
    pub triangles: Vec<Triangle>,
    normals: Vec<usize>,
}

impl ProximityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.triangles.clear();
        self.normals.clear();
    }

    /// Rebuild from scratch. Comets never take part.
    pub fn rebuild(&mut self, particles: &[Particle], mode: RenderMode, params: &GraphParams) {
        self.clear();
        if !mode.draws_edges() {
            return;
        }

        self.normals.extend(
            particles
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.is_comet())
                .map(|(i, _)| i),
        );

        let max_distance = params.distance;
        let max_sq = params.distance_sq();
        let stride = params.triangle_stride.max(1);
        let close = |a: Vec2, b: Vec2| within(a, b, max_distance, max_sq);

        for (n, &i) in self.normals.iter().enumerate() {
            let p1 = particles[i].position;
            for (m, &j) in self.normals.iter().enumerate().skip(n + 1) {
                let p2 = particles[j].position;
                let Some(dist_sq) = close(p1, p2) else {
                    continue;
                };

                let opacity = 1.0 - dist_sq.sqrt() / max_distance;
                self.edges.push(Edge { a: i, b: j, opacity });

                if mode.fills_triangles() {
                    for &k in self.normals.iter().skip(m + 1).step_by(stride) {
                        let p3 = particles[k].position;
                        if close(p2, p3).is_some() && close(p1, p3).is_some() {
                            self.triangles.push(Triangle {
                                a: i,
                                b: j,
                                c: k,
                                opacity,
                            });
                        }
                    }
                }
            }
        }
    }
}

/// Squared distance if `a` and `b` are closer than the threshold
#[inline]
fn within(a: Vec2, b: Vec2, max_distance: f32, max_sq: f32) -> Option<f32> {
    let delta = a - b;
    if delta.x.abs() > max_distance || delta.y.abs() > max_distance {
        return None;
    }
    let dist_sq = delta.length_squared();
    (dist_sq < max_sq).then_some(dist_sq)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal(x: f32, y: f32) -> Particle {
        Particle::new_normal(Vec2::new(x, y), Vec2::ZERO, 1.0)
    }

    #[test]
    fn test_edges_fade_with_distance() {
        let particles = [normal(0.0, 0.0), normal(75.0, 0.0), normal(500.0, 0.0)];
        let mut graph = ProximityGraph::new();
        graph.rebuild(&particles, RenderMode::Connections, &GraphParams::default());

        assert_eq!(graph.edges.len(), 1);
        let edge = graph.edges[0];
        assert_eq!((edge.a, edge.b), (0, 1));
        assert!((edge.opacity - 0.5).abs() < 1e-6);
        assert!(graph.triangles.is_empty());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let particles = [normal(0.0, 0.0), normal(150.0, 0.0)];
        let mut graph = ProximityGraph::new();
        graph.rebuild(&particles, RenderMode::Connections, &GraphParams::default());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_comets_are_excluded() {
        let particles = [
            normal(0.0, 0.0),
            Particle::new_comet(Vec2::new(10.0, 0.0), Vec2::ZERO, 1.0, 50),
            normal(20.0, 0.0),
        ];
        let mut graph = ProximityGraph::new();
        graph.rebuild(&particles, RenderMode::Mesh, &GraphParams::default());
        assert_eq!(graph.edges.len(), 1);
        assert_eq!((graph.edges[0].a, graph.edges[0].b), (0, 2));
    }

    #[test]
    fn test_mesh_tests_every_third_candidate() {
        // All five points are mutually close.
        let particles: Vec<Particle> = (0..5).map(|i| normal(i as f32 * 10.0, 0.0)).collect();
        let mut graph = ProximityGraph::new();
        graph.rebuild(&particles, RenderMode::Mesh, &GraphParams::default());

        assert_eq!(graph.edges.len(), 10);

        // For pair (0, 1) the candidates are 2, 3, 4 and the stride keeps only 2.
        let vertices: Vec<(usize, usize, usize)> =
            graph.triangles.iter().map(|t| (t.a, t.b, t.c)).collect();
        assert_eq!(
            vertices,
            vec![(0, 1, 2), (0, 2, 3), (0, 3, 4), (1, 2, 3), (1, 3, 4), (2, 3, 4)]
        );
        assert!((graph.triangles[0].opacity - (1.0 - 10.0 / 150.0)).abs() < 1e-6);
    }

    #[test]
    fn test_particles_only_mode_builds_nothing() {
        let particles = [normal(0.0, 0.0), normal(1.0, 0.0)];
        let mut graph = ProximityGraph::new();
        graph.rebuild(&particles, RenderMode::Particles, &GraphParams::default());
        assert!(graph.edges.is_empty() && graph.triangles.is_empty());
    }
}
