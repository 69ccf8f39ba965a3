//! End-to-end behavior of the simulation driven purely through commands

use flux_physics::{BodyKind, Palette};
use flux_simulation::{
    particle_count, star_count, Command, FluxSimulation, PopulationParams, RenderMode, SimulationParams,
    Viewport,
};
use glam::Vec2;

fn params(seed: u64) -> SimulationParams {
    let mut params = SimulationParams::default();
    params.seed = Some(seed);
    params.spawner.ambient_probability = 0.0;
    params
}

fn themed(name: &str) -> Palette {
    Palette {
        name: name.into(),
        ..Palette::default()
    }
}

#[test]
fn theme_switch_replaces_bodies_and_regenerates_population() {
    let mut sim = FluxSimulation::new(
        params(1),
        themed("DEEP_SPACE"),
        RenderMode::Connections,
        Viewport::new(800, 600),
    );
    sim.tick();
    assert!(sim.black_hole().is_some());
    assert_eq!(sim.bodies().len(), 1);

    sim.push(Command::PointerPress(Vec2::new(100.0, 100.0)));
    sim.tick();
    assert!(sim.comet_count() > 0);

    sim.push(Command::SetPalette(themed("OCEAN")));
    sim.tick();

    assert!(sim.black_hole().is_none());
    assert_eq!(sim.shockwaves().len(), 0);
    assert_eq!(sim.comet_count(), 0);
    assert_eq!(sim.particles().len(), 53);
    let kinds: Vec<BodyKind> = sim.bodies().iter().map(|b| b.kind).collect();
    assert_eq!(kinds, vec![BodyKind::Planet, BodyKind::Planet]);
}

#[test]
fn crimson_tide_gets_a_sun() {
    let mut sim = FluxSimulation::new(
        params(2),
        themed("CRIMSON_TIDE"),
        RenderMode::Mesh,
        Viewport::new(800, 600),
    );
    sim.tick();
    assert_eq!(sim.bodies().len(), 1);
    assert_eq!(sim.bodies()[0].kind, BodyKind::Sun);
    assert!(sim.black_hole().is_none());
}

#[test]
fn pointer_press_spawns_one_shockwave_and_a_burst() {
    let mut sim = FluxSimulation::new(
        params(3),
        Palette::default(),
        RenderMode::Connections,
        Viewport::new(800, 600),
    );
    let before = sim.particles().len();
    let press = Vec2::new(250.0, 125.0);

    sim.push(Command::PointerPress(press));
    sim.drain_commands();

    assert_eq!(sim.shockwaves().len(), 1);
    assert_eq!(sim.shockwaves()[0].radius, 1.0);
    assert_eq!(sim.shockwaves()[0].origin, press);
    assert_eq!(sim.comet_count(), 8);
    assert_eq!(sim.particles().len(), before + 8);
    for comet in sim.particles().iter().filter(|p| p.is_comet()) {
        assert_eq!(comet.position, press);
    }
}

#[test]
fn resize_recomputes_populations() {
    let mut sim = FluxSimulation::new(
        params(4),
        Palette::default(),
        RenderMode::Connections,
        Viewport::new(800, 600),
    );
    let population = PopulationParams::default();
    assert_eq!(sim.particles().len(), particle_count(Viewport::new(800, 600), &population));
    assert_eq!(sim.stars().len(), star_count(Viewport::new(800, 600), &population));

    sim.push(Command::Resize {
        width: 1600,
        height: 1200,
    });
    sim.tick();

    assert_eq!(sim.viewport(), Viewport::new(1600, 1200));
    assert_eq!(sim.particles().len(), 180);
    assert_eq!(sim.stars().len(), 150);
    for star in sim.stars() {
        assert!((0.0..1600.0).contains(&star.position.x));
        assert!((0.0..1200.0).contains(&star.position.y));
    }
}

#[test]
fn render_mode_switch_starts_a_new_epoch() {
    let mut sim = FluxSimulation::new(
        params(5),
        Palette::default(),
        RenderMode::Connections,
        Viewport::new(640, 480),
    );
    let epoch = sim.epoch();
    sim.push(Command::SetRenderMode(RenderMode::Particles));
    sim.tick();
    assert_eq!(sim.render_mode(), RenderMode::Particles);
    assert_eq!(sim.epoch(), epoch + 1);
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = || {
        let mut sim = FluxSimulation::new(
            params(99),
            themed("DEEP_SPACE"),
            RenderMode::Mesh,
            Viewport::new(800, 600),
        );
        sim.push(Command::PointerMove(Vec2::new(200.0, 200.0)));
        sim.push(Command::PointerPress(Vec2::new(300.0, 300.0)));
        for _ in 0..120 {
            sim.tick();
        }
        sim.particles().iter().map(|p| p.position).collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn ambient_spawning_only_adds_comets() {
    let mut params = params(6);
    params.spawner.ambient_probability = 1.0;
    let mut sim = FluxSimulation::new(params, Palette::default(), RenderMode::Particles, Viewport::new(400, 300));
    let normals = sim.particles().len();

    for _ in 0..10 {
        sim.tick();
    }
    assert_eq!(sim.particles().iter().filter(|p| !p.is_comet()).count(), normals);
    assert_eq!(sim.comet_count(), 10);
}
