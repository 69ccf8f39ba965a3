//! Flux Field
//!
//! Interactive particle-field wallpaper: drifting particles, comets, a
//! parallax star field and orbiting bodies, rendered on the CPU and
//! presented through wgpu.

mod themes;

use anyhow::{anyhow, Context};
use clap::Parser;
use flux_physics::Palette;
use flux_renderer::{Canvas, Compositor, Presenter};
use flux_simulation::{Command, FluxConfig, FluxSimulation, RenderMode, SimulationParams, Viewport};
use glam::Vec2;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

#[derive(Parser, Debug)]
#[command(name = "flux")]
#[command(about = "Interactive particle-field wallpaper")]
#[command(version)]
struct Args {
    /// JSON file with simulation parameters and custom themes
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial theme name (T cycles themes at runtime)
    #[arg(short, long)]
    theme: Option<String>,

    /// Render mode: connections, mesh or particles (M cycles at runtime)
    #[arg(short, long, default_value_t = RenderMode::default())]
    mode: RenderMode,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 1080)]
    height: u32,
}

/// Everything needed to (re)build the simulation once a window exists
struct Settings {
    params: SimulationParams,
    themes: Vec<Palette>,
    theme_index: usize,
    mode: RenderMode,
    window_size: (u32, u32),
}

impl Settings {
    fn from_args(args: Args) -> anyhow::Result<Self> {
        let config = match &args.config {
            Some(path) => FluxConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => FluxConfig::default(),
        };

        let mut params = config.simulation;
        if args.seed.is_some() {
            params.seed = args.seed;
        }

        let themes = if config.themes.is_empty() {
            themes::builtin()
        } else {
            config.themes
        };

        let theme_index = match &args.theme {
            Some(name) => themes::position(&themes, name).unwrap_or_else(|| {
                log::warn!("Unknown theme `{name}`, using {}", themes[0].name);
                0
            }),
            None => 0,
        };

        Ok(Self {
            params,
            themes,
            theme_index,
            mode: args.mode,
            window_size: (args.width, args.height),
        })
    }

    fn palette(&self) -> &Palette {
        &self.themes[self.theme_index]
    }
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    simulation: FluxSimulation,
    compositor: Compositor,
    canvas: Canvas,
    presenter: Presenter,

    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl GpuState {
    async fn new(window: Arc<Window>, settings: &Settings) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating window surface")?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        // Create device and queue
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("requesting GPU device")?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no texture formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let simulation = FluxSimulation::new(
            settings.params.clone(),
            settings.palette().clone(),
            settings.mode,
            Viewport::new(size.width, size.height),
        );
        log::info!(
            "✓ Simulation initialized: {} particles, {} stars, theme {}",
            simulation.particles().len(),
            simulation.stars().len(),
            settings.palette().name
        );

        let presenter = Presenter::new(&device, surface_format);
        log::info!("✓ Presenter initialized ({surface_format:?})");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            simulation,
            compositor: Compositor::new(),
            canvas: Canvas::new(size.width, size.height),
            presenter,
            frame_times: VecDeque::with_capacity(100),
            last_frame_time: Instant::now(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
        // A zero-sized viewport pauses the simulation until the next resize
        self.simulation.push(Command::Resize {
            width: new_size.width,
            height: new_size.height,
        });
    }

    /// Tick, draw and present one frame. Returns the average FPS.
    fn render(&mut self) -> Result<f32, wgpu::SurfaceError> {
        // Track frame time
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > 100 {
            self.frame_times.pop_front();
        }
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = if avg_frame_time > 0.0 { 1000.0 / avg_frame_time } else { 0.0 };

        if !self.simulation.tick() {
            return Ok(fps);
        }
        self.compositor.render(&self.simulation, &mut self.canvas);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.presenter
            .present(&self.device, &self.queue, &view, &self.canvas);
        output.present();

        Ok(fps)
    }
}

struct App {
    settings: Settings,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    cursor: Option<Vec2>,
    /// Startup failure reported after the event loop exits
    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            window: None,
            gpu_state: None,
            cursor: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let (width, height) = self.settings.window_size;
        let window_attributes = Window::default_attributes()
            .with_title("Flux")
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("creating window")?,
        );
        self.gpu_state = Some(pollster::block_on(GpuState::new(window.clone(), &self.settings))?);
        self.window = Some(window);
        Ok(())
    }

    fn cycle_theme(&mut self) {
        let settings = &mut self.settings;
        settings.theme_index = (settings.theme_index + 1) % settings.themes.len();
        log::info!("Theme: {}", settings.palette().name);
        if let Some(gpu_state) = &mut self.gpu_state {
            gpu_state
                .simulation
                .push(Command::SetPalette(settings.palette().clone()));
        }
    }

    fn cycle_mode(&mut self) {
        self.settings.mode = self.settings.mode.next();
        log::info!("Render mode: {}", self.settings.mode);
        if let Some(gpu_state) = &mut self.gpu_state {
            gpu_state
                .simulation
                .push(Command::SetRenderMode(self.settings.mode));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                log::error!("Startup failed: {err:#}");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match key_code {
                KeyCode::KeyT => self.cycle_theme(),
                KeyCode::KeyM => self.cycle_mode(),
                _ => {}
            },

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.cursor = Some(position);
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.simulation.push(Command::PointerMove(position));
                }
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.simulation.push(Command::PointerLeave);
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let (Some(gpu_state), Some(cursor)) = (&mut self.gpu_state, self.cursor) {
                    gpu_state.simulation.push(Command::PointerPress(cursor));
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render() {
                        Ok(fps) => {
                            window.set_title(&format!(
                                "Flux - {} / {} - {:.0} FPS - {} particles",
                                self.settings.palette().name,
                                gpu_state.simulation.render_mode(),
                                fps,
                                gpu_state.simulation.particles().len()
                            ));
                        }
                        Err(wgpu::SurfaceError::Lost) => gpu_state.resize(window.inner_size()),
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => log::warn!("Render error: {e:?}"),
                    }
                }
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_args(Args::parse())?;
    log::info!(
        "Starting flux ({} themes, mode {})",
        settings.themes.len(),
        settings.mode
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_mesh() {
        let args = Args::try_parse_from(["flux"]).unwrap();
        assert_eq!(args.mode, RenderMode::Mesh);
        assert_eq!(RenderMode::default(), RenderMode::Mesh);
        assert_eq!((args.width, args.height), (1920, 1080));

        let args = Args::try_parse_from(["flux", "--mode", "particles"]).unwrap();
        assert_eq!(args.mode, RenderMode::Particles);
    }
}
