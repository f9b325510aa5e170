use anyhow::{Context, Result};
use clap::Parser;
use glam::{Vec2, Vec3};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use walkspace_assets::{MeshData, MeshId, MeshLibrary};
use walkspace_camera::FpsCamera;
use walkspace_common::Transform;
use walkspace_input::{CameraController, FrameInput};
use walkspace_render_wgpu::{MeshPlacement, WgpuRenderer};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "walkspace-desktop", about = "Walkspace desktop application")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory of .mesh files to load
    #[arg(long, default_value = "./meshes")]
    mesh_dir: String,

    /// Scene texture image
    #[arg(long, default_value = "./textures/crate.png")]
    texture: PathBuf,
}

/// Application state.
struct AppState {
    camera: FpsCamera,
    initial_camera: FpsCamera,
    controller: CameraController,
    library: MeshLibrary,
    placements: Vec<MeshPlacement>,
    // Input state
    keys_held: std::collections::HashSet<KeyCode>,
    mouse_captured: bool,
    last_frame: Instant,
    pending_look: Vec2,
    pending_scroll: f32,
}

impl AppState {
    fn new(mesh_dir: &str) -> Self {
        let mut library = MeshLibrary::new();
        match library.load_dir(mesh_dir) {
            Ok(ids) if !ids.is_empty() => {}
            Ok(_) => {
                tracing::warn!("no .mesh files in '{mesh_dir}'; using built-in cube");
                library.register("cube", MeshData::unit_cube());
            }
            Err(e) => {
                tracing::error!(
                    "failed to load meshes from '{mesh_dir}': {e}; using built-in cube"
                );
                library.register("cube", MeshData::unit_cube());
            }
        }
        let placements = build_placements(&library);

        let camera = FpsCamera::default();
        Self {
            camera,
            initial_camera: camera,
            controller: CameraController::default(),
            library,
            placements,
            keys_held: std::collections::HashSet::new(),
            mouse_captured: false,
            last_frame: Instant::now(),
            pending_look: Vec2::ZERO,
            pending_scroll: 0.0,
        }
    }

    /// Collapse held keys and accumulated deltas into this frame's input.
    fn sample_input(&mut self) -> FrameInput {
        let mut movement = Vec3::ZERO;
        if self.keys_held.contains(&KeyCode::KeyW) {
            movement.z -= 1.0;
        }
        if self.keys_held.contains(&KeyCode::KeyS) {
            movement.z += 1.0;
        }
        if self.keys_held.contains(&KeyCode::KeyA) {
            movement.x -= 1.0;
        }
        if self.keys_held.contains(&KeyCode::KeyD) {
            movement.x += 1.0;
        }
        if self.keys_held.contains(&KeyCode::Space) {
            movement.y += 1.0;
        }
        if self.keys_held.contains(&KeyCode::ControlLeft) {
            movement.y -= 1.0;
        }

        FrameInput {
            look: std::mem::take(&mut self.pending_look),
            movement,
            zoom: std::mem::take(&mut self.pending_scroll),
            fast: self.keys_held.contains(&KeyCode::ShiftLeft),
        }
    }

    fn update(&mut self, dt: f32) {
        let input = self.sample_input();
        self.controller.apply(&mut self.camera, &input, dt);
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }

        if !pressed {
            return;
        }

        if key == KeyCode::KeyR {
            // Fresh camera with the starting parameters; the window shape
            // hasn't changed, so keep the current aspect.
            let aspect = self.camera.aspect();
            self.camera = self.initial_camera;
            self.camera.set_aspect(aspect);
            tracing::info!("camera reset");
        }
    }
}

/// Lay the registered meshes out in a row in front of the starting camera.
/// A lone mesh is repeated so there is still a small scene to walk through.
fn build_placements(library: &MeshLibrary) -> Vec<MeshPlacement> {
    let ids: Vec<MeshId> = library.names().map(|(_, id)| id).collect();
    let mut placements = Vec::new();
    if ids.len() == 1 {
        for x in [-3.0f32, 0.0, 3.0] {
            placements.push(MeshPlacement {
                mesh: ids[0],
                transform: Transform {
                    translation: Vec3::new(x, 0.0, -5.0),
                    ..Transform::default()
                },
            });
        }
    } else {
        let half = (ids.len() as f32 - 1.0) / 2.0;
        for (i, id) in ids.iter().enumerate() {
            placements.push(MeshPlacement {
                mesh: *id,
                transform: Transform {
                    translation: Vec3::new((i as f32 - half) * 3.0, 0.0, -5.0),
                    ..Transform::default()
                },
            });
        }
    }
    placements
}

struct GpuApp {
    state: AppState,
    texture_path: PathBuf,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    init_error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(mesh_dir: &str, texture_path: PathBuf) -> Self {
        Self {
            state: AppState::new(mesh_dir),
            texture_path,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            init_error: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Walkspace")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone()).context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("walkspace_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

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

        self.state
            .camera
            .set_aspect(size.width as f32 / size.height.max(1) as f32);

        let mut renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            size.width,
            size.height,
            &self.texture_path,
        );
        renderer.upload_meshes(&device, &self.state.library);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);

        Ok(())
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            tracing::error!("GPU setup failed: {e:#}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state
                        .camera
                        .set_aspect(config.width as f32 / config.height.max(1) as f32);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                self.state.handle_key(key, pressed);
                if pressed && key == KeyCode::Escape {
                    event_loop.exit();
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: btn_state,
                ..
            } => {
                self.state.mouse_captured = btn_state == ElementState::Pressed;
                if let Some(window) = &self.window {
                    window.set_cursor_visible(!self.state.mouse_captured);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.state.pending_scroll += match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
                };
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                self.state.update(dt);

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = &self.renderer {
                    renderer.render(
                        device,
                        queue,
                        &view,
                        &self.state.camera,
                        &self.state.placements,
                    );
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.mouse_captured {
                self.state.pending_look += Vec2::new(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("walkspace-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&cli.mesh_dir, cli.texture);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.init_error.take() {
        return Err(e);
    }
    Ok(())
}
