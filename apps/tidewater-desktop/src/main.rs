use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tidewater_common::Viewport;
use tidewater_input::{DragTracker, OrbitControls, PointerAction, PointerButton};
use tidewater_render::{FrameClock, PerspectiveCamera, WaterScene};
use tidewater_render_wgpu::{GpuContext, WaterRenderer};
use tidewater_tools::DebugPanel;
use tidewater_waves::WaveSettings;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "tidewater-desktop", about = "Animated water surface with a live debug panel")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Wave settings file (.yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height
    #[arg(long, default_value = "720")]
    height: u32,
}

/// Application state.
struct AppState {
    scene: WaterScene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    drag: DragTracker,
    panel: DebugPanel,
    clock: FrameClock,
}

impl AppState {
    fn new(settings: WaveSettings, viewport: Viewport) -> Self {
        let scene = WaterScene::new(settings, viewport);
        let camera = PerspectiveCamera::with_aspect(viewport.aspect());
        Self {
            scene,
            camera,
            controls: OrbitControls::new(camera.target),
            drag: DragTracker::new(),
            panel: DebugPanel::new(),
            clock: FrameClock::start(Instant::now()),
        }
    }

    /// Per-frame update: feed the elapsed time to the water, then ease the camera.
    fn update(&mut self, now: Instant) {
        let frame = self.clock.tick(now);
        self.scene.advance(frame.elapsed);
        self.controls.update(&mut self.camera);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.scene.resize(width, height, &mut self.camera);
    }

    /// Size the water is drawn at, after the pixel ratio cap.
    fn render_size(&self) -> (u32, u32) {
        self.scene.viewport.render_size()
    }

    fn pointer(&mut self, action: PointerAction) {
        self.controls
            .apply(action, &self.camera, self.scene.viewport.height);
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }

        match key {
            KeyCode::F1 => {
                self.panel.toggle();
            }
            KeyCode::KeyR => {
                let aspect = self.camera.aspect();
                self.camera = PerspectiveCamera::with_aspect(aspect);
                self.controls = OrbitControls::new(self.camera.target);
                tracing::info!("camera reset");
            }
            _ => {}
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        let response = self.panel.show(ctx, &mut self.scene.settings);
        if response.changed {
            tracing::trace!("settings edited at t={:.2}", self.scene.time());
        }
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

struct GpuApp {
    state: AppState,
    initial_size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<WaterRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(settings: WaveSettings, width: u32, height: u32) -> Self {
        Self {
            state: AppState::new(settings, Viewport::new(width, height, 1.0)),
            initial_size: PhysicalSize::new(width, height),
            window: None,
            gpu: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Tidewater")
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let gpu = pollster::block_on(GpuContext::new(window.clone(), size.width, size.height))?;

        self.state.scene.viewport = Viewport::new(size.width, size.height, window.scale_factor());
        self.state.resize(size.width, size.height);

        let renderer = WaterRenderer::new(
            &gpu.device,
            gpu.format(),
            &self.state.scene,
            &self.state.camera,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format(), None, 1, false);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn redraw(&mut self) {
        self.state.update(Instant::now());

        let Self {
            state,
            window,
            gpu,
            renderer,
            egui_ctx,
            egui_winit,
            egui_renderer,
            ..
        } = self;
        let (Some(window), Some(gpu), Some(renderer), Some(egui_winit), Some(egui_renderer)) =
            (window, gpu, renderer, egui_winit, egui_renderer)
        else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
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

        renderer.render(&gpu.device, &gpu.queue, &view, &state.scene, &state.camera);

        let raw_input = egui_winit.take_egui_input(window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_gpu(event_loop) {
            tracing::error!("failed to initialise rendering: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    let (width, height) = gpu.size();
                    self.state.resize(width, height);
                    let (render_w, render_h) = self.state.render_size();
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(&gpu.device, render_w, render_h);
                    }
                    tracing::debug!(
                        "resized to {width}x{height}, drawing at {render_w}x{render_h} (pixel ratio {:.2})",
                        self.state.scene.viewport.pixel_ratio()
                    );
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.state.scene.viewport.scale_factor = scale_factor;
                let (render_w, render_h) = self.state.render_size();
                if let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) {
                    renderer.resize(&gpu.device, render_w, render_h);
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
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseInput {
                button,
                state: btn_state,
                ..
            } => {
                let pressed = btn_state == ElementState::Pressed;
                if pressed && self.egui_ctx.is_pointer_over_area() {
                    return;
                }
                if let Some(button) = pointer_button(button) {
                    self.state.drag.button(button, pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let action = self
                    .state
                    .drag
                    .cursor_moved(Vec2::new(position.x as f32, position.y as f32));
                self.state.pointer(action);
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.drag.cursor_left();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 50.0,
                };
                self.state.pointer(PointerAction::Zoom(steps));
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
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

    tracing::info!("tidewater-desktop starting");

    let settings = match &cli.config {
        Some(path) => tidewater_waves::config::load(path)?,
        None => WaveSettings::default(),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(settings, cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    Ok(())
}
