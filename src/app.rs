//! Native window hosting the font pairing page.
//!
//! A winit event loop drives a single window; egui-winit translates its input
//! and egui-wgpu paints each frame. The loop sleeps until egui asks for the
//! next repaint, which [`PairFontsUI`] schedules while timers or downloads
//! are outstanding.

use crate::asset_loader::FontAssetLoader;
use crate::explorer::FontPairExplorer;
use crate::pair_fonts_ui::PairFontsUI;
use crate::selection::SelectionStore;
use crate::storage::StateStorage;
use anyhow::{Context, Result};
use fontpair_catalog::{CatalogClient, CatalogSource};
use fontpair_config::Config;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use wgpu::SurfaceError;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const WINDOW_TITLE: &str = "Font Pairs";
const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 800;
const MIN_WINDOW_WIDTH: u32 = 720;
const MIN_WINDOW_HEIGHT: u32 = 480;

/// Open the explorer window and block until it is closed.
///
/// The catalog is fetched in the background; font assets are downloaded as
/// their rows scroll into view.
pub fn run(config: Config, storage: Box<dyn StateStorage>) -> Result<()> {
    let client = CatalogClient::new(CatalogSource::parse(&config.catalog_source))
        .with_limits(config.max_catalog_bytes, config.max_asset_bytes);
    let loader = FontAssetLoader::new(Arc::new(client.clone()));
    let mut explorer = FontPairExplorer::new(config, SelectionStore::new(storage), loader);
    explorer.begin_catalog_load(client);

    let runtime = Runtime::new().context("Failed to start runtime")?;
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app_state = AppState::new(PairFontsUI::new(explorer), runtime);
    event_loop.run_app(&mut app_state)?;

    match app_state.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// When to paint next, given egui's requested delay. `None` means wait for input.
fn repaint_deadline(now: Instant, delay: Duration) -> Option<Instant> {
    now.checked_add(delay)
}

struct AppState {
    page: PairFontsUI,
    runtime: Runtime,
    window: Option<PairFontsWindow>,
    next_repaint: Option<Instant>,
    init_error: Option<anyhow::Error>,
}

impl AppState {
    fn new(page: PairFontsUI, runtime: Runtime) -> Self {
        Self {
            page,
            runtime,
            window: None,
            next_repaint: None,
            init_error: None,
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.runtime.block_on(PairFontsWindow::new(event_loop)) {
            Ok(window) => {
                log::info!("Window created");
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to create window: {e:#}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        if window.window_id() != window_id {
            return;
        }

        match window.handle_window_event(event, &mut self.page) {
            WindowAction::None => {}
            WindowAction::Close => {
                log::info!("Window closed");
                self.window = None;
                event_loop.exit();
            }
            WindowAction::Painted { repaint_after } => {
                self.next_repaint = repaint_deadline(Instant::now(), repaint_after);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };
        match self.next_repaint {
            Some(at) if at <= Instant::now() => {
                self.next_repaint = None;
                window.request_redraw();
                event_loop.set_control_flow(ControlFlow::Wait);
            }
            Some(at) => event_loop.set_control_flow(ControlFlow::WaitUntil(at)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

/// Result of handling one window event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowAction {
    None,
    Close,
    /// A frame was drawn; egui wants the next one after this delay
    Painted { repaint_after: Duration },
}

/// The window with its own egui context and wgpu renderer.
struct PairFontsWindow {
    window: Arc<Window>,
    window_id: WindowId,
    /// Outlives the surface created from it
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl PairFontsWindow {
    async fn new(event_loop: &ActiveEventLoop) -> Result<Self> {
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_min_inner_size(winit::dpi::LogicalSize::new(
                MIN_WINDOW_WIDTH,
                MIN_WINDOW_HEIGHT,
            ))
            .with_resizable(true);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let window_id = window.id();
        let size = window.inner_size();

        // Backends that work in VMs and without a discrete GPU
        #[cfg(target_os = "windows")]
        let backends = wgpu::Backends::DX12;
        #[cfg(target_os = "linux")]
        let backends = wgpu::Backends::VULKAN | wgpu::Backends::GL;
        #[cfg(not(any(target_os = "windows", target_os = "linux")))]
        let backends = wgpu::Backends::all();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to find suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("Surface reports no texture formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let scale_factor = window.scale_factor() as f32;
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(scale_factor),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                predictable_texture_filtering: false,
            },
        );

        log::info!(
            "Window surface {}x{} ({:?}, {:?})",
            surface_config.width,
            surface_config.height,
            surface_format,
            adapter.get_info().backend
        );

        Ok(Self {
            window,
            window_id,
            _instance: instance,
            surface,
            device,
            queue,
            surface_config,
            egui_ctx,
            egui_state,
            egui_renderer,
        })
    }

    fn window_id(&self) -> WindowId {
        self.window_id
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }

    fn handle_window_event(&mut self, event: WindowEvent, page: &mut PairFontsUI) -> WindowAction {
        let event_response = self.egui_state.on_window_event(&self.window, &event);

        match event {
            WindowEvent::CloseRequested => return WindowAction::Close,
            WindowEvent::Resized(new_size) => {
                if new_size.width > 0 && new_size.height > 0 {
                    self.surface_config.width = new_size.width;
                    self.surface_config.height = new_size.height;
                    self.surface.configure(&self.device, &self.surface_config);
                    self.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => return self.render(page),
            _ => {}
        }

        if event_response.repaint {
            self.window.request_redraw();
        }
        WindowAction::None
    }

    fn render(&mut self, page: &mut PairFontsUI) -> WindowAction {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                self.window.request_redraw();
                return WindowAction::None;
            }
            Err(SurfaceError::Timeout) => {
                log::warn!("Surface timeout");
                return WindowAction::None;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return WindowAction::None;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_output = self.egui_ctx.run(raw_input, |ctx| page.show(ctx));

        let repaint_after = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .map(|viewport| viewport.repaint_delay)
            .unwrap_or(Duration::MAX);
        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);
        for (id, delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Font Pairs Encoder"),
            });
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: egui_output.pixels_per_point,
        };
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Font Pairs Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.094,
                            g: 0.094,
                            b: 0.094,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            // egui_renderer.render() needs a 'static pass
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        WindowAction::Painted { repaint_after }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repaint_deadline() {
        let now = Instant::now();
        assert_eq!(
            repaint_deadline(now, Duration::from_millis(50)),
            Some(now + Duration::from_millis(50))
        );
        assert_eq!(repaint_deadline(now, Duration::ZERO), Some(now));
        assert_eq!(repaint_deadline(now, Duration::MAX), None);
    }
}
