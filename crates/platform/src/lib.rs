//! Platform layer: windowing & event loop.
//!
//! - Frames are paced to 60 FPS with `WaitUntil`, never a busy loop.
//! - Middle-drag orbits the camera, the wheel zooms.
//! - Resize/close and surface loss are handled here; drawing lives in `renderer`.

pub mod input;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Result, anyhow};
use asset::BlockPreview;
use corelib::orbit::OrbitCamera;
use renderer::GpuState;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::input::{OrbitInput, orbit_input, scroll_input};

pub const WINDOW_TITLE: &str = "Minecraft Block Texture Previewer";
pub const TARGET_FPS: u32 = 60;

/// Window and GPU settings chosen at startup.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub backends: wgpu::Backends,
    pub width: u32,
    pub height: u32,
    pub show_fps: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            width: 800,
            height: 600,
            show_fps: false,
        }
    }
}

/// Frames presented over the last second, for `--show-fps`.
struct FpsCounter {
    window_start: Instant,
    frames: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let elapsed = self.window_start.elapsed();
        if elapsed >= Duration::from_secs(1) {
            log::info!("FPS: {:.1}", self.frames as f64 / elapsed.as_secs_f64());
            self.frames = 0;
            self.window_start = Instant::now();
        }
    }
}

struct ViewerApp {
    config: ViewerConfig,
    block: BlockPreview,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    orbit: OrbitCamera,
    cursor: (f64, f64),
    frame_interval: Duration,
    next_frame: Instant,
    fps: Option<FpsCounter>,
    fatal: Option<anyhow::Error>,
}

impl ViewerApp {
    fn new(config: ViewerConfig, block: BlockPreview) -> Self {
        let fps = config.show_fps.then(FpsCounter::new);
        Self {
            config,
            block,
            window: None,
            gpu: None,
            orbit: OrbitCamera::new(),
            cursor: (0.0, 0.0),
            frame_interval: Duration::from_secs(1) / TARGET_FPS,
            next_frame: Instant::now(),
            fps,
            fatal: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| anyhow!("Failed to create window: {e}"))?,
        );
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            self.config.backends,
            &self.block,
        ))?;

        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let camera = self.orbit.camera(gpu.aspect());
        match gpu.render(&camera) {
            Ok(()) => {
                if let Some(fps) = self.fps.as_mut() {
                    fps.tick();
                }
            }
            Err(err) if GpuState::is_surface_lost(&err) => {
                log::warn!("Surface lost/outdated: {err:?}. Reconfiguring.");
                gpu.recreate_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fatal = Some(anyhow!("GPU out of memory"));
                event_loop.exit();
            }
            Err(err) => log::error!("Surface error: {err:?}"),
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_window(event_loop) {
            log::error!("Viewer initialization failed: {err:#}");
            self.fatal = Some(err);
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
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::debug!("Resized: {}x{}", new_size.width, new_size.height);
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                self.orbit.drag_to(self.cursor);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                match orbit_input(button, state == ElementState::Pressed) {
                    Some(OrbitInput::BeginDrag) => self.orbit.begin_drag(self.cursor),
                    Some(OrbitInput::EndDrag) => self.orbit.end_drag(),
                    _ => {}
                }
            }
            WindowEvent::MouseWheel { delta, .. } => match scroll_input(delta) {
                Some(OrbitInput::ZoomIn) => self.orbit.zoom_in(),
                Some(OrbitInput::ZoomOut) => self.orbit.zoom_out(),
                _ => {}
            },
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(window) = self.window.as_ref() {
                window.request_redraw();
            }
            self.next_frame = now + self.frame_interval;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

/// Open the viewer window for `block` and block until it is closed.
pub fn run_viewer(config: ViewerConfig, block: BlockPreview) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| anyhow!("Failed to create event loop: {e}"))?;
    let mut app = ViewerApp::new(config, block);

    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("Event loop error: {e:?}"))?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_preview_window() {
        let config = ViewerConfig::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.backends, wgpu::Backends::all());
        assert!(!config.show_fps);
    }

    #[test]
    fn fps_counter_resets_after_a_second() {
        let mut fps = FpsCounter::new();
        fps.window_start = Instant::now() - Duration::from_secs(2);
        fps.tick();
        assert_eq!(fps.frames, 0);
        fps.tick();
        assert_eq!(fps.frames, 1);
    }
}
