//=========================================================================
// Platform Subsystem
//
// Winit + softbuffer implementation of the `Platform` bridge.
//
// Architecture:
// ```text
//  Game thread (main):
//  ┌───────────────────────────────────────────────────────┐
//  │  Game::begin_frame()                                  │
//  │   ↓ poll_events()                                     │
//  │  EventLoop::pump_app_events(0ms) ──> WinitState       │
//  │                                       ├─ InputProcessor
//  │                                       └─ pending: Vec<PlatformEvent>
//  │                                                       │
//  │  Game::end_frame()                                    │
//  │   ↓ present(frame)                                    │
//  │  softbuffer::Surface ── 0RGB copy ──> window          │
//  └───────────────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Pull model**: the game owns the loop and pumps Winit once per
//   frame with a zero timeout instead of handing control to `run_app`
// - **Lazy window**: created in `resumed()` during `open()`, as Winit
//   requires on mobile and Wayland
// - **Close is an event**: `CloseRequested` is forwarded, never acted on
//   here; the game decides when to shut down
// - **Main thread requirement**: Winit mandates the main thread on macOS,
//   so the game loop must run there
//
// Notes:
// Winit allows one event loop per process. A second `open()` after
// `shutdown()` fails with `PlatformError::EventLoopCreation`.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Duration;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::math::Vec2;
use crate::core::platform_bridge::{Platform, PlatformError, PlatformEvent, WindowConfig};
use crate::core::surface::Surface;
use input_processor::InputProcessor;

/// Pump iterations `open()` waits for the window before giving up.
const OPEN_ATTEMPTS: usize = 200;

/// Pump timeout while waiting for the window.
const OPEN_PUMP_TIMEOUT: Duration = Duration::from_millis(5);

type SoftContext = softbuffer::Context<Rc<Window>>;
type SoftSurface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

//=== WinitPlatform =======================================================

/// Desktop window with a CPU framebuffer.
///
/// # Lifecycle
///
/// 1. **Construction**: `WinitPlatform::new()` allocates nothing
/// 2. **Open**: creates the event loop, window and softbuffer surface
/// 3. **Per frame**: `poll_events` pumps Winit, `present` copies pixels
/// 4. **Shutdown**: drops surface, window and event loop
///
/// # Thread Safety
///
/// Not Send/Sync: must stay on the main thread.
pub struct WinitPlatform {
    event_loop: Option<EventLoop<()>>,
    state: WinitState,
}

impl WinitPlatform {
    pub fn new() -> Self {
        Self {
            event_loop: None,
            state: WinitState::new(),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn create_surface(window: &Rc<Window>) -> Result<(SoftContext, SoftSurface), PlatformError> {
        let context = softbuffer::Context::new(Rc::clone(window))
            .map_err(|e| PlatformError::Surface(e.to_string()))?;
        let surface = softbuffer::Surface::new(&context, Rc::clone(window))
            .map_err(|e| PlatformError::Surface(e.to_string()))?;
        Ok((context, surface))
    }
}

impl Default for WinitPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for WinitPlatform {
    fn open(&mut self, config: &WindowConfig) -> Result<Vec2, PlatformError> {
        debug!(target: "platform", "Creating Winit event loop");
        let mut event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        self.state.config = Some(config.clone());

        for _ in 0..OPEN_ATTEMPTS {
            let status = event_loop.pump_app_events(Some(OPEN_PUMP_TIMEOUT), &mut self.state);

            if let Some(e) = self.state.error.take() {
                return Err(e);
            }
            if self.state.window.is_some() {
                break;
            }
            if let PumpStatus::Exit(code) = status {
                return Err(PlatformError::EventLoopCreation(format!(
                    "event loop exited with code {} before the window opened",
                    code
                )));
            }
        }

        let window = self
            .state
            .window
            .clone()
            .ok_or_else(|| PlatformError::WindowCreation("timed out waiting for window".into()))?;

        let (context, surface) = Self::create_surface(&window)?;
        self.state.context = Some(context);
        self.state.surface = Some(surface);
        self.event_loop = Some(event_loop);

        let size = window.inner_size();
        Ok(Vec2::from_size(size.width, size.height))
    }

    fn poll_events(&mut self, events: &mut Vec<PlatformEvent>) {
        if let Some(event_loop) = self.event_loop.as_mut() {
            if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut self.state) {
                warn!(target: "platform", "Event loop exited (code {})", code);
                self.state.pending.push(PlatformEvent::CloseRequested);
            }
        }
        events.append(&mut self.state.pending);
    }

    fn present(&mut self, frame: &Surface) -> Result<(), PlatformError> {
        let surface = self.state.surface.as_mut().ok_or(PlatformError::NotOpen)?;

        let (Some(width), Some(height)) =
            (NonZeroU32::new(frame.width()), NonZeroU32::new(frame.height()))
        else {
            trace!(target: "platform", "Skipping present of empty frame");
            return Ok(());
        };

        if self.state.surface_size != (frame.width(), frame.height()) {
            surface
                .resize(width, height)
                .map_err(|e| PlatformError::Surface(e.to_string()))?;
            self.state.surface_size = (frame.width(), frame.height());
        }

        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| PlatformError::Surface(e.to_string()))?;
        for (dst, pixel) in buffer.iter_mut().zip(frame.pixels()) {
            *dst = pixel.to_xrgb();
        }
        buffer
            .present()
            .map_err(|e| PlatformError::Surface(e.to_string()))
    }

    fn set_title(&mut self, title: &str) {
        if let Some(window) = &self.state.window {
            window.set_title(title);
        }
    }

    fn shutdown(&mut self) {
        // Surface and context borrow the window handle; drop them first.
        self.state.surface = None;
        self.state.context = None;
        if self.state.window.take().is_some() {
            info!(target: "platform", "Window closed");
        }
        self.state.pending.clear();
        self.event_loop = None;
    }
}

//=== WinitState ==========================================================

/// Application handler fed by `pump_app_events`.
struct WinitState {
    config: Option<WindowConfig>,
    window: Option<Rc<Window>>,
    context: Option<SoftContext>,
    surface: Option<SoftSurface>,
    surface_size: (u32, u32),
    input_processor: InputProcessor,
    pending: Vec<PlatformEvent>,
    error: Option<PlatformError>,
}

impl WinitState {
    fn new() -> Self {
        Self {
            config: None,
            window: None,
            context: None,
            surface: None,
            surface_size: (0, 0),
            input_processor: InputProcessor::new(),
            pending: Vec::with_capacity(32),
            error: None,
        }
    }

    /// Records the window events the game cares about.
    fn record(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.pending.push(PlatformEvent::CloseRequested);
            }

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Window resized to {}x{}", size.width, size.height);
                self.pending
                    .push(PlatformEvent::Resized(Vec2::from_size(size.width, size.height)));
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.pending.push(event);
                } else {
                    trace!(target: "platform::input", "Key event ignored");
                }
            }

            _ => {
                // Ignore: mouse, focus, redraw, etc.
            }
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for WinitState {
    /// Creates the window on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }
        let Some(config) = &self.config else {
            return;
        };

        let size = config.size.floor();
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(size.x.max(1.0) as u32, size.y.max(1.0) as u32))
            .with_resizable(config.resizable);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.window = Some(Rc::new(window));
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.error = Some(PlatformError::WindowCreation(e.to_string()));
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        self.record(&event);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
