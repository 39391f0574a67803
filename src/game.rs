//=========================================================================
// Game
//
// Main entry point and frame loop of the engine.
//
// Architecture:
// ```text
//     GameBuilder  ──build(platform)──>  Game  ──init()──>  [Running]
//         │                               │
//         ├─ with_definition()            ├─ begin_frame()  poll + fire events, clear canvas
//         ├─ with_display_size()          ├─ draw_frame()   draw callback onto canvas
//         ├─ on(kind, listener)           └─ end_frame()    scale → letterbox → present → cap FPS
//         └─ on_draw(callback)
// ```
//
// Lifecycle:
//   Uninitialized ──init()──> Running ──quit()──> Stopped ──end_frame()──> Terminated
//
// Only one Game may be alive per process; `build()` fails otherwise.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::mem;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use crate::core::{
    Color, Context, DispatchOutcome, Event, EventKind, EventRegistry, FrameClock, GameState,
    Letterbox, ListenerResult, LoadPolicy, Platform, PlatformError, PlatformEvent,
    ResourceManager, Surface, Vec2, WindowConfig,
};

//=== GameError ===========================================================

/// Errors raised by the game lifecycle.
#[derive(Debug)]
pub enum GameError {
    /// Another [`Game`] is still alive in this process.
    AlreadyExists,

    /// A frame call was made before [`Game::init`].
    NotInitialized,

    /// Lifecycle call made in a state that does not allow it.
    InvalidState(&'static str),

    /// Backend failure while opening or presenting.
    Platform(PlatformError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists => write!(f, "Only one game instance allowed"),
            Self::NotInitialized => write!(f, "Game has not been initialized"),
            Self::InvalidState(what) => write!(f, "Invalid game state: {}", what),
            Self::Platform(e) => write!(f, "Platform error: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Platform(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlatformError> for GameError {
    fn from(e: PlatformError) -> Self {
        Self::Platform(e)
    }
}

//=== Single Instance Guard ===============================================

static GAME_ALIVE: AtomicBool = AtomicBool::new(false);

/// Holds the process-wide "a game exists" flag; released on drop.
struct InstanceGuard;

impl InstanceGuard {
    fn acquire() -> Result<Self, GameError> {
        GAME_ALIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InstanceGuard)
            .map_err(|_| GameError::AlreadyExists)
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        GAME_ALIVE.store(false, Ordering::Release);
    }
}

//=== GameBuilder =========================================================

/// Draw callback invoked by [`Game::draw_frame`].
pub type DrawFn = Box<dyn FnMut(&mut Surface, &Context)>;

/// Builder for configuring and constructing a [`Game`].
///
/// # Default Values
///
/// - **Title**: "New game"
/// - **Definition** (canvas size): 128×64
/// - **Display size**: 1280×720, resizable
/// - **Clear color**: [`Color::GRAY`]
/// - **Target FPS**: 60.0
/// - **Assets dir**: "." with [`LoadPolicy::Abort`]
///
/// # Examples
///
/// ```no_run
/// use lumen2d::prelude::*;
///
/// let mut game = GameBuilder::new()
///     .with_title("Sandbox")
///     .on(EventKind::KeyDown, |ctx, event| {
///         if event.key() == Some(KeyCode::Escape) {
///             ctx.quit();
///         }
///         Ok(())
///     })
///     .build(WinitPlatform::new())
///     .expect("a game is already running");
/// ```
pub struct GameBuilder {
    title: String,
    definition: Vec2,
    display_size: Vec2,
    resizable: bool,
    clear_color: Color,
    target_fps: f64,
    assets_dir: PathBuf,
    load_policy: LoadPolicy,
    listeners: EventRegistry,
    draw: Option<DrawFn>,
}

impl GameBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "New game".to_string(),
            definition: Vec2::new(128.0, 64.0),
            display_size: Vec2::new(1280.0, 720.0),
            resizable: true,
            clear_color: Color::GRAY,
            target_fps: 60.0,
            assets_dir: PathBuf::from("."),
            load_policy: LoadPolicy::Abort,
            listeners: EventRegistry::new(),
            draw: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the fixed canvas resolution.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not strictly positive.
    pub fn with_definition(mut self, definition: Vec2) -> Self {
        assert!(
            definition.is_positive(),
            "Definition must be positive, got {}",
            definition
        );
        self.definition = definition.floor();
        self
    }

    /// Sets the requested initial window size.
    pub fn with_display_size(mut self, size: Vec2) -> Self {
        self.display_size = size;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Sets the frame-rate cap.
    ///
    /// # Panics
    ///
    /// Panics if `fps <= 0.0`.
    pub fn with_target_fps(mut self, fps: f64) -> Self {
        assert!(fps > 0.0, "Target FPS must be positive, got {}", fps);
        self.target_fps = fps;
        self
    }

    /// Root directory for relative texture paths.
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Failure policy for folder loads.
    pub fn with_load_policy(mut self, policy: LoadPolicy) -> Self {
        self.load_policy = policy;
        self
    }

    /// Registers an event listener.
    pub fn on<F>(mut self, kind: EventKind, listener: F) -> Self
    where
        F: FnMut(&mut Context, &Event) -> ListenerResult + 'static,
    {
        self.listeners.register(kind, listener);
        self
    }

    /// Sets the callback that draws onto the canvas every frame.
    pub fn on_draw<F>(mut self, draw: F) -> Self
    where
        F: FnMut(&mut Surface, &Context) + 'static,
    {
        self.draw = Some(Box::new(draw));
        self
    }

    /// Builds the game on top of `platform`.
    ///
    /// The window is not opened until [`Game::init`].
    ///
    /// # Errors
    ///
    /// [`GameError::AlreadyExists`] if another game is alive.
    pub fn build<P: Platform>(self, platform: P) -> Result<Game<P>, GameError> {
        let guard = InstanceGuard::acquire()?;

        info!(
            "Building game '{}' (definition: {}x{}, target: {} FPS)",
            self.title, self.definition.x, self.definition.y, self.target_fps
        );

        let resources = ResourceManager::with_root(self.assets_dir).with_policy(self.load_policy);
        let canvas = Surface::filled(
            self.definition.x as u32,
            self.definition.y as u32,
            self.clear_color,
        );

        Ok(Game {
            platform,
            context: Context::new(resources, self.clear_color),
            listeners: self.listeners,
            draw: self.draw,
            title: self.title,
            definition: self.definition,
            display_size: self.display_size,
            resizable: self.resizable,
            canvas,
            letterbox: Letterbox::fit(self.display_size, self.definition),
            letterbox_surface: Surface::new(0, 0),
            window_frame: Surface::new(0, 0),
            clock: FrameClock::new(self.target_fps),
            pending: Vec::with_capacity(32),
            _guard: guard,
        })
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Game ================================================================

/// Window, canvas and frame loop.
///
/// Create via [`GameBuilder`], call [`Game::init`], then drive the loop:
///
/// ```no_run
/// # use lumen2d::prelude::*;
/// # fn main() -> Result<(), GameError> {
/// let mut game = GameBuilder::new().build(WinitPlatform::new())?;
/// game.init()?;
/// while game.should_run() {
///     game.begin_frame();
///     game.draw_frame();
///     game.end_frame()?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct Game<P: Platform> {
    platform: P,
    context: Context,
    listeners: EventRegistry,
    draw: Option<DrawFn>,

    title: String,
    definition: Vec2,
    display_size: Vec2,
    resizable: bool,

    canvas: Surface,
    letterbox: Letterbox,
    letterbox_surface: Surface,
    window_frame: Surface,

    clock: FrameClock,
    pending: Vec<PlatformEvent>,
    _guard: InstanceGuard,
}

impl<P: Platform> Game<P> {
    //--- Initialization ---------------------------------------------------

    /// Opens the window, computes the initial letterbox and starts running.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidState`] if already initialized
    /// - [`GameError::Platform`] if the window cannot be opened
    pub fn init(&mut self) -> Result<(), GameError> {
        if self.context.state() != GameState::Uninitialized {
            return Err(GameError::InvalidState("init called twice"));
        }

        let config = WindowConfig {
            title: self.title.clone(),
            size: self.display_size,
            resizable: self.resizable,
        };
        let size = self.platform.open(&config)?;

        self.window_resize(size);
        self.platform.set_title(&self.title);
        self.clock.reset();
        self.context.set_state(GameState::Running);

        info!(
            "Game '{}' running ({}x{} window)",
            self.title, self.display_size.x, self.display_size.y
        );
        Ok(())
    }

    //--- Lifecycle --------------------------------------------------------

    pub fn should_run(&self) -> bool {
        self.context.should_run()
    }

    /// Stops the loop; the next [`Game::end_frame`] tears down.
    pub fn quit(&mut self) {
        if self.context.should_run() {
            info!("Quit requested");
        }
        self.context.quit();
    }

    pub fn state(&self) -> GameState {
        self.context.state()
    }

    //--- Events -----------------------------------------------------------

    /// Registers an event listener after construction.
    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> &mut Self
    where
        F: FnMut(&mut Context, &Event) -> ListenerResult + 'static,
    {
        self.listeners.register(kind, listener);
        self
    }

    /// Dispatches `event` to its listeners.
    ///
    /// A `Quit` event stops the game before its listeners run.
    pub fn fire_event(&mut self, event: Event) -> DispatchOutcome {
        if event.kind() == EventKind::Quit {
            self.quit();
        }
        self.listeners.fire(&event, &mut self.context)
    }

    //--- Frame Loop -------------------------------------------------------

    /// Polls platform events, fires them, and clears the canvas.
    ///
    /// Does nothing unless the game is running.
    pub fn begin_frame(&mut self) {
        if !self.should_run() {
            return;
        }

        let mut events = mem::take(&mut self.pending);
        self.platform.poll_events(&mut events);

        for native in events.drain(..) {
            match native {
                PlatformEvent::CloseRequested => {
                    self.fire_event(Event::Quit);
                }
                PlatformEvent::Key { key, pressed: true } => {
                    self.fire_event(Event::KeyDown(key));
                }
                PlatformEvent::Key { key, pressed: false } => {
                    self.fire_event(Event::KeyUp(key));
                }
                PlatformEvent::Resized(size) => {
                    self.window_resize(size);
                    self.fire_event(Event::WindowResize(size));
                }
            }
        }
        self.pending = events;

        self.canvas.fill(self.context.clear_color());
    }

    /// Runs the draw callback on the canvas.
    pub fn draw_frame(&mut self) {
        if let Some(draw) = self.draw.as_mut() {
            draw(&mut self.canvas, &self.context);
        }
    }

    /// Presents the frame, or tears down if the game was stopped.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotInitialized`] before [`Game::init`]
    /// - [`GameError::Platform`] if presentation fails
    pub fn end_frame(&mut self) -> Result<(), GameError> {
        match self.context.state() {
            GameState::Uninitialized => Err(GameError::NotInitialized),
            GameState::Stopped => self.exit(),
            GameState::Terminated => Ok(()),
            GameState::Running => self.present(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.context.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.context.resources
    }

    pub fn canvas(&self) -> &Surface {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Surface {
        &mut self.canvas
    }

    pub fn letterbox(&self) -> &Letterbox {
        &self.letterbox
    }

    pub fn definition(&self) -> Vec2 {
        self.definition
    }

    pub fn display_size(&self) -> Vec2 {
        self.display_size
    }

    pub fn set_clear_color(&mut self, color: Color) -> &mut Self {
        self.context.set_clear_color(color);
        self
    }

    /// Instantaneous FPS of the last presented frame.
    pub fn fps(&self) -> f64 {
        self.clock.fps()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    //--- Internal Helpers -------------------------------------------------

    /// Recomputes the letterbox and reallocates the scaled surfaces.
    fn window_resize(&mut self, size: Vec2) {
        self.display_size = size;
        self.letterbox = Letterbox::fit(size, self.definition);

        let (tw, th) = self.letterbox.target_pixels();
        self.letterbox_surface = Surface::new(tw, th);

        let window = size.floor();
        self.window_frame = Surface::new(window.x.max(0.0) as u32, window.y.max(0.0) as u32);

        debug!(
            "Window resized to {}x{}, letterbox {}x{} at {:?}",
            size.x,
            size.y,
            tw,
            th,
            self.letterbox.origin()
        );
    }

    fn present(&mut self) -> Result<(), GameError> {
        if !self.letterbox.is_empty() {
            self.canvas.scale_into(&mut self.letterbox_surface);

            let (x, y) = self.letterbox.origin();
            self.window_frame.fill(Color::BLACK);
            self.window_frame.blit(&self.letterbox_surface, x, y);

            if let Err(e) = self.platform.present(&self.window_frame) {
                error!("Present failed: {}", e);
                return Err(e.into());
            }
        }

        self.clock.tick();
        let title = format!("{} - FPS: {:.0}", self.title, self.clock.fps());
        self.platform.set_title(&title);
        Ok(())
    }

    /// Releases platform resources once the game has been stopped.
    fn exit(&mut self) -> Result<(), GameError> {
        if self.context.state() != GameState::Stopped {
            return Err(GameError::InvalidState(
                "internal exit called, but the game is not stopped",
            ));
        }

        self.platform.shutdown();
        self.context.set_state(GameState::Terminated);
        info!("Game '{}' shut down", self.title);
        Ok(())
    }
}

impl<P: Platform> Drop for Game<P> {
    fn drop(&mut self) {
        if matches!(self.context.state(), GameState::Running | GameState::Stopped) {
            debug!("Game dropped before teardown, shutting platform down");
            self.platform.shutdown();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Mutex, MutexGuard};

    use crate::core::platform_bridge::scripted::ScriptedPlatform;
    use crate::core::KeyCode;

    // Games share the single-instance flag, so tests that build one run
    // one at a time.
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    fn lock() -> MutexGuard<'static, ()> {
        TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 40x30 window around a 4x2 canvas: letterbox 40x20 at (0, 5).
    fn small_builder() -> GameBuilder {
        GameBuilder::new()
            .with_title("test")
            .with_definition(Vec2::new(4.0, 2.0))
            .with_display_size(Vec2::new(40.0, 30.0))
            .with_target_fps(1000.0)
    }

    fn running(builder: GameBuilder) -> Game<ScriptedPlatform> {
        let mut game = builder.build(ScriptedPlatform::new()).unwrap();
        game.init().unwrap();
        game
    }

    fn recorder(kind: EventKind) -> (GameBuilder, Rc<RefCell<Vec<Event>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let builder = small_builder().on(kind, move |_, e| {
            s.borrow_mut().push(*e);
            Ok(())
        });
        (builder, seen)
    }

    //=====================================================================
    // GameBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = GameBuilder::new();
        assert_eq!(builder.title, "New game");
        assert_eq!(builder.definition, Vec2::new(128.0, 64.0));
        assert_eq!(builder.display_size, Vec2::new(1280.0, 720.0));
        assert!(builder.resizable);
        assert_eq!(builder.clear_color, Color::GRAY);
        assert_eq!(builder.target_fps, 60.0);
        assert_eq!(builder.load_policy, LoadPolicy::Abort);
    }

    #[test]
    #[should_panic(expected = "Target FPS must be positive")]
    fn builder_with_target_fps_panics_on_zero() {
        GameBuilder::new().with_target_fps(0.0);
    }

    #[test]
    #[should_panic(expected = "Definition must be positive")]
    fn builder_with_definition_panics_on_zero() {
        GameBuilder::new().with_definition(Vec2::new(0.0, 64.0));
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let builder = GameBuilder::new()
            .with_title("x")
            .with_resizable(false)
            .with_clear_color(Color::BLUE)
            .with_assets_dir("assets")
            .with_load_policy(LoadPolicy::Skip)
            .on(EventKind::Quit, |_, _| Ok(()))
            .on(EventKind::Quit, |_, _| Ok(()));

        assert!(!builder.resizable);
        assert_eq!(builder.clear_color, Color::BLUE);
        assert_eq!(builder.assets_dir, PathBuf::from("assets"));
        assert_eq!(builder.listeners.count(EventKind::Quit), 2);
    }

    //=====================================================================
    // Single Instance
    //=====================================================================

    #[test]
    fn second_game_is_rejected_while_first_alive() {
        let _l = lock();
        let first = GameBuilder::new().build(ScriptedPlatform::new()).unwrap();

        let second = GameBuilder::new().build(ScriptedPlatform::new());
        assert!(matches!(second, Err(GameError::AlreadyExists)));

        drop(first);
        assert!(GameBuilder::new().build(ScriptedPlatform::new()).is_ok());
    }

    //=====================================================================
    // Initialization
    //=====================================================================

    #[test]
    fn init_opens_window_and_fits_letterbox() {
        let _l = lock();
        let game = running(
            GameBuilder::new()
                .with_title("Overcooked-like")
                .with_resizable(false),
        );

        let opened = game.platform().opened.as_ref().unwrap();
        assert_eq!(opened.title, "Overcooked-like");
        assert_eq!(opened.size, Vec2::new(1280.0, 720.0));
        assert!(!opened.resizable);

        assert_eq!(game.state(), GameState::Running);
        assert!(game.should_run());
        assert_eq!(game.letterbox().target_pixels(), (1280, 640));
        assert_eq!(game.platform().titles, vec!["Overcooked-like".to_string()]);
    }

    #[test]
    fn init_uses_size_reported_by_platform() {
        let _l = lock();
        let mut platform = ScriptedPlatform::new();
        platform.initial_size = Some(Vec2::new(2000.0, 500.0));

        let mut game = GameBuilder::new().build(platform).unwrap();
        game.init().unwrap();

        assert_eq!(game.display_size(), Vec2::new(2000.0, 500.0));
        assert_eq!(game.letterbox().target_pixels(), (1000, 500));
    }

    #[test]
    fn init_twice_is_invalid() {
        let _l = lock();
        let mut game = running(small_builder());
        assert!(matches!(game.init(), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn init_failure_leaves_game_uninitialized() {
        let _l = lock();
        let mut platform = ScriptedPlatform::new();
        platform.fail_open = true;

        let mut game = GameBuilder::new().build(platform).unwrap();
        assert!(matches!(game.init(), Err(GameError::Platform(_))));
        assert_eq!(game.state(), GameState::Uninitialized);
    }

    #[test]
    fn end_frame_before_init_is_an_error() {
        let _l = lock();
        let mut game = small_builder().build(ScriptedPlatform::new()).unwrap();
        assert!(matches!(game.end_frame(), Err(GameError::NotInitialized)));
    }

    //=====================================================================
    // Event Translation
    //=====================================================================

    #[test]
    fn resize_updates_letterbox_and_fires_event() {
        let _l = lock();
        let (builder, seen) = recorder(EventKind::WindowResize);
        let mut game = running(builder);

        let size = Vec2::new(1280.0, 720.0);
        game.platform.push_batch(vec![PlatformEvent::Resized(size)]);
        game.begin_frame();

        assert_eq!(*seen.borrow(), vec![Event::WindowResize(size)]);
        assert_eq!(game.display_size(), size);
        // 4x2 canvas has the same 0.5 ratio as 128x64
        assert_eq!(game.letterbox().target_pixels(), (1280, 640));
        assert_eq!(game.letterbox().origin(), (0, 40));
    }

    #[test]
    fn key_events_fire_down_and_up() {
        let _l = lock();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (down, up) = (Rc::clone(&seen), Rc::clone(&seen));
        let mut game = running(
            small_builder()
                .on(EventKind::KeyDown, move |_, e| {
                    down.borrow_mut().push(*e);
                    Ok(())
                })
                .on(EventKind::KeyUp, move |_, e| {
                    up.borrow_mut().push(*e);
                    Ok(())
                }),
        );

        game.platform.push_batch(vec![
            PlatformEvent::Key { key: KeyCode::KeyA, pressed: true },
            PlatformEvent::Key { key: KeyCode::KeyA, pressed: false },
        ]);
        game.begin_frame();

        assert_eq!(
            *seen.borrow(),
            vec![Event::KeyDown(KeyCode::KeyA), Event::KeyUp(KeyCode::KeyA)]
        );
        assert!(game.should_run());
    }

    #[test]
    fn escape_listener_stops_the_loop() {
        let _l = lock();
        let mut game = running(small_builder().on(EventKind::KeyDown, |ctx, e| {
            if e.key() == Some(KeyCode::Escape) {
                ctx.quit();
            }
            Ok(())
        }));

        game.platform.push_batch(vec![PlatformEvent::Key {
            key: KeyCode::Escape,
            pressed: true,
        }]);
        game.begin_frame();

        assert!(!game.should_run());
        assert_eq!(game.state(), GameState::Stopped);
    }

    //=====================================================================
    // Quit & Teardown
    //=====================================================================

    #[test]
    fn close_request_fires_quit_and_next_end_frame_tears_down() {
        let _l = lock();
        let (builder, seen) = recorder(EventKind::Quit);
        let mut game = running(builder);

        game.platform.push_batch(vec![PlatformEvent::CloseRequested]);
        game.begin_frame();

        assert_eq!(*seen.borrow(), vec![Event::Quit]);
        assert!(!game.should_run());

        game.end_frame().unwrap();
        assert_eq!(game.state(), GameState::Terminated);
        assert_eq!(game.platform().shutdown_calls, 1);
        assert!(game.platform().presented.is_empty());

        // Further frames are no-ops
        game.begin_frame();
        game.end_frame().unwrap();
        assert_eq!(game.platform().shutdown_calls, 1);
    }

    #[test]
    fn firing_quit_invokes_listener_and_stops() {
        let _l = lock();
        let (builder, seen) = recorder(EventKind::Quit);
        let mut game = running(builder);

        let outcome = game.fire_event(Event::Quit);

        assert_eq!(outcome.invoked, 1);
        assert_eq!(*seen.borrow(), vec![Event::Quit]);
        assert!(!game.should_run());
    }

    #[test]
    fn exit_while_running_is_invalid() {
        let _l = lock();
        let mut game = running(small_builder());
        assert!(matches!(game.exit(), Err(GameError::InvalidState(_))));
        assert_eq!(game.platform().shutdown_calls, 0);
    }

    #[test]
    fn dropping_a_running_game_releases_instance() {
        let _l = lock();
        let game = running(small_builder());
        drop(game);
        // Guard released: a new game can be built
        assert!(small_builder().build(ScriptedPlatform::new()).is_ok());
    }

    //=====================================================================
    // Presentation
    //=====================================================================

    #[test]
    fn end_frame_presents_letterboxed_canvas() {
        let _l = lock();
        let mut game = running(small_builder().with_clear_color(Color::BLUE));

        game.begin_frame();
        game.draw_frame();
        game.end_frame().unwrap();

        let frame = game.platform().last_frame().unwrap();
        assert_eq!((frame.width(), frame.height()), (40, 30));

        // Bars above and below, canvas rows 5..25
        assert_eq!(frame.get(0, 4), Some(Color::BLACK));
        assert_eq!(frame.get(0, 5), Some(Color::BLUE));
        assert_eq!(frame.get(39, 24), Some(Color::BLUE));
        assert_eq!(frame.get(39, 25), Some(Color::BLACK));
    }

    #[test]
    fn draw_callback_is_scaled_into_frame() {
        let _l = lock();
        let mut game = running(small_builder().on_draw(|canvas, _| {
            canvas.set(0, 0, Color::RED);
        }));

        game.begin_frame();
        game.draw_frame();
        game.end_frame().unwrap();

        let frame = game.platform().last_frame().unwrap();
        // Each canvas pixel becomes a 10x10 block
        assert_eq!(frame.get(0, 5), Some(Color::RED));
        assert_eq!(frame.get(9, 14), Some(Color::RED));
        assert_eq!(frame.get(10, 5), Some(Color::GRAY));
    }

    #[test]
    fn begin_frame_clears_with_context_color() {
        let _l = lock();
        let mut game = running(small_builder().on(EventKind::KeyDown, |ctx, _| {
            ctx.set_clear_color(Color::GREEN);
            Ok(())
        }));

        game.canvas_mut().fill(Color::RED);
        game.platform.push_batch(vec![PlatformEvent::Key {
            key: KeyCode::Space,
            pressed: true,
        }]);
        game.begin_frame();

        assert!(game.canvas().pixels().iter().all(|&p| p == Color::GREEN));
    }

    #[test]
    fn title_reports_fps_after_frame() {
        let _l = lock();
        let mut game = running(small_builder());

        game.begin_frame();
        game.end_frame().unwrap();

        let title = game.platform().titles.last().unwrap();
        assert!(title.starts_with("test - FPS: "), "got {}", title);
        assert!(game.fps() > 0.0);
    }

    #[test]
    fn zero_size_window_skips_presentation() {
        let _l = lock();
        let mut game = running(small_builder());

        game.platform.push_batch(vec![PlatformEvent::Resized(Vec2::new(0.0, 0.0))]);
        game.begin_frame();
        game.end_frame().unwrap();

        assert!(game.letterbox().is_empty());
        assert!(game.platform().presented.is_empty());
        assert!(game.should_run());
    }
}
