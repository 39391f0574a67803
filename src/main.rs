//=========================================================================
// Lumen2D Demo
//
// Opens a letterboxed 1280x720 window, loads textures from `./assets`
// and moves a sprite with the arrow keys. Escape quits.
//
// Logging:
//   RUST_LOG=trace cargo run   (defaults to "info")
//
//=========================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::io::Write;
use std::process;
use std::rc::Rc;
use std::time::Instant;

use log::{error, info, warn, Level};

use lumen2d::prelude::*;

//=== Logging =============================================================

/// 24-bit ANSI foreground escape for a palette color.
fn ansi(color: Color) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

/// Log target whose records are tagged `[TIME]`.
const TIMER_TARGET: &str = "timer";

/// Tag and line color for a record.
///
/// Trace and debug lines share the `[INFO]` tag but are dimmed.
fn level_tag(level: Level, target: &str) -> (&'static str, Color) {
    if target == TIMER_TARGET {
        return ("TIME", Color::BLUE);
    }
    match level {
        Level::Error => ("ERRO", Color::RED),
        Level::Warn => ("WARN", Color::YELLOW),
        Level::Info => ("INFO", Color::GREEN),
        Level::Debug | Level::Trace => ("INFO", Color::LIGHT_GRAY),
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let (tag, color) = level_tag(record.level(), record.target());
            writeln!(buf, "{}[{}] {}\x1b[0m", ansi(color), tag, record.args())
        })
        .init();
}

//=== Demo ================================================================

const TITLE: &str = "Lumen2D sandbox";
const SPEED: f32 = 1.0;

fn main() {
    init_logging();
    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let held: Rc<RefCell<HashSet<KeyCode>>> = Rc::default();
    let player = Rc::new(Cell::new(Vec2::ZERO));

    let on_down = Rc::clone(&held);
    let on_up = Rc::clone(&held);
    let draw_held = Rc::clone(&held);
    let draw_player = Rc::clone(&player);

    let mut game = GameBuilder::new()
        .with_title(TITLE)
        .with_display_size(Vec2::new(1280.0, 720.0))
        .with_resizable(true)
        .with_load_policy(LoadPolicy::Skip)
        .on(EventKind::KeyDown, move |ctx, event| {
            if let Some(key) = event.key() {
                if key == KeyCode::Escape {
                    ctx.quit();
                }
                on_down.borrow_mut().insert(key);
            }
            Ok(())
        })
        .on(EventKind::KeyUp, move |_, event| {
            if let Some(key) = event.key() {
                on_up.borrow_mut().remove(&key);
            }
            Ok(())
        })
        .on(EventKind::WindowResize, |_, event| {
            info!("Resize: {:?}", event);
            Ok(())
        })
        .on_draw(move |canvas, ctx| {
            let mut step = Vec2::ZERO;
            for key in draw_held.borrow().iter() {
                step += match key {
                    KeyCode::ArrowLeft => Vec2::new(-1.0, 0.0),
                    KeyCode::ArrowRight => Vec2::new(1.0, 0.0),
                    KeyCode::ArrowUp => Vec2::new(0.0, -1.0),
                    KeyCode::ArrowDown => Vec2::new(0.0, 1.0),
                    _ => Vec2::ZERO,
                };
            }
            let position = draw_player.get() + step * SPEED;
            draw_player.set(position);

            draw_scene(canvas, &ctx.resources, position);
        })
        .build(WinitPlatform::new())?;

    game.init()?;

    let started = Instant::now();
    let loaded = game.resources_mut().load_resources_from_folder("assets");
    info!(target: TIMER_TARGET, "Asset scan took {:.2?}", started.elapsed());

    match loaded {
        Ok(report) => info!(
            "Loaded {} texture(s), skipped {}",
            report.loaded.len(),
            report.failed.len()
        ),
        Err(e) => warn!("No assets loaded: {}", e),
    }

    while game.should_run() {
        game.begin_frame();
        game.draw_frame();
        game.end_frame()?;
    }

    Ok(())
}

/// Beams across the middle, then the player on top.
fn draw_scene(canvas: &mut Surface, resources: &ResourceManager, player: Vec2) {
    for (i, name) in ["metal_beam_h1", "metal_beam_h2", "metal_beam_h3"].iter().enumerate() {
        if let Some(beam) = resources.get_texture(name) {
            canvas.blit(beam.surface(), 30 + 16 * i as i32, 20);
        }
    }

    let at = player.round();
    match resources.get_texture("player") {
        Some(texture) => canvas.blit(texture.surface(), at.x as i32, at.y as i32),
        None => canvas.fill_circle(at.x as i32 + 4, at.y as i32 + 4, 4, Color::RED),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
