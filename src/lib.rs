//=========================================================================
// Lumen2D: Library Root
//
// This crate defines the public API surface of the Lumen2D engine.
//
// Responsibilities:
// - Expose the game facade (`Game`, `GameBuilder`)
// - Expose the platform-independent building blocks in `core`
// - Provide the Winit window backend (`WinitPlatform`)
//
// Typical usage:
// ```no_run
// use lumen2d::prelude::*;
//
// fn main() -> Result<(), GameError> {
//     let mut game = GameBuilder::new().build(WinitPlatform::new())?;
//     game.init()?;
//     while game.should_run() {
//         game.begin_frame();
//         game.draw_frame();
//         game.end_frame()?;
//     }
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds letterboxing, events, listeners, textures and the
// platform bridge trait. None of it depends on Winit.
//
// `platform` holds the Winit + softbuffer backend.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `game` defines the frame loop; its types are re-exported below.
//
mod game;

//--- Public Exports ------------------------------------------------------

pub use game::{DrawFn, Game, GameBuilder, GameError};
pub use platform::WinitPlatform;
