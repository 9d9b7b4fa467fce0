//! The Dusted application shell.
//!
//! This crate holds everything about the editor that doesn't depend on a windowing toolkit:
//! the document lifecycle, the state of the edit menu, configuration, logging, and the
//! prompts shown to the user. A frontend renders [App] and forwards user actions to it.

#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub use app::*;
pub use config::*;
pub use dialog::*;
pub use env::*;
pub use error::*;
pub use game_output::*;
pub use level::*;
pub use replay::*;

mod app;
mod config;
mod dialog;
mod env;
mod error;
mod game_output;
mod level;
pub mod logging;
mod replay;
