//! Views
//!
//! Rendering is split in two:
//!
//! - **model**: pure projection of a bundle and a type filter into cards,
//!   testable without a terminal
//! - **terminal**: thin adapter that writes the model to any `io::Write`

mod model;
mod terminal;

pub use model::{Card, RenderedView};
pub use terminal::{sanitize, DashboardHeader, Palette, TerminalRenderer};
