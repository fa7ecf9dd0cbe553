//! Page presenter
//!
//! Owns every piece of application state and drives it from one task:
//! input lines, timer events and notification expiry all arrive through the
//! [`Dashboard`] event loop.

mod app;
mod command;
mod state;

pub use app::{Dashboard, Event, Flow, TimerSettings};
pub use command::{Command, CommandError};
pub use state::{Page, Selection, ViewState};
