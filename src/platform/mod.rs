//! Platform layer
//!
//! Terminal host for the simulation:
//! - `event`: key events and fixed-rate ticks from a background thread
//! - `input`: key held/pressed tracking, turned into `TickInput`
//! - `raster`: draw commands to braille character cells
//! - `terminal`: raw mode and alternate screen guard

pub mod event;
pub mod input;
pub mod raster;
pub mod terminal;

pub use event::{Event, EventHandler};
pub use input::{Key, KeyState};
pub use terminal::Tui;
