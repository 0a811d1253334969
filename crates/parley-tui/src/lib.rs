//! Terminal UI for Parley
//!
//! A thin shell over [`parley_app::Driver`] that provides terminal I/O:
//! crossterm input, ratatui rendering and the editable input line. All
//! orchestration lives in the generic [`parley_app::Runtime`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod input;
pub mod terminal;
pub mod ui;

pub use input::InputState;
pub use parley_app::{App, AppAction, AppEvent, DEFAULT_MESSAGE_LIMIT, Driver, KeyInput, Runtime};
pub use terminal::{DEFAULT_POLL_INTERVAL, TerminalDriver, TerminalError};
