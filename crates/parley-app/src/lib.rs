//! Application layer for Parley
//!
//! Pure state machine and generic runtime for the chat client. Front ends
//! supply a [`Driver`]; everything else, including the session, is shared.
//!
//! # Components
//!
//! - [`App`]: UI state machine (connection state, message log, roster)
//! - [`PresenceTracker`]: online-users roster
//! - [`Driver`]: trait for front-end I/O
//! - [`Runtime`]: orchestration loop over a Driver and a session

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod input;
mod presence;
mod runtime;

pub use action::AppAction;
pub use app::{App, DEFAULT_MESSAGE_LIMIT};
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use presence::PresenceTracker;
pub use runtime::Runtime;
