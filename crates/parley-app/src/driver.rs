//! Driver trait for abstracting front-end I/O.
//!
//! The [`Driver`] trait decouples the runtime from any particular terminal
//! or test harness. Each front end implements it; the generic
//! [`crate::Runtime`] does all orchestration, including the session.

use std::future::Future;

use crate::{App, AppAction};

/// Front-end I/O used by the [`Runtime`](crate::Runtime).
///
/// # Implementations
///
/// - **TUI**: crossterm events, ratatui rendering
/// - **Tests**: scripted actions, recorded renders
pub trait Driver: Send {
    /// Front-end error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for user input, for at most one poll interval.
    ///
    /// Input may be applied to `app` directly (line editing) and is turned
    /// into actions. An empty vector means nothing happened this interval.
    fn poll_event(
        &mut self,
        app: &mut App,
    ) -> impl Future<Output = Result<Vec<AppAction>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release front-end resources. Called once when the runtime exits.
    fn stop(&mut self);
}
