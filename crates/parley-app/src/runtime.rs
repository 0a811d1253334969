//! Generic runtime for application orchestration.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Session`]: the connection and its reader thread
//! - [`Driver`]: front-end I/O
//!
//! Each cycle polls the driver for at most one interval, executes the
//! resulting actions, then drains the session. Draining reads the state
//! before the queue: the reader enqueues its final notice before it
//! publishes a terminal state, so nothing is left behind when the session
//! is dropped.
//!
//! Connecting runs on the blocking pool and is checked once per cycle, so
//! keys are still handled while an attempt is in flight.

use std::mem;

use parley_client::{ConnectError, ConnectionState, SendError, Session, SessionConfig};
use tokio::task::{self, JoinHandle};

use crate::{App, AppAction, AppEvent, Driver};

/// Generic runtime that owns the App, the session and the driver.
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    config: SessionConfig,
    session: Option<Session>,
    /// Connect attempt in flight. At most one, and never alongside `session`.
    pending: Option<JoinHandle<Result<Session, ConnectError>>>,
    /// Session state as last reported to the App.
    last_state: ConnectionState,
}

impl<D: Driver> Runtime<D> {
    /// Create a runtime. Nothing connects until [`Runtime::run`].
    pub fn new(driver: D, app: App, config: SessionConfig) -> Self {
        Self {
            driver,
            app,
            config,
            session: None,
            pending: None,
            last_state: ConnectionState::Disconnected,
        }
    }

    /// Run the event loop until the App asks to quit.
    ///
    /// Connects once at startup. Connection failures are shown to the user,
    /// never returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to poll or render.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        let initial = self.app.connect();
        let mut quit = self.process_actions(initial).await?;
        while !quit {
            quit = self.process_cycle().await?;
        }

        self.close_session();
        self.driver.stop();
        tracing::debug!("runtime stopped");
        Ok(())
    }

    /// One poll-execute-drain cycle. Returns `true` if the App quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let actions = self.driver.poll_event(&mut self.app).await?;
        if !actions.is_empty() && self.process_actions(actions).await? {
            return Ok(true);
        }

        let mut actions = self.finish_connect().await;
        actions.extend(self.drain_session());
        self.process_actions(actions).await
    }

    /// Execute actions, including any they produce. Renders at most once.
    ///
    /// Returns `true` on [`AppAction::Quit`].
    async fn process_actions(&mut self, initial: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending = initial;
        let mut needs_render = false;

        while !pending.is_empty() {
            for action in mem::take(&mut pending) {
                match action {
                    AppAction::Render => needs_render = true,
                    AppAction::Quit => return Ok(true),
                    AppAction::Connect => pending.extend(self.connect()),
                    AppAction::Disconnect => pending.extend(self.close_session()),
                    AppAction::SendMessage { text } => pending.extend(self.send(&text)),
                }
            }
        }

        if needs_render {
            self.driver.render(&self.app)?;
        }
        Ok(false)
    }

    /// Start opening a new session on the blocking pool.
    fn connect(&mut self) -> Vec<AppAction> {
        let mut actions = self.close_session();
        actions.extend(self.app.handle(AppEvent::Connecting));

        let host = self.app.host().to_string();
        let port = self.app.port().to_string();
        let nickname = self.app.nickname().to_string();
        let config = self.config.clone();

        self.pending = Some(task::spawn_blocking(move || {
            Session::connect(&host, &port, &nickname, &config)
        }));
        actions
    }

    /// Report a finished connect attempt. Does nothing while it runs.
    async fn finish_connect(&mut self) -> Vec<AppAction> {
        let Some(handle) = self.pending.take_if(|handle| handle.is_finished()) else {
            return vec![];
        };

        let event = match handle.await {
            Ok(Ok(session)) => {
                let peer_addr = session.peer_addr().to_string();
                self.last_state = session.current_state();
                self.session = Some(session);
                AppEvent::Connected { peer_addr }
            },
            Ok(Err(e)) => {
                tracing::warn!(error = %e, transient = e.is_transient(), "connect failed");
                self.last_state = ConnectionState::Failed;
                AppEvent::ConnectFailed { message: e.to_string() }
            },
            Err(e) => {
                tracing::error!(error = %e, "connect task failed");
                self.last_state = ConnectionState::Failed;
                AppEvent::ConnectFailed { message: e.to_string() }
            },
        };

        self.app.handle(event)
    }

    fn send(&mut self, text: &str) -> Vec<AppAction> {
        let result = match &self.session {
            Some(session) => session.send(text),
            None => Err(SendError::NotConnected { state: ConnectionState::Disconnected }),
        };

        match result {
            Ok(()) => vec![],
            Err(e) => {
                tracing::debug!(error = %e, "send rejected");
                self.app.handle(AppEvent::SendFailed { message: e.to_string() })
            },
        }
    }

    /// Hand queued events and state changes to the App.
    ///
    /// A session found in a terminal state is dropped after its last
    /// events are drained.
    fn drain_session(&mut self) -> Vec<AppAction> {
        let Some(session) = self.session.as_mut() else {
            return vec![];
        };

        let state = session.current_state();
        let events = session.poll();

        let mut actions = Vec::new();
        for event in events {
            actions.extend(self.app.handle(AppEvent::Inbound(event)));
        }

        if state != self.last_state {
            tracing::debug!(from = %self.last_state, to = %state, "session state changed");
            self.last_state = state;
            actions.extend(self.app.handle(AppEvent::StateChanged(state)));
        }

        if state.is_terminal() {
            tracing::info!(%state, "session ended");
            self.session = None;
        }

        actions
    }

    /// Close the current session and drain what it left behind.
    ///
    /// An attempt still in flight is abandoned: the session it produces is
    /// dropped, which closes it.
    fn close_session(&mut self) -> Vec<AppAction> {
        if self.pending.take().is_some() {
            tracing::debug!("abandoning connect attempt");
            self.last_state = ConnectionState::Disconnected;
            return self.app.handle(AppEvent::StateChanged(ConnectionState::Disconnected));
        }

        let Some(mut session) = self.session.take() else {
            return vec![];
        };

        session.close();

        let mut actions = Vec::new();
        for event in session.poll() {
            actions.extend(self.app.handle(AppEvent::Inbound(event)));
        }

        self.last_state = session.current_state();
        actions.extend(self.app.handle(AppEvent::StateChanged(self.last_state)));
        actions
    }
}
