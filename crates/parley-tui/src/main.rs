//! Parley terminal chat client.
//!
//! # Usage
//!
//! ```bash
//! # Local server on the default port
//! parley --nick alice
//!
//! # Remote server, with logs (the terminal itself belongs to the UI)
//! parley -H chat.example.org -p 4000 -n alice --log-file parley.log
//! ```

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex, time::Duration};

use clap::Parser;
use parley_client::SessionConfig;
use parley_tui::{App, DEFAULT_MESSAGE_LIMIT, Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Parley terminal chat client
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Terminal client for the Parley line-chat protocol")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "12345")]
    port: String,

    /// Nickname sent to the server on connect
    #[arg(short, long, default_value = "Anon")]
    nick: String,

    /// Connect timeout in milliseconds
    #[arg(long, default_value = "5000")]
    connect_timeout_ms: u64,

    /// Largest undelimited input to buffer before failing the connection
    #[arg(long, default_value = "1048576")]
    max_frame_bytes: usize,

    /// How often to check for incoming messages, in milliseconds
    #[arg(long, default_value = "100")]
    poll_interval_ms: u64,

    /// Messages to keep in the chat log
    #[arg(long, default_value_t = DEFAULT_MESSAGE_LIMIT)]
    history: usize,

    /// Write logs to this file. Logging is off without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms.max(1)),
            max_frame_size: self.max_frame_bytes,
            ..SessionConfig::default()
        }
    }
}

fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    tracing::info!(host = %args.host, port = %args.port, nick = %args.nick, "parley starting");

    // Blank values fall back to the defaults.
    let nick = match args.nick.trim() {
        "" => "Anon",
        nick => nick,
    };
    let host = match args.host.trim() {
        "" => "127.0.0.1",
        host => host,
    };
    let app = App::new(nick, host, args.port.trim()).with_message_limit(args.history);
    let driver = TerminalDriver::new(Duration::from_millis(args.poll_interval_ms.max(1)))?;

    Runtime::new(driver, app, args.session_config()).run().await?;

    tracing::info!("parley exiting");
    Ok(())
}
