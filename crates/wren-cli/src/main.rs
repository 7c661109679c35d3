use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod version;

#[derive(Parser)]
#[command(name = "wren")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "QR-login session bootstrap for browser-hosted chat clients",
    long_about = "Wren drives a controlled browser page through a chat client's QR login \
                  handshake: it shows and refreshes the QR challenge until scanned, waits for \
                  the chat view, injects the client API and hands back a ready session."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a browser session and walk it through the QR login handshake
    Connect {
        /// Session label; also names the browser profile directory
        #[arg(value_name = "SESSION", default_value = "session")]
        session: String,

        /// URL of the chat client to open
        #[arg(long, value_name = "URL")]
        url: String,

        /// Run the browser with a visible window
        #[arg(long)]
        headed: bool,

        /// Open DevTools alongside the page
        #[arg(long)]
        devtools: bool,

        /// Prefer a Chromium binary over Google Chrome
        #[arg(long)]
        alternate_browser: bool,

        /// Explicit browser binary, skipping discovery
        #[arg(long, value_name = "PATH")]
        browser_path: Option<PathBuf>,

        /// Log the DevTools endpoint once connected
        #[arg(long)]
        debug: bool,

        /// Extra browser argument (repeatable)
        #[arg(long = "browser-arg", value_name = "ARG")]
        browser_args: Vec<String>,

        /// Don't print QR codes to the terminal
        #[arg(long)]
        no_qr_log: bool,

        /// Milliseconds between QR refreshes; 0 disables the refresh loop
        #[arg(long, value_name = "MS")]
        qr_refresh_interval_ms: Option<i64>,

        /// Upper bound on total QR refresh time, in milliseconds
        #[arg(long, value_name = "MS")]
        qr_grab_timeout_ms: Option<u64>,

        /// Upper bound on waiting for the chat view, in milliseconds
        #[arg(long, value_name = "MS")]
        ready_timeout_ms: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Connect {
            session,
            url,
            headed,
            devtools,
            alternate_browser,
            browser_path,
            debug,
            browser_args,
            no_qr_log,
            qr_refresh_interval_ms,
            qr_grab_timeout_ms,
            ready_timeout_ms,
        } => commands::connect::execute(commands::connect::ConnectArgs {
            session,
            url,
            headed,
            devtools,
            alternate_browser,
            browser_path,
            debug,
            browser_args,
            no_qr_log,
            qr_refresh_interval_ms,
            qr_grab_timeout_ms,
            ready_timeout_ms,
        }),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("wren=debug,wren_core=debug,wren_browser=debug")
    } else {
        EnvFilter::new("wren=info,wren_core=info,wren_browser=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
