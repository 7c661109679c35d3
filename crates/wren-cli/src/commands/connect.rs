use crate::version::CratesIoSource;
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use wren_core::{ConfigOverrides, QrCallback, QrPayload, UpdateCheck};

pub struct ConnectArgs {
    pub session: String,
    pub url: String,
    pub headed: bool,
    pub devtools: bool,
    pub alternate_browser: bool,
    pub browser_path: Option<PathBuf>,
    pub debug: bool,
    pub browser_args: Vec<String>,
    pub no_qr_log: bool,
    pub qr_refresh_interval_ms: Option<i64>,
    pub qr_grab_timeout_ms: Option<u64>,
    pub ready_timeout_ms: Option<u64>,
}

pub fn execute(args: ConnectArgs) -> Result<()> {
    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run(args));

    // Explicitly shutdown runtime with timeout to prevent hanging on blocking tasks
    runtime.shutdown_timeout(Duration::from_millis(100));

    result
}

async fn run(args: ConnectArgs) -> Result<()> {
    tracing::debug!(session = args.session.as_str(), url = args.url.as_str(), "connecting");

    // Best-effort version notice; owned here so its once-guard has an
    // explicit scope, and never awaited before bootstrap
    let update_check = Arc::new(UpdateCheck::new());
    tokio::spawn({
        let update_check = Arc::clone(&update_check);
        async move {
            update_check
                .run(env!("CARGO_PKG_VERSION"), &CratesIoSource::new())
                .await;
        }
    });

    let log_qr = !args.no_qr_log;
    let overrides = ConfigOverrides {
        headless: Some(!args.headed),
        use_devtools: Some(args.devtools),
        use_alternate_browser: Some(args.alternate_browser),
        browser_path: args.browser_path,
        debug: Some(args.debug),
        browser_args: (!args.browser_args.is_empty()).then_some(args.browser_args),
        log_qr: Some(log_qr),
        qr_refresh_interval_ms: args.qr_refresh_interval_ms,
        qr_grab_timeout_ms: args.qr_grab_timeout_ms,
        chat_ready_timeout_ms: args.ready_timeout_ms,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!("Bootstrapping session '{}'...", args.session));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let on_qr = log_qr.then(|| qr_display_sink(spinner.clone(), args.session.clone()));

    let outcome = wren_browser::create(&args.session, &args.url, overrides, on_qr).await;

    match outcome {
        Ok(Some(session)) => {
            spinner.finish_and_clear();
            println!(
                "{} Session '{}' is ready",
                style("✔").green(),
                args.session
            );
            println!("Press Enter to close the session...");

            let term = console::Term::stdout();
            let _ = tokio::task::spawn_blocking(move || term.read_line()).await;

            session.close().await;
            println!("{} Session closed", style("✔").green());
            Ok(())
        }
        Ok(None) => {
            spinner.finish_and_clear();
            println!(
                "{} Session '{}' did not become ready in time; page closed",
                style("✘").red(),
                args.session
            );
            Err(anyhow::anyhow!("bootstrap failed: chat view not ready"))
        }
        Err(e) => {
            spinner.finish_and_clear();
            Err(e.into())
        }
    }
}

/// Terminal display sink for QR payloads: clear, banner, rendered code.
/// The spinner is suspended around each draw so the two don't interleave.
fn qr_display_sink(spinner: ProgressBar, session: String) -> QrCallback {
    Arc::new(move |qr: &QrPayload| {
        let rendered = qr.rendered.clone();
        let session = session.clone();
        spinner.suspend(|| {
            let term = console::Term::stdout();
            let _ = term.clear_screen();
            println!("Scan the QR code for session '{}'", session);
            println!("{}", rendered);
        });
    })
}
