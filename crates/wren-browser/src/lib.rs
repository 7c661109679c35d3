mod chrome_finder;
mod error;
mod launcher;
mod page;
mod profile;

pub use chrome_finder::ChromeFinder;
pub use error::{Error, Result};
pub use launcher::BrowserLauncher;
pub use page::WebChatPage;
pub use profile::SessionProfile;

use wren_core::{bootstrap, BootstrapConfig, ConfigOverrides, QrCallback, Session};

/// Open a browser page for `session_id` at `url` and drive it through
/// the full bootstrap: authentication check, QR challenge, ready-wait
/// and API injection.
///
/// Returns `Ok(Some(session))` when the session is ready, `Ok(None)`
/// when the chat view never became ready within the configured bound
/// (the page and browser are closed), and `Err` for fatal failures.
pub async fn create(
    session_id: &str,
    url: &str,
    overrides: ConfigOverrides,
    on_qr: Option<QrCallback>,
) -> Result<Option<Session<WebChatPage>>> {
    let config = BootstrapConfig::default().merge(overrides);

    let page = WebChatPage::open(session_id, url, &config).await?;
    let devtools_url = if config.debug {
        page.devtools_url()
    } else {
        None
    };

    let session = bootstrap(session_id, &config, page, on_qr).await?;

    if session.is_some() {
        if let Some(devtools_url) = devtools_url {
            tracing::info!(session = session_id, url = %devtools_url, "DevTools endpoint");
        }
    }

    Ok(session)
}
