use crate::chrome_finder::ChromeFinder;
use crate::launcher::BrowserLauncher;
use crate::profile::SessionProfile;
use crate::Result;
use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use wren_core::{BootstrapConfig, BootstrapPage, ProbeStatus, QrPayload};

/// Cadence for DOM state polling
const STATE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// The QR challenge payload lives in the `data-ref` attribute of the
/// login screen's QR container.
const QR_DATA_JS: &str = r#"
(() => {
  const el = document.querySelector('[data-ref]');
  return el ? el.getAttribute('data-ref') : null;
})()
"#;

/// Authenticated once the QR challenge is gone and the app shell has
/// replaced the login screen.
const AUTH_STATE_JS: &str = r#"
(() => {
  const qr = document.querySelector('[data-ref]');
  const shell = document.querySelector('#app .two, #pane-side');
  return !!shell && !qr;
})()
"#;

/// Inside the main view once the chat pane is attached.
const READY_STATE_JS: &str = r#"
(() => !!document.querySelector('#pane-side, #main'))()
"#;

const BRIDGE_JS: &str = include_str!("../scripts/bridge.js");

const BRIDGE_CHECK_JS: &str = "(() => typeof window.__wren === 'object')()";

/// A live chat client page driven over CDP. Owns the browser process;
/// closing the page tears the whole browser down.
pub struct WebChatPage {
    session_id: String,
    page: Page,
    browser: Mutex<Browser>,
    handler_task: JoinHandle<()>,
    profile: SessionProfile,
}

impl WebChatPage {
    /// Launch a browser for `session_id` and open the chat client at
    /// `url`. The session's profile directory is reused across runs so
    /// an already-scanned session comes up authenticated.
    pub async fn open(session_id: &str, url: &str, config: &BootstrapConfig) -> Result<Self> {
        let executable =
            ChromeFinder::new(config.browser_path.clone(), config.use_alternate_browser).find()?;
        let profile = SessionProfile::for_session(session_id)?;
        let launcher = BrowserLauncher::new(executable, profile.path().to_path_buf(), config);

        let (browser, mut handler) = launcher.launch().await?;

        // The handler stream must be polled for CDP commands to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = browser.new_page(url).await?;
        tracing::info!(session = session_id, url, "chat client page opened");

        Ok(Self {
            session_id: session_id.to_string(),
            page,
            browser: Mutex::new(browser),
            handler_task,
            profile,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// DevTools endpoint of the running browser, if discoverable.
    pub fn devtools_url(&self) -> Option<String> {
        self.profile.devtools_url()
    }

    /// Raw page handle for callers that outgrow the bridge.
    pub fn cdp_page(&self) -> &Page {
        &self.page
    }

    async fn eval_bool(&self, js: &str) -> std::result::Result<bool, String> {
        let result = self.page.evaluate(js).await.map_err(|e| e.to_string())?;
        result.into_value::<bool>().map_err(|e| e.to_string())
    }
}

#[async_trait]
impl BootstrapPage for WebChatPage {
    async fn is_authenticated(&self) -> ProbeStatus {
        match self.eval_bool(AUTH_STATE_JS).await {
            Ok(true) => ProbeStatus::Positive,
            Ok(false) => ProbeStatus::Negative,
            Err(reason) => ProbeStatus::Failed(reason),
        }
    }

    async fn wait_until_authenticated(&self) {
        loop {
            if self.is_authenticated().await.confirmed() {
                return;
            }
            tokio::time::sleep(STATE_POLL_INTERVAL).await;
        }
    }

    async fn wait_until_ready(&self, timeout: Duration) -> bool {
        let poll = async {
            loop {
                // Evaluation errors (page navigating, page gone) keep
                // polling until the bound expires
                if let Ok(true) = self.eval_bool(READY_STATE_JS).await {
                    return;
                }
                tokio::time::sleep(STATE_POLL_INTERVAL).await;
            }
        };
        tokio::time::timeout(timeout, poll).await.is_ok()
    }

    async fn fetch_qr(&self) -> wren_core::Result<QrPayload> {
        let result = self
            .page
            .evaluate(QR_DATA_JS)
            .await
            .map_err(|e| wren_core::Error::Probe(e.to_string()))?;
        let data: Option<String> = result
            .into_value()
            .map_err(|e| wren_core::Error::Probe(e.to_string()))?;

        match data {
            Some(data) => {
                let rendered = render_qr(&data);
                Ok(QrPayload::new(data, rendered))
            }
            None => Err(wren_core::Error::Probe(
                "QR challenge not present on page".to_string(),
            )),
        }
    }

    async fn inject_api(&self) -> wren_core::Result<()> {
        self.page
            .evaluate(BRIDGE_JS)
            .await
            .map_err(|e| wren_core::Error::Injection(e.to_string()))?;

        match self.eval_bool(BRIDGE_CHECK_JS).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(wren_core::Error::Injection(
                "bridge object missing after injection".to_string(),
            )),
            Err(reason) => Err(wren_core::Error::Injection(reason)),
        }
    }

    async fn close(&self) {
        // Best effort throughout; the page may already be half torn down
        if let Err(e) = self.page.clone().close().await {
            tracing::debug!(session = self.session_id.as_str(), error = %e, "page close failed");
        }

        let mut browser = self.browser.lock().await;
        if let Err(e) = browser.close().await {
            tracing::debug!(session = self.session_id.as_str(), error = %e, "browser close failed");
        }
        let _ = browser.wait().await;

        self.handler_task.abort();
        tracing::debug!(session = self.session_id.as_str(), "page and browser closed");
    }
}

/// Render the QR challenge as a terminal-friendly unicode block.
/// Rendering failures degrade to the raw payload; display is never
/// required for correctness.
fn render_qr(data: &str) -> String {
    use qrcode::render::unicode;
    use qrcode::QrCode;

    match QrCode::new(data.as_bytes()) {
        Ok(code) => code
            .render::<unicode::Dense1x2>()
            .quiet_zone(true)
            .build(),
        Err(e) => {
            tracing::debug!(error = %e, "QR rendering failed, falling back to raw payload");
            data.to_string()
        }
    }
}
