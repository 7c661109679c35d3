use crate::config::BootstrapConfig;
use crate::error::Result;
use crate::page::{BootstrapPage, ProbeStatus};
use crate::qr::QrCallback;
use crate::refresh::run_qr_refresh;
use std::sync::Arc;
use std::time::Duration;

/// A ready, API-injected session. Owns the page for its lifetime; only
/// constructed after the ready view was observed and injection
/// succeeded.
pub struct Session<P> {
    page: Arc<P>,
}

impl<P: BootstrapPage> Session<P> {
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Tear down the underlying page and browser.
    pub async fn close(&self) {
        self.page.close().await;
    }
}

/// Drive a freshly opened page from unknown authentication state to a
/// ready, API-injected session.
///
/// Returns `Ok(Some(session))` once ready, `Ok(None)` when the ready
/// view did not appear within `chat_ready_timeout_ms` (the page is
/// closed before returning), and `Err` for fatal failures such as API
/// injection (the page is closed there too). Probe failures along the
/// way collapse to "not authenticated" / "not ready" rather than
/// aborting the bootstrap.
pub async fn bootstrap<P: BootstrapPage>(
    session_id: &str,
    config: &BootstrapConfig,
    page: P,
    on_qr: Option<QrCallback>,
) -> Result<Option<Session<P>>> {
    let page = Arc::new(page);

    tracing::info!(session = session_id, "checking authentication state");
    let status = page.is_authenticated().await;
    if let ProbeStatus::Failed(reason) = &status {
        tracing::debug!(
            session = session_id,
            %reason,
            "authentication probe failed, treating as unauthenticated"
        );
    }

    let mut refresh_task = None;
    if !status.confirmed() {
        if config.qr_refresh_interval_ms <= 0 {
            // Refresh disabled: a single QR fetch, then straight to the
            // ready-wait.
            match page.fetch_qr().await {
                Ok(qr) => {
                    tracing::info!(session = session_id, "scan the QR code to authenticate");
                    if let Some(cb) = &on_qr {
                        cb(&qr);
                    }
                }
                Err(e) => {
                    tracing::warn!(session = session_id, error = %e, "QR fetch failed");
                }
            }
        } else {
            tracing::info!(
                session = session_id,
                interval_ms = config.qr_refresh_interval_ms,
                "showing QR code, refreshing until scanned"
            );
            refresh_task = Some(tokio::spawn(run_qr_refresh(
                Arc::clone(&page),
                Duration::from_millis(config.qr_refresh_interval_ms as u64),
                Duration::from_millis(config.qr_grab_timeout_ms),
                on_qr.clone(),
            )));
        }
    }

    let ready = page
        .wait_until_ready(Duration::from_millis(config.chat_ready_timeout_ms))
        .await;

    // The refresh loop self-cancels on authentication or its own grab
    // timeout, but teardown here must not depend on either.
    if let Some(task) = refresh_task {
        task.abort();
    }

    if !ready {
        tracing::warn!(session = session_id, "chat view not ready in time, closing page");
        page.close().await;
        return Ok(None);
    }

    tracing::info!(session = session_id, "authenticated, injecting client API");
    if let Err(e) = page.inject_api().await {
        page.close().await;
        return Err(e);
    }

    tracing::info!(session = session_id, "session ready");
    Ok(Some(Session { page }))
}
