use crate::{QrPayload, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Result of asking the page a yes/no question. Probe failures are kept
/// explicit here and collapsed to `false` at the call site, so the
/// fail-safe-to-false policy stays visible in the contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeStatus {
    Positive,
    Negative,
    Failed(String),
}

impl ProbeStatus {
    /// Collapse to a boolean; `Failed` counts as `false`.
    pub fn confirmed(&self) -> bool {
        matches!(self, ProbeStatus::Positive)
    }
}

/// A chat client page under bootstrap: state probe, API injection and
/// lifecycle rolled into the one handle the orchestrator drives.
///
/// Implementations must never panic out of these methods; anything the
/// underlying page throws is absorbed into `ProbeStatus::Failed`, a
/// `false` ready answer, or a returned error.
#[async_trait]
pub trait BootstrapPage: Send + Sync + 'static {
    /// Is the session already authenticated?
    async fn is_authenticated(&self) -> ProbeStatus;

    /// Resolves once authentication is observed. Used as the QR refresh
    /// loop's cancellation signal; may pend forever if the user never
    /// scans.
    async fn wait_until_authenticated(&self);

    /// Wait until the main chat view is loaded, up to `timeout`.
    /// Resolves `false` on timeout or probe failure, never an error.
    async fn wait_until_ready(&self, timeout: Duration) -> bool;

    /// Fetch the current QR challenge from the page.
    async fn fetch_qr(&self) -> Result<QrPayload>;

    /// Inject the client API into the now-ready page.
    async fn inject_api(&self) -> Result<()>;

    /// Best-effort teardown of the page and its owning browser. Close
    /// failures are swallowed; the page may already be partially closed.
    async fn close(&self);
}
