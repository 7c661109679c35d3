//! Shared mock page for state-machine tests. Timings are programmed in
//! milliseconds from construction and observed through the paused tokio
//! clock, so tests are deterministic.

use crate::error::{Error, Result};
use crate::page::{BootstrapPage, ProbeStatus};
use crate::qr::QrPayload;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Default)]
pub struct MockPageState {
    fetch_times: Mutex<Vec<Duration>>,
    injections: AtomicUsize,
    close_calls: AtomicUsize,
}

impl MockPageState {
    pub fn fetch_times_ms(&self) -> Vec<u64> {
        self.fetch_times
            .lock()
            .unwrap()
            .iter()
            .map(|d| d.as_millis() as u64)
            .collect()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_times.lock().unwrap().len()
    }

    pub fn injections(&self) -> usize {
        self.injections.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

pub struct MockPage {
    started: Instant,
    auth_after: Option<Duration>,
    ready_after: Option<Duration>,
    fail_qr: bool,
    fail_injection: bool,
    state: Arc<MockPageState>,
}

impl MockPage {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            auth_after: None,
            ready_after: None,
            fail_qr: false,
            fail_injection: false,
            state: Arc::default(),
        }
    }

    /// Authentication becomes observable at this many ms after creation.
    pub fn auth_after_ms(mut self, ms: u64) -> Self {
        self.auth_after = Some(Duration::from_millis(ms));
        self
    }

    /// The ready view appears at this many ms after creation.
    pub fn ready_after_ms(mut self, ms: u64) -> Self {
        self.ready_after = Some(Duration::from_millis(ms));
        self
    }

    pub fn failing_qr(mut self) -> Self {
        self.fail_qr = true;
        self
    }

    pub fn failing_injection(mut self) -> Self {
        self.fail_injection = true;
        self
    }

    pub fn state(&self) -> Arc<MockPageState> {
        Arc::clone(&self.state)
    }
}

#[async_trait]
impl BootstrapPage for MockPage {
    async fn is_authenticated(&self) -> ProbeStatus {
        match self.auth_after {
            Some(at) if self.started.elapsed() >= at => ProbeStatus::Positive,
            _ => ProbeStatus::Negative,
        }
    }

    async fn wait_until_authenticated(&self) {
        match self.auth_after {
            Some(at) => tokio::time::sleep_until(self.started + at).await,
            None => std::future::pending().await,
        }
    }

    async fn wait_until_ready(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        match self.ready_after {
            Some(at) => {
                let ready_at = self.started + at;
                if ready_at <= deadline {
                    tokio::time::sleep_until(ready_at).await;
                    true
                } else {
                    tokio::time::sleep_until(deadline).await;
                    false
                }
            }
            None => {
                tokio::time::sleep_until(deadline).await;
                false
            }
        }
    }

    async fn fetch_qr(&self) -> Result<QrPayload> {
        self.state
            .fetch_times
            .lock()
            .unwrap()
            .push(self.started.elapsed());
        if self.fail_qr {
            return Err(Error::Probe("QR element not present".to_string()));
        }
        Ok(QrPayload::new("mock-challenge", "[mock qr]"))
    }

    async fn inject_api(&self) -> Result<()> {
        self.state.injections.fetch_add(1, Ordering::SeqCst);
        if self.fail_injection {
            return Err(Error::Injection("bridge object missing".to_string()));
        }
        Ok(())
    }

    async fn close(&self) {
        self.state.close_calls.fetch_add(1, Ordering::SeqCst);
    }
}
