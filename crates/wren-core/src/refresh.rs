use crate::page::BootstrapPage;
use crate::qr::QrCallback;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant};

/// Why the QR refresh loop stopped. Exactly one of these ends the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrStop {
    /// Authentication was observed; no further codes are needed.
    Authenticated,
    /// The absolute grab timeout elapsed before authentication.
    TimedOut,
}

/// Repeatedly fetch the QR challenge and hand each payload to `on_qr`.
///
/// Ticks follow the wall clock: the first fetch happens immediately,
/// then one per `interval`. A fetch that outlasts the interval is not
/// skipped; it queues behind the clock, and its delivery completes
/// before the next one starts, so deliveries are strictly ordered.
///
/// The loop races two cancellation conditions: the page reporting
/// authenticated (checked between ticks, not just at them) and the
/// absolute `grab_timeout` measured from loop start, which fires even
/// mid-fetch. `interval` must be positive; callers disable the loop for
/// non-positive intervals.
pub async fn run_qr_refresh<P: BootstrapPage>(
    page: Arc<P>,
    interval: Duration,
    grab_timeout: Duration,
    on_qr: Option<QrCallback>,
) -> QrStop {
    debug_assert!(!interval.is_zero());
    let deadline = Instant::now() + grab_timeout;

    let refresh = async {
        let mut ticker = time::interval(interval);
        let authenticated = page.wait_until_authenticated();
        tokio::pin!(authenticated);

        loop {
            tokio::select! {
                _ = &mut authenticated => {
                    tracing::debug!("authenticated, stopping QR refresh");
                    return QrStop::Authenticated;
                }
                _ = ticker.tick() => {
                    match page.fetch_qr().await {
                        Ok(qr) => {
                            if let Some(cb) = &on_qr {
                                cb(&qr);
                            }
                        }
                        Err(e) => {
                            tracing::debug!(error = %e, "QR fetch failed, keeping previous code");
                        }
                    }
                }
            }
        }
    };

    match time::timeout_at(deadline, refresh).await {
        Ok(stop) => stop,
        Err(_) => {
            tracing::debug!("QR grab timeout elapsed, stopping refresh");
            QrStop::TimedOut
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::QrPayload;
    use crate::testutil::MockPage;
    use std::sync::Mutex;

    #[tokio::test(start_paused = true)]
    async fn test_loop_cancels_promptly_on_authentication() {
        let page = MockPage::new().auth_after_ms(3500);
        let state = page.state();
        let started = Instant::now();

        let stop = run_qr_refresh(
            Arc::new(page),
            Duration::from_millis(1000),
            Duration::from_millis(5000),
            None,
        )
        .await;

        assert_eq!(stop, QrStop::Authenticated);
        // Fetches at each tick before authentication, none after
        assert_eq!(state.fetch_times_ms(), vec![0, 1000, 2000, 3000]);
        // Cancelled mid-interval, well before the next tick at 4000
        assert!(started.elapsed() < Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_terminates_at_grab_timeout_without_authentication() {
        let page = MockPage::new();
        let state = page.state();
        let started = Instant::now();

        let stop = run_qr_refresh(
            Arc::new(page),
            Duration::from_millis(1000),
            Duration::from_millis(4500),
            None,
        )
        .await;

        assert_eq!(stop, QrStop::TimedOut);
        assert_eq!(state.fetch_times_ms(), vec![0, 1000, 2000, 3000, 4000]);
        assert!(started.elapsed() <= Duration::from_millis(4500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_payload_is_delivered_in_order() {
        let page = MockPage::new();
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let on_qr: QrCallback = Arc::new(move |qr: &QrPayload| {
            sink.lock().unwrap().push(qr.data.clone());
        });

        let stop = run_qr_refresh(
            Arc::new(page),
            Duration::from_millis(1000),
            Duration::from_millis(2500),
            Some(on_qr),
        )
        .await;

        assert_eq!(stop, QrStop::TimedOut);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_errors_are_skipped_not_fatal() {
        let page = MockPage::new().failing_qr();
        let state = page.state();

        let stop = run_qr_refresh(
            Arc::new(page),
            Duration::from_millis(1000),
            Duration::from_millis(2500),
            None,
        )
        .await;

        // The loop keeps ticking through fetch failures until its timeout
        assert_eq!(stop, QrStop::TimedOut);
        assert_eq!(state.fetch_times_ms().len(), 3);
    }
}
