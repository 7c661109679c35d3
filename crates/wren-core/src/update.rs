use crate::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

/// Where the latest published version comes from.
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Latest published version string, e.g. `"0.2.1"`.
    async fn latest(&self) -> Result<String>;
}

/// Once-only guard around the update notice. Owned by the top-level
/// application context rather than hidden module state, so tests can
/// construct a fresh guard and callers decide its scope.
#[derive(Debug, Default)]
pub struct UpdateCheck {
    checked: AtomicBool,
}

impl UpdateCheck {
    pub const fn new() -> Self {
        Self {
            checked: AtomicBool::new(false),
        }
    }

    /// Run the version lookup at most once per guard; returns whether
    /// the lookup ran this time. Best effort: lookup failures are
    /// logged at debug and swallowed, never surfaced to bootstrap.
    pub async fn run(&self, current: &str, source: &dyn VersionSource) -> bool {
        if self.checked.swap(true, Ordering::SeqCst) {
            return false;
        }

        match source.latest().await {
            Ok(latest) if !up_to_date(current, &latest) => {
                tracing::warn!(
                    current,
                    latest = latest.as_str(),
                    "a newer version is available, update with `cargo install wren-cli`"
                );
            }
            Ok(latest) => {
                tracing::debug!(current, latest = latest.as_str(), "running the latest version");
            }
            Err(e) => {
                tracing::debug!(error = %e, "update check failed");
            }
        }
        true
    }
}

/// Lenient dotted-numeric version comparison. Leading `v` and
/// pre-release suffixes are ignored; missing or unparseable segments
/// compare as zero.
pub fn up_to_date(current: &str, latest: &str) -> bool {
    parse_version(current) >= parse_version(latest)
}

fn parse_version(version: &str) -> [u64; 3] {
    let core = version
        .trim()
        .trim_start_matches('v')
        .split(['-', '+'])
        .next()
        .unwrap_or("");

    let mut parts = core.split('.');
    let mut segment = || {
        parts
            .next()
            .and_then(|p| p.parse::<u64>().ok())
            .unwrap_or(0)
    };
    [segment(), segment(), segment()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::AtomicUsize;

    struct CountingSource {
        lookups: AtomicUsize,
        latest: String,
    }

    impl CountingSource {
        fn new(latest: &str) -> Self {
            Self {
                lookups: AtomicUsize::new(0),
                latest: latest.to_string(),
            }
        }
    }

    #[async_trait]
    impl VersionSource for CountingSource {
        async fn latest(&self) -> Result<String> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.latest.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl VersionSource for FailingSource {
        async fn latest(&self) -> Result<String> {
            Err(Error::VersionLookup("registry unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_lookup_runs_only_once_per_guard() {
        let check = UpdateCheck::new();
        let source = CountingSource::new("9.9.9");

        assert!(check.run("0.1.0", &source).await);
        assert!(!check.run("0.1.0", &source).await);
        assert_eq!(source.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fresh_guard_allows_another_lookup() {
        let source = CountingSource::new("9.9.9");

        assert!(UpdateCheck::new().run("0.1.0", &source).await);
        assert!(UpdateCheck::new().run("0.1.0", &source).await);
        assert_eq!(source.lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_swallowed() {
        let check = UpdateCheck::new();
        // Still counts as "checked"
        assert!(check.run("0.1.0", &FailingSource).await);
        assert!(!check.run("0.1.0", &FailingSource).await);
    }

    #[test]
    fn test_up_to_date_comparisons() {
        assert!(up_to_date("1.2.3", "1.2.3"));
        assert!(up_to_date("1.3.0", "1.2.9"));
        assert!(up_to_date("2.0.0", "1.9.9"));
        assert!(!up_to_date("1.2.3", "1.2.4"));
        assert!(!up_to_date("1.2.3", "2.0.0"));
    }

    #[test]
    fn test_up_to_date_tolerates_prefixes_and_suffixes() {
        assert!(up_to_date("v1.2.3", "1.2.3"));
        assert!(up_to_date("1.2.3", "1.2.3-beta.1"));
        assert!(!up_to_date("0.9", "1.0.0"));
        assert!(up_to_date("garbage", "0.0.0"));
    }
}
