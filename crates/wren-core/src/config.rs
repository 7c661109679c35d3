/// Bootstrap configuration, fixed for the lifetime of one bootstrap call.
///
/// Built by merging caller overrides onto [`BootstrapConfig::default`],
/// field by field; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig {
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Open DevTools alongside the page.
    pub use_devtools: bool,
    /// Prefer a Chromium binary over Google Chrome.
    pub use_alternate_browser: bool,
    /// Explicit browser binary, skipping discovery.
    pub browser_path: Option<std::path::PathBuf>,
    /// Log the DevTools endpoint after a successful bootstrap.
    pub debug: bool,
    /// Extra command-line arguments passed to the browser, opaque here.
    pub browser_args: Vec<String>,
    /// Print each QR payload to the terminal display sink.
    pub log_qr: bool,
    /// Milliseconds between QR re-fetches. Zero or negative disables the
    /// refresh loop entirely; a single QR fetch is performed instead.
    pub qr_refresh_interval_ms: i64,
    /// Upper bound on total QR-refresh duration, measured from loop start.
    pub qr_grab_timeout_ms: u64,
    /// Upper bound on waiting for the ready view after authentication.
    pub chat_ready_timeout_ms: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            headless: true,
            use_devtools: false,
            use_alternate_browser: false,
            browser_path: None,
            debug: false,
            browser_args: Vec::new(),
            log_qr: true,
            qr_refresh_interval_ms: 30_000,
            qr_grab_timeout_ms: 60_000,
            chat_ready_timeout_ms: 70_000,
        }
    }
}

impl BootstrapConfig {
    /// Apply caller overrides on top of this config. Unset fields keep
    /// their current value.
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(v) = overrides.headless {
            self.headless = v;
        }
        if let Some(v) = overrides.use_devtools {
            self.use_devtools = v;
        }
        if let Some(v) = overrides.use_alternate_browser {
            self.use_alternate_browser = v;
        }
        if let Some(v) = overrides.browser_path {
            self.browser_path = Some(v);
        }
        if let Some(v) = overrides.debug {
            self.debug = v;
        }
        if let Some(v) = overrides.browser_args {
            self.browser_args = v;
        }
        if let Some(v) = overrides.log_qr {
            self.log_qr = v;
        }
        if let Some(v) = overrides.qr_refresh_interval_ms {
            self.qr_refresh_interval_ms = v;
        }
        if let Some(v) = overrides.qr_grab_timeout_ms {
            self.qr_grab_timeout_ms = v;
        }
        if let Some(v) = overrides.chat_ready_timeout_ms {
            self.chat_ready_timeout_ms = v;
        }
        self
    }
}

/// Partial configuration supplied by callers; `None` fields fall back to
/// the documented defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub headless: Option<bool>,
    pub use_devtools: Option<bool>,
    pub use_alternate_browser: Option<bool>,
    pub browser_path: Option<std::path::PathBuf>,
    pub debug: Option<bool>,
    pub browser_args: Option<Vec<String>>,
    pub log_qr: Option<bool>,
    pub qr_refresh_interval_ms: Option<i64>,
    pub qr_grab_timeout_ms: Option<u64>,
    pub chat_ready_timeout_ms: Option<u64>,
}
