use crate::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::handler::Handler;
use std::path::PathBuf;
use wren_core::BootstrapConfig;

/// Builds and launches the browser process for one session
pub struct BrowserLauncher {
    executable: PathBuf,
    profile_dir: PathBuf,
    headless: bool,
    devtools: bool,
    extra_args: Vec<String>,
}

impl BrowserLauncher {
    pub fn new(executable: PathBuf, profile_dir: PathBuf, config: &BootstrapConfig) -> Self {
        Self {
            executable,
            profile_dir,
            headless: config.headless,
            devtools: config.use_devtools,
            extra_args: config.browser_args.clone(),
        }
    }

    /// Launch the browser; the returned handler stream must be driven
    /// for any CDP command to make progress.
    pub async fn launch(&self) -> Result<(Browser, Handler)> {
        let config = self.browser_config()?;
        let (browser, handler) = Browser::launch(config).await?;
        tracing::debug!(
            executable = %self.executable.display(),
            profile = %self.profile_dir.display(),
            "browser launched"
        );
        Ok((browser, handler))
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .chrome_executable(&self.executable)
            .user_data_dir(&self.profile_dir);

        if !self.headless {
            builder = builder.with_head();
        }
        if self.devtools {
            builder = builder.arg("--auto-open-devtools-for-tabs");
        }
        builder = builder.args(self.extra_args.clone());

        builder.build().map_err(Error::Browser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_config_builds_with_overridden_args() {
        let config = BootstrapConfig {
            headless: false,
            use_devtools: true,
            browser_args: vec!["--no-sandbox".to_string()],
            ..Default::default()
        };
        let launcher = BrowserLauncher::new(
            PathBuf::from("/usr/bin/google-chrome"),
            PathBuf::from("/tmp/profile"),
            &config,
        );

        assert!(launcher.browser_config().is_ok());
    }

    #[test]
    fn test_browser_config_builds_with_defaults() {
        let launcher = BrowserLauncher::new(
            PathBuf::from("/usr/bin/google-chrome"),
            PathBuf::from("/tmp/profile"),
            &BootstrapConfig::default(),
        );

        assert!(launcher.browser_config().is_ok());
    }
}
