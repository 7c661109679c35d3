use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Locates a Chrome or Chromium binary on the system
pub struct ChromeFinder {
    custom_path: Option<PathBuf>,
    prefer_chromium: bool,
}

impl ChromeFinder {
    /// Create a finder; `prefer_chromium` puts Chromium builds ahead of
    /// Google Chrome in the search order.
    pub fn new(custom_path: Option<PathBuf>, prefer_chromium: bool) -> Self {
        Self {
            custom_path,
            prefer_chromium,
        }
    }

    /// Find a browser binary, checking the custom path first, then
    /// platform defaults in preference order.
    pub fn find(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.custom_path {
            return self.validate_path(path);
        }

        for path in self.search_paths() {
            if let Ok(valid_path) = self.validate_path(&path) {
                return Ok(valid_path);
            }
        }

        Err(Error::Browser(format!(
            "No Chrome or Chromium binary found. Checked: {}. Use --browser-path to specify a location.",
            self.search_paths()
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }

    fn search_paths(&self) -> Vec<PathBuf> {
        let (chrome, chromium) = Self::platform_paths();
        if self.prefer_chromium {
            chromium.into_iter().chain(chrome).collect()
        } else {
            chrome.into_iter().chain(chromium).collect()
        }
    }

    /// Platform-specific default paths, split into (Chrome, Chromium)
    fn platform_paths() -> (Vec<PathBuf>, Vec<PathBuf>) {
        #[cfg(target_os = "macos")]
        return (
            vec![PathBuf::from(
                "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            )],
            vec![PathBuf::from(
                "/Applications/Chromium.app/Contents/MacOS/Chromium",
            )],
        );

        #[cfg(target_os = "linux")]
        return (
            vec![
                PathBuf::from("/usr/bin/google-chrome"),
                PathBuf::from("/usr/bin/google-chrome-stable"),
            ],
            vec![
                PathBuf::from("/usr/bin/chromium"),
                PathBuf::from("/usr/bin/chromium-browser"),
                PathBuf::from("/snap/bin/chromium"),
            ],
        );

        #[cfg(target_os = "windows")]
        return (
            vec![
                PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
                PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
            ],
            vec![PathBuf::from(
                r"C:\Program Files\Chromium\Application\chrome.exe",
            )],
        );
    }

    fn validate_path(&self, path: &Path) -> Result<PathBuf> {
        if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(Error::Browser(format!(
                "Browser binary not found at {}",
                path.display()
            )))
        }
    }
}
