use std::path::PathBuf;

use crate::error::{ProbeError, Result};

/// Find the Chrome/Chromium binary on the current platform.
pub fn find_chrome_binary() -> Result<PathBuf> {
    let candidates = chrome_candidates();

    for candidate in &candidates {
        let path = PathBuf::from(candidate);
        if path.exists() {
            tracing::info!("Found Chrome at: {}", path.display());
            return Ok(path);
        }
    }

    for name in &[
        "google-chrome",
        "google-chrome-stable",
        "chromium-browser",
        "chromium",
    ] {
        if let Ok(path) = which::which(name) {
            tracing::info!("Found Chrome in PATH: {}", path.display());
            return Ok(path);
        }
    }

    Err(ProbeError::Browser(format!(
        "Could not find Chrome or Chromium. Searched:\n{}",
        candidates.join("\n")
    )))
}

fn chrome_candidates() -> Vec<String> {
    let mut candidates = Vec::new();

    #[cfg(target_os = "macos")]
    {
        candidates.extend([
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome".into(),
            "/Applications/Chromium.app/Contents/MacOS/Chromium".into(),
        ]);
        if let Ok(home) = std::env::var("HOME") {
            candidates.push(format!(
                "{}/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
                home
            ));
        }
    }

    #[cfg(target_os = "linux")]
    {
        candidates.extend([
            "/usr/bin/google-chrome".into(),
            "/usr/bin/google-chrome-stable".into(),
            "/usr/bin/chromium-browser".into(),
            "/usr/bin/chromium".into(),
            "/snap/bin/chromium".into(),
        ]);
    }

    #[cfg(target_os = "windows")]
    {
        for var in ["PROGRAMFILES", "PROGRAMFILES(X86)", "LOCALAPPDATA"] {
            if let Ok(dir) = std::env::var(var) {
                candidates.push(format!("{}\\Google\\Chrome\\Application\\chrome.exe", dir));
            }
        }
    }

    candidates
}

/// Chrome flags for a probe session.
pub fn default_chrome_args(headless: bool, sandbox: bool) -> Vec<String> {
    let mut args = vec![
        "--no-first-run".into(),
        "--no-default-browser-check".into(),
        "--disable-notifications".into(),
        "--disable-background-networking".into(),
        "--disable-default-apps".into(),
        "--disable-extensions".into(),
        "--disable-popup-blocking".into(),
        "--disable-sync".into(),
        "--disable-translate".into(),
        "--metrics-recording-only".into(),
    ];

    if headless {
        args.push("--headless=new".into());
    } else {
        args.push("--start-maximized".into());
    }
    if !sandbox {
        args.push("--no-sandbox".into());
    }

    args
}
