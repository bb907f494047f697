use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use dotenvy::dotenv;

use crate::browser::manager::BrowserSettings;
use crate::portal::PortalSettings;

const DEFAULT_PORTAL_URL: &str = "https://kiitportal.kiituniversity.net/irj/portal/";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub portal_url: String,

    // Bounded waits
    pub selector_timeout_ms: u64,
    pub rows_timeout_ms: u64,

    // Browser
    pub chrome_executable: Option<PathBuf>,
    pub browser_headless: bool,

    // Rate limiting
    pub rate_attendance_per_min: u32,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `lookup`, falling back to defaults for absent keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_addr: var("SERVER_ADDR", "127.0.0.1:8000"),
            portal_url: var("PORTAL_URL", DEFAULT_PORTAL_URL),
            selector_timeout_ms: typed("SELECTOR_TIMEOUT_MS", &var("SELECTOR_TIMEOUT_MS", "30000"))?,
            rows_timeout_ms: typed("ROWS_TIMEOUT_MS", &var("ROWS_TIMEOUT_MS", "30000"))?,
            chrome_executable: lookup("CHROME_EXECUTABLE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            browser_headless: typed("BROWSER_HEADLESS", &var("BROWSER_HEADLESS", "true"))?,
            rate_attendance_per_min: typed(
                "RATE_ATTENDANCE_PER_MIN",
                &var("RATE_ATTENDANCE_PER_MIN", "30"),
            )?,
            log_dir: var("LOG_DIR", "logs"),
        })
    }

    pub fn portal_settings(&self) -> PortalSettings {
        PortalSettings {
            url: self.portal_url.clone(),
            selector_timeout: Duration::from_millis(self.selector_timeout_ms),
            rows_timeout: Duration::from_millis(self.rows_timeout_ms),
        }
    }

    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            headless: self.browser_headless,
            executable: self.chrome_executable.clone(),
        }
    }
}

fn typed<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("{key} has an invalid value '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:8000");
        assert_eq!(config.portal_url, DEFAULT_PORTAL_URL);
        assert_eq!(config.portal_settings().selector_timeout, Duration::from_secs(30));
        assert!(config.browser_headless);
        assert!(config.chrome_executable.is_none());
        assert_eq!(config.rate_attendance_per_min, 30);
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let config = config(&[
            ("ROWS_TIMEOUT_MS", "5000"),
            ("BROWSER_HEADLESS", "false"),
            ("CHROME_EXECUTABLE", "/usr/bin/chromium"),
        ])
        .unwrap();
        assert_eq!(config.portal_settings().rows_timeout, Duration::from_secs(5));
        assert!(!config.browser_settings().headless);
        assert_eq!(
            config.browser_settings().executable,
            Some(PathBuf::from("/usr/bin/chromium"))
        );
    }

    #[test]
    fn malformed_numbers_are_an_error() {
        let err = config(&[("SELECTOR_TIMEOUT_MS", "soon")]).unwrap_err();
        assert!(format!("{err:#}").contains("SELECTOR_TIMEOUT_MS"));
    }
}
