// Runtime configuration
//
// Resolved from ~/.brasa/rc (key=value lines, # comments) with environment
// variable overrides taking precedence. Loading never fails: malformed or
// missing entries fall back to defaults.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://wlgzjwd1w9.execute-api.us-east-1.amazonaws.com";
pub const DEFAULT_USER_ID: &str = "supervisor_cocina";
pub const DEFAULT_TENANT_ID: &str = "pardos";
pub const DEFAULT_POLL_SECS: u64 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, no trailing slash.
    pub base_url: String,
    /// Staff user id sent with stage confirmations.
    pub user_id: String,
    /// Tenant id sent with stage confirmations.
    pub tenant_id: String,
    /// Board refresh interval for `watch`.
    pub poll_secs: u64,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            poll_secs: DEFAULT_POLL_SECS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Configuration file path (~/.brasa/rc), if a home directory exists.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".brasa").join("rc"))
    }

    /// Load configuration: defaults, then the rc file, then env overrides.
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(path) = Self::config_path() {
            if let Ok(content) = std::fs::read_to_string(&path) {
                config.apply_rc(&content);
            }
        }
        config.apply_env();
        config
    }

    /// Apply key=value lines from an rc file.
    pub fn apply_rc(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            self.apply_entry(key.trim(), value.trim());
        }
    }

    fn apply_entry(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        match key {
            "api.url" => self.base_url = value.trim_end_matches('/').to_string(),
            "api.user" => self.user_id = value.to_string(),
            "api.tenant" => self.tenant_id = value.to_string(),
            "poll.seconds" => {
                if let Ok(secs) = value.parse::<u64>() {
                    if secs > 0 {
                        self.poll_secs = secs;
                    }
                }
            }
            _ => {}
        }
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("BRASA_API_URL") {
            if !url.trim().is_empty() {
                self.base_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        if let Ok(user) = std::env::var("BRASA_USER_ID") {
            if !user.trim().is_empty() {
                self.user_id = user.trim().to_string();
            }
        }
        if let Ok(tenant) = std::env::var("BRASA_TENANT_ID") {
            if !tenant.trim().is_empty() {
                self.tenant_id = tenant.trim().to_string();
            }
        }
        if let Ok(secs) = std::env::var("BRASA_POLL_SECS") {
            if let Ok(secs) = secs.trim().parse::<u64>() {
                if secs > 0 {
                    self.poll_secs = secs;
                }
            }
        }
    }
}
