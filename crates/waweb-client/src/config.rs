//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::selectors::Selectors;

/// Tunables for timing, scrolling, and navigation.
///
/// Durations are stored as milliseconds so the whole struct can round-trip
/// through a TOML config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Selector table for the targeted UI version.
    pub selectors: Selectors,

    /// Bound for every selector wait.
    pub wait_timeout_ms: u64,
    /// Pause between simulated keystrokes.
    pub type_delay_ms: u64,
    /// Settle pause after input before re-sampling the page.
    pub settle_delay_ms: u64,
    /// Pause after typing a search query before reading results.
    pub search_settle_ms: u64,

    /// Wheel delta per scroll step.
    pub scroll_delta: f64,
    /// Ceiling on a single scroll-to-stable operation.
    pub scroll_max_ms: u64,
    /// Iteration guard for the scroll loop.
    pub scroll_max_rounds: u32,

    /// Transform offset of the first search-result slot. The slot directly
    /// under the section header sits at one row height.
    pub first_result_offset: f64,

    /// Phone-number navigation retry attempts.
    pub phone_retry_attempts: u32,
    /// Initial backoff between phone-number retries; doubles per attempt.
    pub phone_retry_backoff_ms: u64,
    /// URL template for opening a chat by phone number.
    pub phone_url_template: String,

    /// Change-detection poll interval.
    pub poll_interval_ms: u64,

    /// Key combination that selects all text in a focused editor, pressed
    /// before clearing the search box or the composer. Defaults to the
    /// platform convention (`Meta+a` on macOS, `Control+a` elsewhere).
    pub select_all_key: String,
}

fn default_select_all_key() -> String {
    if cfg!(target_os = "macos") {
        "Meta+a".to_string()
    } else {
        "Control+a".to_string()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            wait_timeout_ms: 30_000,
            type_delay_ms: 20,
            settle_delay_ms: 100,
            search_settle_ms: 1_000,
            scroll_delta: 1_000.0,
            scroll_max_ms: 30_000,
            scroll_max_rounds: 300,
            first_result_offset: 72.0,
            phone_retry_attempts: 3,
            phone_retry_backoff_ms: 500,
            phone_url_template:
                "https://web.whatsapp.com/send?phone={phone}&text&type=phone_number&app_absent=1"
                    .into(),
            poll_interval_ms: 1_000,
            select_all_key: default_select_all_key(),
        }
    }
}

impl ClientConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn type_delay(&self) -> Duration {
        Duration::from_millis(self.type_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn search_settle(&self) -> Duration {
        Duration::from_millis(self.search_settle_ms)
    }

    pub fn scroll_max(&self) -> Duration {
        Duration::from_millis(self.scroll_max_ms)
    }

    pub fn phone_retry_backoff(&self) -> Duration {
        Duration::from_millis(self.phone_retry_backoff_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn phone_url(&self, phone: &str) -> String {
        self.phone_url_template.replace("{phone}", phone)
    }
}
