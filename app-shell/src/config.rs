use ts_core::{Interval, DEFAULT_INTERVAL};

pub const DEFAULT_HISTORY_BASE: &str = "https://chart.brokex.trade";
pub const DEFAULT_PAIR: u32 = 0;

/// Window globals that override the built-in defaults at runtime.
pub const HISTORY_BASE_KEY: &str = "BROKEX_HISTORY_BASE";
pub const PAIR_KEY: &str = "BROKEX_PAIR";
pub const DEFAULT_INTERVAL_KEY: &str = "BROKEX_DEFAULT_INTERVAL";
pub const SUPERSEDE_LOADS_KEY: &str = "BROKEX_SUPERSEDE_LOADS";

/// Runtime configuration of the front-end.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    /// Origin of the history endpoint, without trailing slash.
    pub history_base: String,
    /// Instrument identifier sent as `pair`.
    pub pair: u32,
    pub default_interval: Interval,
    /// A new interval request replaces a running load instead of being ignored.
    pub supersede_loads: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history_base: DEFAULT_HISTORY_BASE.to_string(),
            pair: DEFAULT_PAIR,
            default_interval: DEFAULT_INTERVAL,
            supersede_loads: false,
        }
    }
}

impl ShellConfig {
    /// Apply overrides from a key lookup. Unusable values are logged and skipped.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base) = lookup(HISTORY_BASE_KEY) {
            let base = base.trim().trim_end_matches('/');
            if base.is_empty() {
                log::warn!("ignoring empty {HISTORY_BASE_KEY}");
            } else {
                self.history_base = base.to_string();
            }
        }
        if let Some(raw) = lookup(PAIR_KEY) {
            match raw.trim().parse::<u32>() {
                Ok(pair) => self.pair = pair,
                Err(_) => log::warn!("ignoring {PAIR_KEY}={raw:?}: not a pair id"),
            }
        }
        if let Some(raw) = lookup(DEFAULT_INTERVAL_KEY) {
            let raw = raw.trim();
            let parsed = raw
                .parse::<u32>()
                .ok()
                .and_then(Interval::from_seconds)
                .or_else(|| Interval::from_label(raw));
            match parsed {
                Some(interval) => self.default_interval = interval,
                None => log::warn!("ignoring {DEFAULT_INTERVAL_KEY}={raw:?}: unknown interval"),
            }
        }
        if let Some(raw) = lookup(SUPERSEDE_LOADS_KEY) {
            match raw.trim() {
                "true" | "1" => self.supersede_loads = true,
                "false" | "0" => self.supersede_loads = false,
                other => log::warn!("ignoring {SUPERSEDE_LOADS_KEY}={other:?}: not a boolean"),
            }
        }
        self
    }

    /// Defaults overridden by window globals.
    #[cfg(target_arch = "wasm32")]
    pub fn from_window() -> Self {
        Self::default().with_overrides(crate::web::read_global)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_window() -> Self {
        Self::default()
    }

    /// URL of the history request for one interval.
    pub fn history_url(&self, interval: Interval) -> String {
        format!(
            "{}/history?pair={}&interval={}",
            self.history_base, self.pair, interval.seconds
        )
    }
}
