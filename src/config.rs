use serde::{Deserialize, Serialize};

use crate::state::{SessionPolicy, WidthBounds};
use crate::tier::DuplicatePolicy;

pub const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";

/// Startup configuration. Every field has a default so partial configs load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session_policy: SessionPolicy,
    pub duplicate_policy: DuplicatePolicy,
    /// Quiet period after the last keystroke before a search fires
    pub search_debounce_ms: u64,
    /// Results kept from the first page
    pub max_results: usize,
    pub sidebar_min_width: f32,
    pub sidebar_max_width: f32,
    pub sidebar_default_width: f32,
    pub api_base: String,
    /// Used when the user has not entered a key yet
    pub default_api_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let bounds = WidthBounds::default();
        Self {
            session_policy: SessionPolicy::default(),
            duplicate_policy: DuplicatePolicy::default(),
            search_debounce_ms: 400,
            max_results: 20,
            sidebar_min_width: bounds.min,
            sidebar_max_width: bounds.max,
            sidebar_default_width: bounds.default,
            api_base: TMDB_API_BASE.to_owned(),
            default_api_key: String::new(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the environment:
    ///
    /// * `TMDB_API_KEY`: default credential
    /// * `TIER_LIST_CLEAR_ON_EXIT`: wipe the board when the app closes
    /// * `TIER_LIST_UNIQUE_MOVIES`: refuse placing the same movie twice
    ///
    /// On the web the values are baked in at compile time.
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(key) = lookup("TMDB_API_KEY") {
            config.default_api_key = key.trim().to_owned();
        }
        if lookup("TIER_LIST_CLEAR_ON_EXIT").is_some_and(|v| is_truthy(&v)) {
            config.session_policy = SessionPolicy::ClearOnExit;
        }
        if lookup("TIER_LIST_UNIQUE_MOVIES").is_some_and(|v| is_truthy(&v)) {
            config.duplicate_policy = DuplicatePolicy::Reject;
        }
        config
    }

    pub fn width_bounds(&self) -> WidthBounds {
        let min = self.sidebar_min_width.min(self.sidebar_max_width);
        let max = self.sidebar_max_width.max(min);
        WidthBounds {
            min,
            max,
            default: self.sidebar_default_width.clamp(min, max),
        }
    }

    pub fn debounce_secs(&self) -> f64 {
        self.search_debounce_ms as f64 / 1000.0
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(target_arch = "wasm32")]
fn env_var(name: &str) -> Option<String> {
    let value = match name {
        "TMDB_API_KEY" => option_env!("TMDB_API_KEY"),
        "TIER_LIST_CLEAR_ON_EXIT" => option_env!("TIER_LIST_CLEAR_ON_EXIT"),
        "TIER_LIST_UNIQUE_MOVIES" => option_env!("TIER_LIST_UNIQUE_MOVIES"),
        _ => None,
    };
    value.map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides() {
        let config = AppConfig::from_lookup(|name| match name {
            "TMDB_API_KEY" => Some(" abc123 ".to_owned()),
            "TIER_LIST_CLEAR_ON_EXIT" => Some("true".to_owned()),
            "TIER_LIST_UNIQUE_MOVIES" => Some("0".to_owned()),
            _ => None,
        });
        assert_eq!(config.default_api_key, "abc123");
        assert_eq!(config.session_policy, SessionPolicy::ClearOnExit);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Allow);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"max_results": 5}"#).unwrap();
        assert_eq!(config.max_results, 5);
        assert_eq!(config.search_debounce_ms, 400);
        assert_eq!(config.session_policy, SessionPolicy::Persist);
    }
}
