//! Runtime configuration: where the recommendation endpoint lives and how
//! chatty the console log is.
//!
//! Sources, later ones winning:
//! 1. built-in defaults (`http://localhost:8080`, `info`)
//! 2. a JSON object in `localStorage["pathfinder_config"]`,
//!    e.g. `{"apiBaseUrl":"http://10.0.0.5:8080","logLevel":"debug"}`
//! 3. the page query string, `?api=<url>&log=<level>`
//!
//! Invalid values are skipped with a warning and the previous value is kept.

use log::LevelFilter;
use reqwest::Url;
use serde::Deserialize;

use crate::pathfinder::fetch::DEFAULT_BASE_URL;

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "pathfinder_config";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

/// Shape of the JSON kept in localStorage. Every field is optional.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct StoredConfig {
    api_base_url: Option<String>,
    log_level: Option<String>,
}

impl Config {
    /// Apply overrides from the stored JSON blob. Unparseable JSON is ignored.
    pub fn with_stored(mut self, json: &str) -> Self {
        let stored: StoredConfig = match serde_json::from_str(json) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("ignoring stored config: {}", e);
                return self;
            }
        };
        if let Some(api) = stored.api_base_url {
            self.set_api(&api);
        }
        if let Some(level) = stored.log_level {
            self.set_log_level(&level);
        }
        self
    }

    /// Apply `?api=` / `?log=` overrides from the page URL.
    pub fn with_page_url(mut self, href: &str) -> Self {
        let Ok(url) = Url::parse(href) else {
            return self;
        };
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "api" => self.set_api(&value),
                "log" => self.set_log_level(&value),
                _ => {}
            }
        }
        self
    }

    fn set_api(&mut self, raw: &str) {
        match normalize_base_url(raw) {
            Some(base) => self.api_base_url = base,
            None => log::warn!("ignoring invalid API base URL {:?}", raw),
        }
    }

    fn set_log_level(&mut self, raw: &str) {
        match raw.trim().parse::<LevelFilter>() {
            Ok(level) => self.log_level = level,
            Err(_) => log::warn!("ignoring unknown log level {:?}", raw),
        }
    }

    /// Build the configuration from defaults, localStorage, then the page URL.
    pub fn load() -> Self {
        let mut config = Config::default();
        if let Some(json) = stored_json() {
            config = config.with_stored(&json);
        }
        if let Some(href) = page_href() {
            config = config.with_page_url(&href);
        }
        config
    }
}

#[cfg(target_arch = "wasm32")]
fn stored_json() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(STORAGE_KEY)
        .ok()?
}

#[cfg(target_arch = "wasm32")]
fn page_href() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn stored_json() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn page_href() -> Option<String> {
    None
}

/// Accept only absolute http(s) URLs; drop any trailing slash.
fn normalize_base_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    Some(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_localhost() {
        let c = Config::default();
        assert_eq!(c.api_base_url, "http://localhost:8080");
        assert_eq!(c.log_level, LevelFilter::Info);
    }

    #[test]
    fn page_url_overrides_api_and_log() {
        let c = Config::default()
            .with_page_url("http://app.test/?api=http%3A%2F%2F10.0.0.5%3A9000%2F&log=debug");
        assert_eq!(c.api_base_url, "http://10.0.0.5:9000");
        assert_eq!(c.log_level, LevelFilter::Debug);
    }

    #[test]
    fn page_url_without_query_changes_nothing() {
        let c = Config::default().with_page_url("http://app.test/index.html");
        assert_eq!(c, Config::default());
    }

    #[test]
    fn invalid_values_are_skipped() {
        let c = Config::default().with_page_url("http://app.test/?api=ftp://x&log=loud");
        assert_eq!(c, Config::default());

        let c = Config::default().with_page_url("not a url");
        assert_eq!(c, Config::default());
    }

    #[test]
    fn stored_json_applies_and_query_wins() {
        let c = Config::default()
            .with_stored(r#"{"apiBaseUrl":"https://api.example.edu/v1/","logLevel":"warn"}"#);
        assert_eq!(c.api_base_url, "https://api.example.edu/v1");
        assert_eq!(c.log_level, LevelFilter::Warn);

        let c = c.with_page_url("http://app.test/?log=trace");
        assert_eq!(c.api_base_url, "https://api.example.edu/v1");
        assert_eq!(c.log_level, LevelFilter::Trace);
    }

    #[test]
    fn stored_json_may_be_partial_or_broken() {
        let c = Config::default().with_stored(r#"{"logLevel":"off"}"#);
        assert_eq!(c.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(c.log_level, LevelFilter::Off);

        assert_eq!(Config::default().with_stored("{oops"), Config::default());
    }
}
