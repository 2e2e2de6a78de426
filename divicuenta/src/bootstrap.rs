use std::{env, path::PathBuf};

use divicuenta_application::ReceiptOcrError;
use divicuenta_infrastructure::{
    GeminiConfig, GeminiReceiptOcr, JsonFileStore, SystemClock, UuidIdGenerator,
    gemini::DEFAULT_MODEL,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_DIR: &str = ".divicuenta";

/// Settings read from the environment (and `.env`, when present).
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("DIVICUENTA_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let api_key = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY"));

        let mut gemini = GeminiConfig::new(api_key);
        gemini.model = lookup("GEMINI_MODEL")
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        if !gemini.is_configured() {
            tracing::warn!("GEMINI_API_KEY is not set; receipt scanning is disabled");
        }
        tracing::debug!(data_dir = %data_dir.display(), model = %gemini.model, "configuration loaded");

        Self { data_dir, gemini }
    }

    pub fn receipt_ocr(&self) -> Result<GeminiReceiptOcr, ReceiptOcrError> {
        GeminiReceiptOcr::new(self.gemini.clone())
    }
}

/// Long-lived collaborators the services borrow from.
pub struct AppContext {
    pub store: JsonFileStore,
    pub clock: SystemClock,
    pub ids: UuidIdGenerator,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: JsonFileStore::new(&config.data_dir),
            clock: SystemClock,
            ids: UuidIdGenerator,
        }
    }
}

/// Logs go to stderr so command output stays pipeable. `RUST_LOG` overrides
/// the default `warn` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup(&[]));

        assert_eq!(config.data_dir, PathBuf::from(".divicuenta"));
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert!(!config.gemini.is_configured());
    }

    #[rstest]
    #[case::primary(&[("GEMINI_API_KEY", "primary"), ("API_KEY", "fallback")], "primary")]
    #[case::fallback(&[("API_KEY", "fallback")], "fallback")]
    fn api_key_lookup_order(#[case] vars: &[(&str, &str)], #[case] expected: &str) {
        let config = AppConfig::from_lookup(lookup(vars));

        assert_eq!(config.gemini.api_key.as_deref(), Some(expected));
    }

    #[test]
    fn explicit_settings_win() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DIVICUENTA_DATA_DIR", "/tmp/cuentas"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
        ]));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/cuentas"));
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
    }
}
