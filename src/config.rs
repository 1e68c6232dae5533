use std::env;

use crate::format::ExtractFormat;
use crate::util::normalize_language;

pub const DEFAULT_API_URL_TEMPLATE: &str = "https://{language}.wikipedia.org/w/api.php";
pub const DEFAULT_USER_AGENT: &str = concat!(
    "wikipage/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/martin-majlis/Wikipedia-API)"
);
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct WikiConfig {
    pub language: String,
    pub extract_format: ExtractFormat,
    pub user_agent: String,
    pub timeout_ms: u64,
    pub api_url_template: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            extract_format: ExtractFormat::Wiki,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            api_url_template: DEFAULT_API_URL_TEMPLATE.to_string(),
        }
    }
}

impl WikiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            language: normalize_language(&env_value("WIKIPAGE_LANGUAGE", &defaults.language)),
            extract_format: env::var("WIKIPAGE_EXTRACT_FORMAT")
                .ok()
                .and_then(|value| ExtractFormat::parse(&value))
                .unwrap_or(defaults.extract_format),
            user_agent: env_value("WIKIPAGE_USER_AGENT", &defaults.user_agent),
            timeout_ms: env::var("WIKIPAGE_TIMEOUT_MS")
                .ok()
                .and_then(|value| value.trim().parse::<u64>().ok())
                .unwrap_or(defaults.timeout_ms),
            api_url_template: env_value("WIKIPAGE_API_URL", &defaults.api_url_template),
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = normalize_language(language);
        self
    }

    pub fn with_extract_format(mut self, extract_format: ExtractFormat) -> Self {
        self.extract_format = extract_format;
        self
    }

    pub fn api_url(&self, language: &str) -> String {
        self.api_url_template.replace("{language}", language)
    }
}

fn env_value(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_substitutes_language() {
        let config = WikiConfig::default();
        assert_eq!(config.api_url("cs"), "https://cs.wikipedia.org/w/api.php");
    }

    #[test]
    fn language_is_normalized() {
        let config = WikiConfig::default().with_language("  DE ");
        assert_eq!(config.language, "de");
    }
}
