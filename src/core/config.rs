use std::env;
use std::time::Duration;

use url::Url;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const MAX_FOCUS_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Option<Duration>,
    pub focus_minutes: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            focus_minutes: DEFAULT_FOCUS_MINUTES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url).map_err(|e| format!("GEMINI_BASE_URL: {}", e))?;

        let request_timeout = get("STUDYSPARK_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| format!("STUDYSPARK_TIMEOUT_SECS: {}", e))
            })
            .transpose()?;

        let focus_minutes = match get("STUDYSPARK_FOCUS_MINUTES") {
            Some(raw) => {
                let minutes = raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| format!("STUDYSPARK_FOCUS_MINUTES: {}", e))?;
                if !(1..=MAX_FOCUS_MINUTES).contains(&minutes) {
                    return Err(format!(
                        "STUDYSPARK_FOCUS_MINUTES: must be between 1 and {}",
                        MAX_FOCUS_MINUTES
                    ));
                }
                minutes
            }
            None => DEFAULT_FOCUS_MINUTES,
        };

        Ok(Self {
            api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
            focus_minutes,
        })
    }
}
