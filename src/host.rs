//! Credential selection is owned by the host; this crate only asks whether a
//! key is available and, if not, asks the host to start its selection flow.

use async_trait::async_trait;
use tracing::warn;

use crate::errors::StudyError;

#[async_trait]
pub trait KeySelector: Send + Sync {
    async fn has_selected_api_key(&self) -> Result<bool, StudyError>;

    async fn open_select_key(&self) -> Result<(), StudyError>;
}

/// Host backed by the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvKeySelector {
    api_key: Option<String>,
}

impl EnvKeySelector {
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }
}

#[async_trait]
impl KeySelector for EnvKeySelector {
    async fn has_selected_api_key(&self) -> Result<bool, StudyError> {
        Ok(self
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty()))
    }

    async fn open_select_key(&self) -> Result<(), StudyError> {
        warn!("No API key selected. Set GEMINI_API_KEY (or API_KEY) and restart StudySpark.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_env_selector_reports_key_presence() {
        assert!(
            EnvKeySelector::new(Some("abc".into()))
                .has_selected_api_key()
                .await
                .unwrap()
        );
        assert!(
            !EnvKeySelector::new(Some("  ".into()))
                .has_selected_api_key()
                .await
                .unwrap()
        );
        assert!(!EnvKeySelector::default().has_selected_api_key().await.unwrap());
    }
}
