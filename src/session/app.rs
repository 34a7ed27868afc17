use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::models::{StudyStats, View};
use crate::host::KeySelector;

/// Everything the top-level shell knows. Only [`AppController`] writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub active_view: View,
    pub stats: StudyStats,
    pub quiz_topic: Option<String>,
    pub show_api_key_dialog: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AppController {
    state: AppState,
}

impl AppController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn active_view(&self) -> View {
        self.state.active_view
    }

    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.state.stats.streak
    }

    pub fn select_view(&mut self, view: View) {
        if self.state.active_view != view {
            info!(from = ?self.state.active_view, to = ?view, "Switching view");
        }
        self.state.active_view = view;
    }

    /// "Quiz Me": remember the topic and jump to the quiz view.
    pub fn start_quiz(&mut self, topic: impl Into<String>) {
        self.state.quiz_topic = Some(topic.into());
        self.select_view(View::Quiz);
    }

    pub fn increment_streak(&mut self) -> u32 {
        self.state.stats.streak = self.state.stats.streak.saturating_add(1);
        self.state.stats.streak
    }

    pub fn record_topic_learned(&mut self) {
        self.state.stats.topics_learned = self.state.stats.topics_learned.saturating_add(1);
    }

    pub fn complete_quiz(&mut self) -> u32 {
        self.increment_streak()
    }

    pub fn complete_focus_session(&mut self, minutes: u32) -> u32 {
        self.state.stats.focus_minutes = self.state.stats.focus_minutes.saturating_add(minutes);
        self.increment_streak()
    }

    /// Startup probe of the host key selector. A failing probe is treated
    /// like a missing key.
    pub async fn check_api_key<K: KeySelector + ?Sized>(&mut self, selector: &K) -> bool {
        let has_key = match selector.has_selected_api_key().await {
            Ok(has_key) => has_key,
            Err(e) => {
                warn!("API key check failed: {}", e);
                false
            }
        };
        self.state.show_api_key_dialog = !has_key;
        has_key
    }

    /// The dialog's "Select API Key" button.
    pub async fn continue_from_key_dialog<K: KeySelector + ?Sized>(&mut self, selector: &K) {
        self.state.show_api_key_dialog = false;
        if let Err(e) = selector.open_select_key().await {
            warn!("Failed to open key selection: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::INITIAL_STREAK;
    use crate::errors::StudyError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct BrokenHost {
        opened: AtomicUsize,
    }

    #[async_trait]
    impl KeySelector for BrokenHost {
        async fn has_selected_api_key(&self) -> Result<bool, StudyError> {
            Err(StudyError::Config("host unavailable".into()))
        }

        async fn open_select_key(&self) -> Result<(), StudyError> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_initial_state() {
        let app = AppController::new();
        assert_eq!(app.active_view(), View::Chat);
        assert_eq!(app.streak(), INITIAL_STREAK);
        assert!(app.state().quiz_topic.is_none());
    }

    #[test]
    fn test_start_quiz_switches_view() {
        let mut app = AppController::new();
        app.start_quiz("volcanoes");
        assert_eq!(app.active_view(), View::Quiz);
        assert_eq!(app.state().quiz_topic.as_deref(), Some("volcanoes"));
    }

    #[test]
    fn test_focus_completion_adds_minutes_and_streak() {
        let mut app = AppController::new();
        app.complete_focus_session(25);
        assert_eq!(app.state().stats.focus_minutes, 25);
        assert_eq!(app.streak(), INITIAL_STREAK + 1);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let mut app = AppController::new();
        app.select_view(View::Focus);
        app.record_topic_learned();
        let json = serde_json::to_string(app.state()).unwrap();
        assert!(json.contains("\"activeView\":\"focus\""));

        let restored: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(&restored, app.state());
    }

    #[tokio::test]
    async fn test_failed_key_probe_shows_dialog() {
        let host = BrokenHost {
            opened: AtomicUsize::new(0),
        };
        let mut app = AppController::new();
        assert!(!app.check_api_key(&host).await);
        assert!(app.state().show_api_key_dialog);

        app.continue_from_key_dialog(&host).await;
        assert!(!app.state().show_api_key_dialog);
        assert_eq!(host.opened.load(Ordering::SeqCst), 1);
    }
}
