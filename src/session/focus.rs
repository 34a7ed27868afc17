use tracing::info;

use crate::core::config::{DEFAULT_FOCUS_MINUTES, MAX_FOCUS_MINUTES};

pub const INITIAL_QUOTE: &str = "Let's do this!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Paused,
    Running { remaining: u32 },
    /// The countdown hit zero; the timer has stopped and rewound.
    Completed { minutes: u32 },
}

/// Pomodoro countdown driven by one-second ticks.
#[derive(Debug, Clone)]
pub struct FocusTimer {
    session_secs: u32,
    remaining: u32,
    active: bool,
    quote: String,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_MINUTES)
    }
}

impl FocusTimer {
    /// `minutes` is clamped to `1..=MAX_FOCUS_MINUTES`.
    #[must_use]
    pub fn new(minutes: u32) -> Self {
        let session_secs = minutes.clamp(1, MAX_FOCUS_MINUTES) * 60;
        Self {
            session_secs,
            remaining: session_secs,
            active: false,
            quote: INITIAL_QUOTE.to_string(),
        }
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn quote(&self) -> &str {
        &self.quote
    }

    pub fn set_quote(&mut self, quote: impl Into<String>) {
        self.quote = quote.into();
    }

    #[must_use]
    pub const fn session_minutes(&self) -> u32 {
        self.session_secs / 60
    }

    /// Start/pause. Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.remaining = self.session_secs;
    }

    /// True right after starting a fresh session, which is when a new
    /// motivational quote is fetched.
    #[must_use]
    pub const fn wants_motivation(&self) -> bool {
        self.active && self.remaining == self.session_secs
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.active {
            return TickOutcome::Paused;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return TickOutcome::Running {
                remaining: self.remaining,
            };
        }

        let minutes = self.session_minutes();
        info!(minutes, "Focus session complete");
        self.reset();
        TickOutcome::Completed { minutes }
    }

    #[must_use]
    pub fn display(&self) -> String {
        format_time(self.remaining)
    }
}

/// `MM:SS`, minutes not capped at 59.
#[must_use]
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(25 * 60), "25:00");
        assert_eq!(format_time(61), "01:01");
        assert_eq!(format_time(0), "00:00");
    }

    #[test]
    fn test_paused_timer_does_not_move() {
        let mut timer = FocusTimer::default();
        assert_eq!(timer.tick(), TickOutcome::Paused);
        assert_eq!(timer.remaining(), 25 * 60);
        assert_eq!(timer.quote(), INITIAL_QUOTE);
    }

    #[test]
    fn test_motivation_wanted_only_at_session_start() {
        let mut timer = FocusTimer::new(1);
        assert!(!timer.wants_motivation());
        timer.toggle();
        assert!(timer.wants_motivation());
        timer.tick();
        assert!(!timer.wants_motivation());
    }

    #[test]
    fn test_completion_fires_once_and_rewinds() {
        let mut timer = FocusTimer::new(1);
        timer.toggle();

        let mut completions = 0;
        for _ in 0..120 {
            if let TickOutcome::Completed { minutes } = timer.tick() {
                assert_eq!(minutes, 1);
                completions += 1;
            }
        }

        assert_eq!(completions, 1);
        assert!(!timer.is_active());
        assert_eq!(timer.remaining(), 60);
    }

    #[test]
    fn test_oversized_session_is_clamped() {
        let timer = FocusTimer::new(100_000_000);
        assert_eq!(timer.session_minutes(), MAX_FOCUS_MINUTES);
        assert_eq!(timer.remaining(), MAX_FOCUS_MINUTES * 60);
        assert_eq!(FocusTimer::new(0).session_minutes(), 1);
    }

    #[test]
    fn test_reset_stops_and_rewinds() {
        let mut timer = FocusTimer::new(2);
        timer.toggle();
        timer.tick();
        timer.reset();
        assert!(!timer.is_active());
        assert_eq!(timer.display(), "02:00");
    }
}
