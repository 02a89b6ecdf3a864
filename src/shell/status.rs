//! Status sink - the message, spinner and error flash of the status bar

use std::time::{Duration, Instant};

use crate::constants::{READY_MESSAGE, SPINNER_FRAMES};
use crate::shell::timers::{TimerId, TimerQueue};

/// Colour family of the status message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MessageTone {
    #[default]
    Normal,
    Error,
}

#[derive(Debug)]
enum StatusTimer {
    RevertTone,
}

/// Signed-in user shown in the top bar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserInfo {
    pub greeting: String,
    pub display_name: String,
}

pub struct StatusSink {
    message: String,
    tone: MessageTone,
    spinning: bool,
    spinner_frame: usize,
    progress: Option<u8>,
    connection: Option<String>,
    user: Option<UserInfo>,
    timers: TimerQueue<StatusTimer>,
    revert_timer: Option<TimerId>,
}

impl Default for StatusSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink {
    pub fn new() -> Self {
        StatusSink {
            message: String::from(READY_MESSAGE),
            tone: MessageTone::Normal,
            spinning: false,
            spinner_frame: 0,
            progress: None,
            connection: None,
            user: None,
            timers: TimerQueue::new(),
            revert_timer: None,
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn start_spinner(&mut self) {
        if !self.spinning {
            self.spinner_frame = 0;
        }
        self.spinning = true;
        self.progress = None;
    }

    pub fn stop_spinner(&mut self) {
        self.spinning = false;
        self.spinner_frame = 0;
        self.progress = None;
    }

    /// Show `text` in the error tone, reverting to normal after `duration`.
    /// A newer flash replaces the pending revert of an older one.
    pub fn flash_error(&mut self, text: impl Into<String>, duration: Duration) {
        self.flash_error_at(text, duration, Instant::now());
    }

    pub fn flash_error_at(&mut self, text: impl Into<String>, duration: Duration, now: Instant) {
        self.message = text.into();
        self.tone = MessageTone::Error;
        if let Some(previous) = self.revert_timer.take() {
            self.timers.cancel(previous);
        }
        self.revert_timer = Some(self.timers.schedule(now + duration, StatusTimer::RevertTone));
    }

    /// Record a progress report. Empty messages leave the text unchanged.
    pub fn set_progress(&mut self, percent: u8, message: Option<&str>) {
        self.progress = Some(percent.min(100));
        if let Some(message) = message.filter(|m| !m.is_empty()) {
            self.message = message.to_string();
        }
    }

    /// Fire due timers
    pub fn tick(&mut self, now: Instant) {
        for (id, event) in self.timers.pop_due(now) {
            match event {
                StatusTimer::RevertTone => {
                    if self.revert_timer == Some(id) {
                        self.revert_timer = None;
                    }
                    self.tone = MessageTone::Normal;
                }
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn advance_spinner(&mut self) {
        if self.spinning {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn set_connection(&mut self, database: &str) {
        self.connection = Some(format!("Connecté à {}", database));
    }

    pub fn set_user(&mut self, first_name: &str, last_name: &str) {
        self.user = Some(UserInfo {
            greeting: String::from("Bonjour"),
            display_name: format!("{} {}", first_name, last_name),
        });
    }

    /// Forget the signed-in user and the connection label
    pub fn clear_user(&mut self) {
        self.user = None;
        self.connection = None;
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tone(&self) -> MessageTone {
        self.tone
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn spinner_glyph(&self) -> Option<&'static str> {
        self.spinning.then(|| SPINNER_FRAMES[self.spinner_frame])
    }

    pub fn progress(&self) -> Option<u8> {
        self.progress
    }

    pub fn connection(&self) -> Option<&str> {
        self.connection.as_deref()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_error_reverts_after_delay() {
        let start = Instant::now();
        let mut status = StatusSink::new();
        status.flash_error_at("Erreur: boom", Duration::from_millis(3000), start);
        assert_eq!(status.tone(), MessageTone::Error);

        status.tick(start + Duration::from_millis(2999));
        assert_eq!(status.tone(), MessageTone::Error);

        status.tick(start + Duration::from_millis(3000));
        assert_eq!(status.tone(), MessageTone::Normal);
        assert_eq!(status.message(), "Erreur: boom");
        assert!(status.next_deadline().is_none());
    }

    #[test]
    fn test_newer_flash_preempts_pending_revert() {
        let start = Instant::now();
        let mut status = StatusSink::new();
        status.flash_error_at("first", Duration::from_millis(3000), start);
        status.flash_error_at("second", Duration::from_millis(3000), start + Duration::from_millis(2000));

        status.tick(start + Duration::from_millis(3500));
        assert_eq!(status.tone(), MessageTone::Error);
        assert_eq!(status.message(), "second");

        status.tick(start + Duration::from_millis(5000));
        assert_eq!(status.tone(), MessageTone::Normal);
    }

    #[test]
    fn test_progress_keeps_text_without_message() {
        let mut status = StatusSink::new();
        status.start_spinner();
        status.set_message("Connexion...");
        status.set_progress(20, None);
        status.set_progress(50, Some(""));
        assert_eq!(status.message(), "Connexion...");
        assert_eq!(status.progress(), Some(50));

        status.set_progress(150, Some("Chargement"));
        assert_eq!(status.message(), "Chargement");
        assert_eq!(status.progress(), Some(100));
    }

    #[test]
    fn test_spinner_frames_only_advance_while_spinning() {
        let mut status = StatusSink::new();
        status.advance_spinner();
        assert!(status.spinner_glyph().is_none());

        status.start_spinner();
        status.advance_spinner();
        assert_eq!(status.spinner_glyph(), Some(SPINNER_FRAMES[1]));

        status.stop_spinner();
        assert!(!status.is_spinning());
        assert!(status.progress().is_none());
    }

    #[test]
    fn test_user_info_and_connection() {
        let mut status = StatusSink::new();
        status.set_user("Admin", "Utilisateur");
        status.set_connection("MAMI_PROD");
        assert_eq!(status.user().map(|u| u.display_name.as_str()), Some("Admin Utilisateur"));
        assert_eq!(status.connection(), Some("Connecté à MAMI_PROD"));

        status.clear_user();
        assert!(status.user().is_none());
        assert!(status.connection().is_none());
    }
}
