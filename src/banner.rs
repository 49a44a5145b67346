//! Transient success and error messages.

use std::time::{Duration, Instant};

use colored::Colorize;
use serde::Serialize;

pub const SUCCESS_DURATION: Duration = Duration::from_secs(3);
pub const ERROR_DURATION: Duration = Duration::from_secs(5);
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Error,
    Notice,
}

/// A message that is shown for a fixed time and then clears itself.
#[derive(Debug, Clone)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
    shown_at: Instant,
    duration: Duration,
}

impl Banner {
    pub fn new(kind: BannerKind, text: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
            duration,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(BannerKind::Success, text, SUCCESS_DURATION)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(BannerKind::Error, text, ERROR_DURATION)
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self::new(BannerKind::Notice, text, NOTICE_DURATION)
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.duration
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }

    pub fn render(&self) -> String {
        match self.kind {
            BannerKind::Success => self.text.green().to_string(),
            BannerKind::Error => self.text.red().bold().to_string(),
            BannerKind::Notice => self.text.cyan().to_string(),
        }
    }
}

/// Holds at most one banner; a newer banner replaces the older one.
#[derive(Debug, Default)]
pub struct BannerSlot {
    current: Option<Banner>,
}

impl BannerSlot {
    pub fn show(&mut self, banner: Banner) {
        self.current = Some(banner);
    }

    /// The banner if it has not yet expired. Expired banners are dropped.
    pub fn current_at(&mut self, now: Instant) -> Option<&Banner> {
        if self.current.as_ref().is_some_and(|b| !b.is_visible_at(now)) {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn current(&mut self) -> Option<&Banner> {
        self.current_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_clears_after_its_duration() {
        let banner = Banner::error("Failed to update task");
        let start = banner.shown_at;

        assert!(banner.is_visible_at(start));
        assert!(banner.is_visible_at(start + Duration::from_millis(4_999)));
        assert!(!banner.is_visible_at(start + ERROR_DURATION));
    }

    #[test]
    fn success_banners_are_shorter() {
        let banner = Banner::success("Task created successfully");
        assert!(!banner.is_visible_at(banner.shown_at + Duration::from_secs(3)));
    }

    #[test]
    fn slot_drops_expired_banner() {
        let mut slot = BannerSlot::default();
        let banner = Banner::notice("Account activated");
        let later = banner.shown_at + NOTICE_DURATION;
        slot.show(banner);

        assert!(slot.current().is_some());
        assert!(slot.current_at(later).is_none());
        assert!(slot.current().is_none());
    }

    #[test]
    fn newer_banner_replaces_older() {
        let mut slot = BannerSlot::default();
        slot.show(Banner::success("first"));
        slot.show(Banner::error("second"));
        assert_eq!(slot.current().map(|b| b.text.as_str()), Some("second"));
        assert_eq!(slot.current().map(|b| b.kind), Some(BannerKind::Error));
    }
}
