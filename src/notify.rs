//! Notification banners and the cart badge.
//!
//! Both live as explicit state on [`crate::tui::state::AppState`]. Expiry
//! is checked against a caller-supplied instant, once per rendered frame.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_BANNER_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
    pub expires_at: Instant,
}

/// Ordered banner stack, newest first.
#[derive(Debug, Clone)]
pub struct Notifications {
    banners: VecDeque<Banner>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            banners: VecDeque::new(),
            ttl,
        }
    }

    /// Prepend a banner so the newest renders topmost.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.banners.push_front(Banner {
            message: message.into(),
            severity,
            shown_at: now,
            expires_at: now + self.ttl,
        });
    }

    /// Drop every banner whose TTL has elapsed. A banner shown at T stays
    /// visible for prunes strictly before T + ttl and is gone at T + ttl.
    pub fn prune(&mut self, now: Instant) {
        self.banners.retain(|b| now < b.expires_at);
    }

    /// Manual close control for the topmost banner.
    pub fn dismiss_newest(&mut self) {
        self.banners.pop_front();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Banner> {
        self.banners.iter()
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_BANNER_TTL)
    }
}

/// Cart item count shown in the page header.
#[derive(Debug, Clone, Copy, Default)]
pub struct Badge {
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_lives_until_ttl_and_not_past_it() {
        let mut n = Notifications::new(Duration::from_millis(3000));
        let t0 = Instant::now();
        n.show("Added to cart!", Severity::Success, t0);

        n.prune(t0 + Duration::from_millis(2999));
        assert_eq!(n.len(), 1, "banner must survive until the TTL elapses");

        n.prune(t0 + Duration::from_millis(3000));
        assert!(n.is_empty(), "banner must be gone once the TTL elapses");
    }

    #[test]
    fn newest_banner_renders_first() {
        let mut n = Notifications::default();
        let t0 = Instant::now();
        n.show("first", Severity::Success, t0);
        n.show("second", Severity::Danger, t0 + Duration::from_millis(10));

        let messages: Vec<&str> = n.iter().map(|b| b.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn prune_only_drops_expired_banners() {
        let mut n = Notifications::new(Duration::from_millis(3000));
        let t0 = Instant::now();
        n.show("old", Severity::Danger, t0);
        n.show("new", Severity::Success, t0 + Duration::from_millis(2000));

        n.prune(t0 + Duration::from_millis(3500));
        let messages: Vec<&str> = n.iter().map(|b| b.message.as_str()).collect();
        assert_eq!(messages, vec!["new"]);
    }

    #[test]
    fn dismiss_removes_topmost() {
        let mut n = Notifications::default();
        let t0 = Instant::now();
        n.show("first", Severity::Success, t0);
        n.show("second", Severity::Danger, t0);

        n.dismiss_newest();
        assert_eq!(n.iter().next().map(|b| b.message.as_str()), Some("first"));

        n.dismiss_newest();
        n.dismiss_newest(); // extra dismiss on an empty stack is fine
        assert!(n.is_empty());
    }
}
