use crate::config::Config;
use crate::notify::{Badge, Notifications};
use crate::shop::types::CartForm;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct AppState {
    pub shop_url: String,
    pub menu: Vec<MenuRow>,
    pub selected: usize,
    pub notifications: Notifications,
    /// The header may be configured without a badge; count updates are
    /// silent no-ops then.
    pub badge: Option<Badge>,
    pub in_flight: usize,
    pub submitted_total: u64,
    pub logs: VecDeque<LogEntry>,
    pub start_time: Instant,
}

/// One menu row doubles as one add-to-cart form: a fixed product id plus
/// an editable quantity, posting to the shared action URL.
#[derive(Debug, Clone)]
pub struct MenuRow {
    pub product_id: u32,
    pub name: String,
    pub price_cents: u64,
    pub quantity: u32,
    pub action: String,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let action = config.cart_action();
        let menu = config
            .products
            .iter()
            .map(|p| MenuRow {
                product_id: p.id,
                name: p.name.clone(),
                price_cents: p.price_cents,
                quantity: p.quantity.max(1),
                action: action.clone(),
            })
            .collect();

        Self {
            shop_url: config.shop.base_url.clone(),
            menu,
            selected: 0,
            notifications: Notifications::new(Duration::from_millis(config.ui.banner_ttl_ms)),
            badge: config.ui.show_badge.then(Badge::default),
            in_flight: 0,
            submitted_total: 0,
            logs: VecDeque::with_capacity(200),
            start_time: Instant::now(),
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.menu.len() {
            self.selected += 1;
        }
    }

    /// Quantity edits clamp at 1; the server rejects non-positive amounts
    /// anyway, so the form never offers them.
    pub fn increment_quantity(&mut self) {
        if let Some(row) = self.menu.get_mut(self.selected) {
            row.quantity = row.quantity.saturating_add(1);
        }
    }

    pub fn decrement_quantity(&mut self) {
        if let Some(row) = self.menu.get_mut(self.selected) {
            row.quantity = row.quantity.max(2) - 1;
        }
    }

    /// Package the selected row's fields for the multipart body.
    /// Read-only: submitting must not alter the menu view.
    pub fn selected_form(&self) -> Option<CartForm> {
        self.menu.get(self.selected).map(|row| CartForm {
            action: row.action.clone(),
            product_id: row.product_id,
            quantity: row.quantity,
        })
    }

    /// Badge update from a server-reported count. No badge, no-op.
    pub fn update_cart_count(&mut self, count: u64) {
        if let Some(badge) = self.badge.as_mut() {
            badge.count = count;
        }
    }

    pub fn push_log(&mut self, level: &str, message: String) {
        let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        if self.logs.len() >= 200 {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            time,
            level: level.to_string(),
            message,
        });
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        format!("{}h {:02}m", h, m)
    }
}
