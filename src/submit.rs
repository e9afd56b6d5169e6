//! Asynchronous submission path between the menu view and the storefront.
//!
//! The TUI enqueues one [`CartForm`] per submit keypress; each form is
//! posted from its own spawned task, so nothing bounds or serializes
//! overlapping submissions.

use crate::notify::Severity;
use crate::shop::types::{CartForm, CartResponse};
use crate::shop::CartApi;
use crate::tui::state::AppState;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, watch};

/// Success banners use a fixed caption; the server's own success message
/// is only logged. Rejections show the server message verbatim.
pub const ADDED_TO_CART: &str = "Added to cart!";

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Well-formed response with `success: true`.
    Accepted(CartResponse),
    /// Well-formed response with `success: false`; the server's message.
    Rejected(String),
    /// Transport or decode failure; surfaced as a banner like a rejection.
    Failed(String),
}

/// Drain submissions and POST each one from its own task.
pub async fn run_dispatcher(
    api: Arc<dyn CartApi>,
    mut submit_rx: mpsc::Receiver<CartForm>,
    state_tx: watch::Sender<AppState>,
) {
    while let Some(form) = submit_rx.recv().await {
        let api = api.clone();
        let state_tx = state_tx.clone();
        tokio::spawn(async move {
            tracing::debug!(
                product_id = form.product_id,
                quantity = form.quantity,
                action = %form.action,
                "posting add-to-cart form"
            );
            let outcome = match api.add_to_cart(&form).await {
                Ok(resp) if resp.success => SubmitOutcome::Accepted(resp),
                Ok(resp) => SubmitOutcome::Rejected(
                    resp.message
                        .unwrap_or_else(|| "Request rejected".to_string()),
                ),
                Err(e) => {
                    let message = format!("{e:#}");
                    tracing::warn!(
                        product_id = form.product_id,
                        error = %message,
                        "add-to-cart request failed"
                    );
                    SubmitOutcome::Failed(message)
                }
            };
            apply_outcome(&state_tx, outcome);
        });
    }
}

/// Fold one submission outcome into shared state: banner, badge, counters.
pub fn apply_outcome(state_tx: &watch::Sender<AppState>, outcome: SubmitOutcome) {
    let now = Instant::now();
    state_tx.send_modify(|s| {
        s.in_flight = s.in_flight.saturating_sub(1);
        match &outcome {
            SubmitOutcome::Accepted(resp) => {
                s.notifications.show(ADDED_TO_CART, Severity::Success, now);
                if let Some(count) = resp.cart_count {
                    s.update_cart_count(count);
                }
                let detail = resp
                    .message
                    .clone()
                    .unwrap_or_else(|| ADDED_TO_CART.to_string());
                s.push_log("INFO", detail);
            }
            SubmitOutcome::Rejected(message) => {
                s.notifications.show(message.clone(), Severity::Danger, now);
                s.push_log("WARN", format!("rejected: {}", message));
            }
            SubmitOutcome::Failed(message) => {
                s.notifications
                    .show(format!("Request failed: {}", message), Severity::Danger, now);
                s.push_log("ERROR", message.clone());
            }
        }
    });
}
