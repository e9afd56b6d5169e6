//! End-to-end submission flow against a mocked storefront endpoint.

use httpmock::prelude::*;
use shopfront::config::Config;
use shopfront::notify::Severity;
use shopfront::shop::rest::ShopRest;
use shopfront::shop::types::CartForm;
use shopfront::shop::CartApi;
use shopfront::submit::{run_dispatcher, ADDED_TO_CART};
use shopfront::tui::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

fn test_state() -> AppState {
    let config: Config = toml::from_str(
        r#"
        [shop]
        base_url = "http://127.0.0.1:5000"

        [[products]]
        id = 1
        name = "Espresso"
        price_cents = 350
        "#,
    )
    .unwrap();
    AppState::from_config(&config)
}

async fn wait_until<F>(rx: &mut watch::Receiver<AppState>, mut pred: F)
where
    F: FnMut(&AppState) -> bool,
{
    tokio::time::timeout(Duration::from_secs(3), async {
        loop {
            if pred(&rx.borrow()) {
                break;
            }
            rx.changed().await.expect("state channel closed");
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test]
async fn posts_form_fields_as_multipart() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/add_to_cart")
            .body_contains("product_id")
            .body_contains("quantity");
        then.status(200).json_body(serde_json::json!({
            "success": true,
            "message": "Added 2 items to cart",
            "cart_count": 3,
            "total_items": 5
        }));
    });

    let api = ShopRest::new();
    let form = CartForm {
        action: server.url("/add_to_cart"),
        product_id: 1,
        quantity: 2,
    };

    let resp = api.add_to_cart(&form).await.unwrap();
    mock.assert();

    assert!(resp.success);
    assert_eq!(resp.cart_count, Some(3));
    assert_eq!(resp.total_items, Some(5));
}

#[tokio::test]
async fn success_response_drives_banner_and_badge() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/add_to_cart");
        then.status(200).json_body(serde_json::json!({
            "success": true,
            "message": "Added to cart",
            "cart_count": 3
        }));
    });

    let (state_tx, mut state_rx) = watch::channel({
        let mut s = test_state();
        s.in_flight = 1;
        s
    });
    let (submit_tx, submit_rx) = mpsc::channel(16);
    let api: Arc<dyn CartApi> = Arc::new(ShopRest::new());
    let dispatcher = tokio::spawn(run_dispatcher(api, submit_rx, state_tx.clone()));

    submit_tx
        .send(CartForm {
            action: server.url("/add_to_cart"),
            product_id: 1,
            quantity: 1,
        })
        .await
        .unwrap();

    wait_until(&mut state_rx, |s| !s.notifications.is_empty()).await;

    let state = state_rx.borrow().clone();
    let banner = state.notifications.iter().next().unwrap();
    assert_eq!(banner.severity, Severity::Success);
    assert_eq!(banner.message, ADDED_TO_CART);
    assert_eq!(state.badge.unwrap().count, 3);
    assert_eq!(state.in_flight, 0);

    dispatcher.abort();
}

#[tokio::test]
async fn rejection_shows_server_message_verbatim() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/add_to_cart");
        then.status(200).json_body(serde_json::json!({
            "success": false,
            "message": "Product not found"
        }));
    });

    let (state_tx, mut state_rx) = watch::channel(test_state());
    let (submit_tx, submit_rx) = mpsc::channel(16);
    let api: Arc<dyn CartApi> = Arc::new(ShopRest::new());
    let dispatcher = tokio::spawn(run_dispatcher(api, submit_rx, state_tx.clone()));

    submit_tx
        .send(CartForm {
            action: server.url("/add_to_cart"),
            product_id: 42,
            quantity: 1,
        })
        .await
        .unwrap();

    wait_until(&mut state_rx, |s| !s.notifications.is_empty()).await;

    let state = state_rx.borrow().clone();
    let banner = state.notifications.iter().next().unwrap();
    assert_eq!(banner.severity, Severity::Danger);
    assert_eq!(banner.message, "Product not found");
    // Rejections never touch the badge.
    assert_eq!(state.badge.unwrap().count, 0);

    dispatcher.abort();
}

#[tokio::test]
async fn transport_failure_shows_generic_danger_banner() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/add_to_cart");
        then.status(500).body("internal error");
    });

    let (state_tx, mut state_rx) = watch::channel(test_state());
    let (submit_tx, submit_rx) = mpsc::channel(16);
    let api: Arc<dyn CartApi> = Arc::new(ShopRest::new());
    let dispatcher = tokio::spawn(run_dispatcher(api, submit_rx, state_tx.clone()));

    submit_tx
        .send(CartForm {
            action: server.url("/add_to_cart"),
            product_id: 1,
            quantity: 1,
        })
        .await
        .unwrap();

    wait_until(&mut state_rx, |s| !s.notifications.is_empty()).await;

    let state = state_rx.borrow().clone();
    let banner = state.notifications.iter().next().unwrap();
    assert_eq!(banner.severity, Severity::Danger);
    assert!(banner.message.starts_with("Request failed:"));

    dispatcher.abort();
}

#[tokio::test]
async fn overlapping_submissions_are_not_serialized() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/add_to_cart");
        then.status(200)
            .delay(Duration::from_millis(150))
            .json_body(serde_json::json!({
                "success": true,
                "cart_count": 1
            }));
    });

    let (state_tx, mut state_rx) = watch::channel({
        let mut s = test_state();
        s.in_flight = 2;
        s
    });
    let (submit_tx, submit_rx) = mpsc::channel(16);
    let api: Arc<dyn CartApi> = Arc::new(ShopRest::new());
    let dispatcher = tokio::spawn(run_dispatcher(api, submit_rx, state_tx.clone()));

    for _ in 0..2 {
        submit_tx
            .send(CartForm {
                action: server.url("/add_to_cart"),
                product_id: 1,
                quantity: 1,
            })
            .await
            .unwrap();
    }

    wait_until(&mut state_rx, |s| s.notifications.len() == 2).await;
    assert_eq!(state_rx.borrow().in_flight, 0);

    dispatcher.abort();
}
