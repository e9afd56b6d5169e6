use super::types::{CartForm, CartResponse};
use super::CartApi;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;

pub struct ShopRest {
    client: Client,
}

impl ShopRest {
    pub fn new() -> Self {
        let client = Client::builder()
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }
}

impl Default for ShopRest {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartApi for ShopRest {
    /// POST the form fields as multipart/form-data, the same body a browser
    /// produces for the storefront's add-to-cart form.
    async fn add_to_cart(&self, form: &CartForm) -> Result<CartResponse> {
        let body = multipart::Form::new()
            .text("product_id", form.product_id.to_string())
            .text("quantity", form.quantity.to_string());

        let resp = self
            .client
            .post(&form.action)
            .multipart(body)
            .send()
            .await
            .context("add-to-cart request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("add-to-cart failed ({}): {}", status, body);
        }

        resp.json()
            .await
            .context("failed to parse add-to-cart response")
    }
}
