pub mod rest;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use types::{CartForm, CartResponse};

#[async_trait]
pub trait CartApi: Send + Sync {
    /// Submit one add-to-cart form to its action URL.
    async fn add_to_cart(&self, form: &CartForm) -> Result<CartResponse>;
}
