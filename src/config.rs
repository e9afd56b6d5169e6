use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub shop: ShopConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShopConfig {
    pub base_url: String,
    #[serde(default = "default_cart_path")]
    pub add_to_cart_path: String,
}

fn default_cart_path() -> String {
    "/add_to_cart".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// How long a notification banner stays on screen before it is removed.
    #[serde(default = "default_banner_ttl_ms")]
    pub banner_ttl_ms: u64,
    /// The UI may run without a cart badge; count updates must be no-ops
    /// in that case.
    #[serde(default = "default_show_badge")]
    pub show_badge: bool,
}

fn default_banner_ttl_ms() -> u64 {
    3000
}

fn default_show_badge() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            banner_ttl_ms: default_banner_ttl_ms(),
            show_badge: default_show_badge(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    pub id: u32,
    pub name: String,
    pub price_cents: u64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }

    /// Absolute action URL the add-to-cart forms post to.
    pub fn cart_action(&self) -> String {
        format!(
            "{}/{}",
            self.shop.base_url.trim_end_matches('/'),
            self.shop.add_to_cart_path.trim_start_matches('/')
        )
    }
}
