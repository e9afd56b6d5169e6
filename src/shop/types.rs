use serde::Deserialize;

/// One add-to-cart form: the fields a menu row posts, plus the action URL
/// the form declares. Built per submission and consumed by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartForm {
    pub action: String,
    pub product_id: u32,
    pub quantity: u32,
}

/// JSON the storefront answers with. The server omits `cart_count` on
/// rejections and `message` is free-form, so both parse tolerantly.
#[derive(Debug, Clone, Deserialize)]
pub struct CartResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cart_count: Option<u64>,
    /// Sum of per-line quantities; distinct from `cart_count` (lines).
    #[serde(default)]
    pub total_items: Option<u64>,
}
