//! Domain models shared by the browser and the CLI.
//!
//! # Categories
//!
//! - **Catalog enums** - [`Category`], [`SortOrder`]
//! - **Assets** - [`Asset`], [`Creator`]
//! - **Purchases** - [`PurchaseRequest`], [`PurchaseRecord`]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::pricing;

// =============================================================================
// Catalog Enums
// =============================================================================

/// Fixed asset category set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Characters,
    Vehicles,
    Architecture,
    Nature,
    Props,
    Abstract,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 6] = [
        Category::Characters,
        Category::Vehicles,
        Category::Architecture,
        Category::Nature,
        Category::Props,
        Category::Abstract,
    ];

    /// Wire / URL identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Characters => "characters",
            Category::Vehicles => "vehicles",
            Category::Architecture => "architecture",
            Category::Nature => "nature",
            Category::Props => "props",
            Category::Abstract => "abstract",
        }
    }

    /// Human label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Characters => "Characters",
            Category::Vehicles => "Vehicles",
            Category::Architecture => "Architecture",
            Category::Nature => "Nature",
            Category::Props => "Props",
            Category::Abstract => "Abstract",
        }
    }

    /// Emoji shown on the wizard's category picker.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Characters => "🧙",
            Category::Vehicles => "🚗",
            Category::Architecture => "🏛️",
            Category::Nature => "🌲",
            Category::Props => "🎮",
            Category::Abstract => "✨",
        }
    }

    /// Parse a catalog filter value; `"all"` and empty mean no filter.
    pub fn parse_filter(value: &str) -> Option<Category> {
        match value.trim() {
            "" | "all" => None,
            other => other.parse().ok(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// Catalog ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Newest,
    Popular,
    PriceLow,
    PriceHigh,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Newest,
        SortOrder::Popular,
        SortOrder::PriceLow,
        SortOrder::PriceHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Popular => "popular",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest First",
            SortOrder::Popular => "Most Popular",
            SortOrder::PriceLow => "Price: Low to High",
            SortOrder::PriceHigh => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|o| o.as_str() == s.trim())
            .ok_or_else(|| format!("unknown sort order: {}", s))
    }
}

// =============================================================================
// Assets
// =============================================================================

/// Public creator profile embedded in an asset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A purchasable 3D model listing.
///
/// Received from `GET /objects` and `GET /objects/{id}`. The server has
/// used both `id` and `_id` for the identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    /// ETH amount as sent by the server, e.g. `"0.05"`.
    #[serde(deserialize_with = "price_string")]
    pub price: String,
    #[serde(default)]
    pub creator_address: String,
    #[serde(default)]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub model_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub purchases: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Asset {
    /// Price as a float, when the server sent something numeric.
    pub fn price_eth(&self) -> Option<f64> {
        pricing::parse_price(&self.price)
    }

    /// Creator display name, falling back to the shortened address.
    pub fn creator_name(&self) -> String {
        self.creator
            .as_ref()
            .and_then(|c| c.username.clone())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| crate::wallet::short_address(&self.creator_address))
    }

    /// Format of the model file, read off its extension (`GLB`, `GLTF`, `OBJ`).
    pub fn model_format(&self) -> Option<&'static str> {
        let path = self.model_url.as_deref()?;
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let (_, ext) = path.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "glb" => Some("GLB"),
            "gltf" => Some("GLTF"),
            "obj" => Some("OBJ"),
            _ => None,
        }
    }

    /// Single uppercase initial for the avatar bubble.
    pub fn creator_initial(&self) -> char {
        self.creator
            .as_ref()
            .and_then(|c| c.username.as_deref())
            .and_then(|u| u.chars().next())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('C')
    }
}

/// Prices arrive as strings or bare JSON numbers.
fn price_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected price string or number, got {}",
            other
        ))),
    }
}

// =============================================================================
// Purchases
// =============================================================================

/// Body of `POST /purchases`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub object_id: String,
    pub buyer_address: String,
    pub tx_hash: String,
}

/// A purchase recorded by this client.
#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseRecord {
    pub asset_id: String,
    pub buyer_address: String,
    /// Placeholder hash, not a real transaction.
    pub tx_hash: String,
    /// Sent as `Idempotency-Key`.
    pub idempotency_key: String,
}
