//! Record kinds and typed record values
//!
//! The five record kinds mirror the collections of the storefront data
//! layer. `User`, `Product`, and `Order` are stored top-level; `CartItem`
//! and `CustomerInfo` only ever appear embedded inside an `Order`.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// One of the five record kinds known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    User,
    Product,
    CartItem,
    CustomerInfo,
    Order,
}

impl RecordKind {
    /// All record kinds, in registry order
    pub const ALL: [RecordKind; 5] = [
        RecordKind::User,
        RecordKind::Product,
        RecordKind::CartItem,
        RecordKind::CustomerInfo,
        RecordKind::Order,
    ];

    /// The canonical PascalCase name of this kind
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::User => "User",
            RecordKind::Product => "Product",
            RecordKind::CartItem => "CartItem",
            RecordKind::CustomerInfo => "CustomerInfo",
            RecordKind::Order => "Order",
        }
    }

    /// The storage collection backing this kind, if any.
    ///
    /// The mapping is explicit rather than derived from the type name;
    /// embedded kinds have no collection of their own.
    pub fn collection(&self) -> Option<&'static str> {
        match self {
            RecordKind::User => Some("user"),
            RecordKind::Product => Some("product"),
            RecordKind::Order => Some("order"),
            RecordKind::CartItem | RecordKind::CustomerInfo => None,
        }
    }

    /// Whether this kind only appears nested inside another record
    pub fn is_embedded(&self) -> bool {
        self.collection().is_none()
    }

    /// Look up a kind by name, case-insensitively.
    ///
    /// Accepts the canonical name ("CartItem"), its snake_case form
    /// ("cart_item"), or a collection name ("order").
    pub fn from_name(name: &str) -> Option<RecordKind> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.name().to_ascii_lowercase() == normalized)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed record constructible through the registry.
///
/// Implemented by the five record structs; ties each struct to its
/// `RecordKind` so `SchemaRegistry::construct` can pick the right schema.
pub trait Record: Serialize + DeserializeOwned {
    const KIND: RecordKind;
}

/// A registered user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Age in years, 0 to 120 inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    pub is_active: bool,
}

impl Record for User {
    const KIND: RecordKind = RecordKind::User;
}

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in dollars, never negative
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    /// Primary image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Average rating, 0 to 5 inclusive
    pub rating: f64,
    /// Searchable tags
    pub tags: Vec<String>,
    pub trending: bool,
}

impl Record for Product {
    const KIND: RecordKind = RecordKind::Product;
}

/// A single line of an order's cart.
///
/// `title`, `price`, and `image` are denormalized copies of the product
/// at the time the item was added; `product_id` is not checked against
/// an existing product here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub title: String,
    pub price: f64,
    /// Quantity ordered, at least 1
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Record for CartItem {
    const KIND: RecordKind = RecordKind::CartItem;
}

/// Shipping and contact details for an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Record for CustomerInfo {
    const KIND: RecordKind = RecordKind::CustomerInfo;
}

/// A placed order.
///
/// `items` is expected to be non-empty by convention, but emptiness is
/// the caller's policy and is not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
    pub customer: CustomerInfo,
    pub status: String,
}

impl Record for Order {
    const KIND: RecordKind = RecordKind::Order;
}
