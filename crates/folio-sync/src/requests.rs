//! # Remote Request Payloads
//!
//! Wire payloads for the commerce storefront and the rights service.
//! Plain immutable structs constructed in one expression at the call
//! site. Field names follow the storefront's JSON contract; serde
//! renames cover the names that collide with Rust keywords.

use serde::Serialize;

use folio_core::Publication;

// =============================================================================
// Storefront Payloads
// =============================================================================

/// Reference to an already-created storefront entity (category, tag).
#[derive(Debug, Clone, Serialize)]
pub struct ItemRef {
    pub id: i64,
}

/// Product image by source URL.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRef {
    pub src: String,
}

/// Payload for creating a storefront product.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub regular_price: String,
    pub description: String,
    pub short_description: String,
    pub categories: Vec<ItemRef>,
    pub tags: Vec<ItemRef>,
    pub images: Vec<ImageRef>,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
}

/// Payload for updating an existing storefront product. Identification
/// fields (sku) and the cover image are set at creation and never
/// resent; only mutable presentation fields are.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub regular_price: String,
    pub description: String,
    pub short_description: String,
    pub categories: Vec<ItemRef>,
    pub tags: Vec<ItemRef>,
}

impl CreateProductRequest {
    /// Assemble a creation payload from a publication, its resolved
    /// category references, publisher tag and display price.
    pub fn from_publication(
        publication: &Publication,
        price: String,
        categories: Vec<ItemRef>,
        tags: Vec<ItemRef>,
    ) -> Self {
        CreateProductRequest {
            name: publication.title.clone(),
            sku: publication.isbn.clone(),
            product_type: "simple".to_string(),
            regular_price: price,
            description: publication.description.clone(),
            short_description: publication.author.clone(),
            categories,
            tags,
            images: media_images(publication),
            is_virtual: true,
        }
    }
}

impl UpdateProductRequest {
    /// Assemble an update payload from a publication, its resolved
    /// category references, publisher tag and display price.
    pub fn from_publication(
        publication: &Publication,
        price: String,
        categories: Vec<ItemRef>,
        tags: Vec<ItemRef>,
    ) -> Self {
        UpdateProductRequest {
            name: publication.title.clone(),
            regular_price: price,
            description: publication.description.clone(),
            short_description: publication.author.clone(),
            categories,
            tags,
        }
    }
}

fn media_images(publication: &Publication) -> Vec<ImageRef> {
    if publication.media.path.is_empty() {
        return vec![];
    }
    vec![ImageRef {
        src: publication.media.path.clone(),
    }]
}

/// Payload for creating a publisher tag.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTagRequest {
    pub name: String,
}

/// Payload for creating a subject category.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

// =============================================================================
// Rights Service Payloads
// =============================================================================

/// Query for a sale dry-run against the rights service.
#[derive(Debug, Clone, Serialize)]
pub struct SimulateSaleQuery {
    pub isbn: String,
    pub format: String,
    /// Listed amount in integer cents.
    pub cost: i64,
    pub protection: String,
    pub country: String,
    pub currency: String,
    pub price_type: String,
}

/// Payload registering a committed sale with the rights service.
///
/// `transaction_id` is the storefront order id, not the fulfillment
/// token - the token only exists once the rights holder accepts.
#[derive(Debug, Clone, Serialize)]
pub struct SaleRequest {
    /// Listed amount in integer cents.
    pub cost: i64,
    pub country: String,
    pub format: String,
    pub customer_id: String,
    pub price_type: String,
    pub protection: String,
    pub currency: String,
    pub sale_state: String,
    pub transaction_id: String,
}

/// Query exchanging a registered sale for a download location.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadQuery {
    pub customer: String,
    pub order_id: String,
    pub sku: String,
    pub format: String,
    pub username: String,
}

// =============================================================================
// Inbound Requests & Outcomes
// =============================================================================

/// An order as received from the storefront checkout.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Order {
    pub product_id: i64,
    pub order_id: String,
    pub username: String,
}

/// Result of a sale simulation, surfaced to the storefront.
#[derive(Debug, Clone, Serialize)]
pub struct SimulateOutcome {
    pub ok: bool,
    pub message: String,
    pub product_id: i64,
    /// Current listed price as a display string.
    pub price: String,
}
