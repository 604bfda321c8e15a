//! # Domain Types
//!
//! Core domain types for the Folio catalog and fulfillment engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  Publication    │   │     Price       │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, isbn       │──►│  amount (Money) │   │  token          │       │
//! │  │  title, author  │   │  currency       │   │  customer       │       │
//! │  │  subject_codes  │   │  role           │   │  order_id       │       │
//! │  │  remote_product │   │  migrated       │   │  downloaded     │       │
//! │  └────────┬────────┘   └─────────────────┘   └─────────────────┘       │
//! │           │                                                             │
//! │           │ references        shared reference data                     │
//! │           ▼                                                             │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   Publisher     │   │    Category     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id, name       │   │  code           │                             │
//! │  │  tag_id         │   │  category_id    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! A `Publication` exclusively owns its `Price` and `Media`. `Publisher`
//! and `Category` are shared reference data looked up by id and subject
//! code. `Sale` is an independent append-mostly record keyed by token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Price role code meaning the listed price was set without manual review.
///
/// The commerce listing for such a price is considered final as soon as it
/// is created; any other role requires a follow-up review pass before the
/// publication counts as fully updated.
pub const UNREVIEWED_PRICE_ROLE: i16 = 14;

// =============================================================================
// Price
// =============================================================================

/// The listed price of a publication, owned exclusively by it.
///
/// One `Price` represents one price *version*. Once `migrated` is true the
/// price has been reflected in a remote product creation and creation logic
/// must never run for it again; only updates are permitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in integer cents.
    pub amount: Money,

    /// ISO currency code of the listed amount ("USD", "BOB", ...).
    pub currency: String,

    /// Country the price applies to.
    pub country: String,

    /// Price type passed through to the rights service.
    pub price_type: String,

    /// Price role code; `None` or [`UNREVIEWED_PRICE_ROLE`] means the
    /// listing needs no manual follow-up review.
    pub role: Option<i16>,

    /// Whether this price has already been reflected in a remote product
    /// creation.
    pub migrated: bool,
}

impl Price {
    /// True when the listing created from this price is final without a
    /// manual review pass.
    pub fn is_unreviewed(&self) -> bool {
        self.role.map_or(true, |r| r == UNREVIEWED_PRICE_ROLE)
    }
}

// =============================================================================
// Media
// =============================================================================

/// Cover media owned by a publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// URL of the cover image.
    pub path: String,
}

// =============================================================================
// Publication
// =============================================================================

/// A sellable digital title in the internal catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    /// Internal identifier.
    pub id: String,

    /// ISBN - doubles as the SKU on the commerce platform.
    pub isbn: String,

    /// Display title.
    pub title: String,

    /// Author line, used as the short description remotely.
    pub author: String,

    /// Free-text description.
    pub description: String,

    /// Pipe-delimited subject classification codes ("FBA|FYB").
    pub subject_codes: String,

    /// Delivery format ("EPUB", "PDF", ...), sent to the rights service.
    pub format: String,

    /// Technical protection scheme ("ACS4", "WATERMARK", ...).
    pub protection: String,

    /// Remote product identifier; `None` until the first successful
    /// creation on the commerce platform.
    pub remote_product_id: Option<i64>,

    /// Whether the remote representation reflects the current local state.
    pub updated: bool,

    /// Exchange rate recorded when the price was migrated in a
    /// non-settlement currency.
    pub exchange_rate: Option<f64>,

    /// Owned price (current price version).
    pub price: Price,

    /// Owned cover media.
    pub media: Media,

    /// Reference to the owning publisher.
    pub publisher_id: String,
}

impl Publication {
    /// Splits the pipe-delimited subject codes, dropping empty segments
    /// and duplicates while preserving first-seen order.
    pub fn subject_code_list(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::new();
        for code in self.subject_codes.split('|') {
            let code = code.trim();
            if !code.is_empty() && !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
    }
}

// =============================================================================
// Publisher
// =============================================================================

/// Shared publisher reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publisher {
    /// Internal identifier.
    pub id: String,

    /// Publisher name, used as the remote tag name.
    pub name: String,

    /// Remote tag identifier; `None` until the first tag creation.
    /// Immutable once set - reused by every publication of this publisher.
    pub tag_id: Option<i64>,
}

// =============================================================================
// Category
// =============================================================================

/// One remote category per distinct subject classification code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Subject classification code (primary key).
    pub code: String,

    /// Human-readable description, used as the remote category name.
    pub description: String,

    /// Remote category identifier; `None` until created.
    pub category_id: Option<i64>,
}

// =============================================================================
// Sale
// =============================================================================

/// A completed purchase, created exactly once per successful sale
/// registration.
///
/// ## Lifecycle
/// ```text
/// registerSale (rights 201) ──► Sale { downloaded: false }
///                                     │
/// download URL issued (rights 200) ──► downloaded: true   (exactly once)
/// ```
/// Sales are never deleted by this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    /// Unique sale token: epoch-millis prefix + random UUID.
    pub token: String,

    /// Buyer identity.
    pub customer: String,

    /// Order identifier from the storefront.
    pub order_id: String,

    /// SKU (the publication's ISBN).
    pub sku: String,

    /// Delivery format sold.
    pub format: String,

    /// Currency of the recorded price.
    pub currency: String,

    /// Listed price at sale time.
    pub price: Money,

    /// Always 1 for digital publications.
    pub quantity: i16,

    /// Whether the one-time download URL has been issued.
    pub downloaded: bool,

    /// Creation timestamp - the download validity window counts from here.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn price(role: Option<i16>) -> Price {
        Price {
            amount: Money::from_cents(10000),
            currency: "USD".to_string(),
            country: "BO".to_string(),
            price_type: "02".to_string(),
            role,
            migrated: false,
        }
    }

    #[test]
    fn test_unreviewed_price_role() {
        assert!(price(None).is_unreviewed());
        assert!(price(Some(UNREVIEWED_PRICE_ROLE)).is_unreviewed());
        assert!(!price(Some(1)).is_unreviewed());
    }

    #[test]
    fn test_subject_code_list_splits_and_dedupes() {
        let publication = Publication {
            id: "pub-1".to_string(),
            isbn: "9780000000001".to_string(),
            title: "Title".to_string(),
            author: "Author".to_string(),
            description: String::new(),
            subject_codes: "FBA|FYB||FBA| FJH ".to_string(),
            format: "EPUB".to_string(),
            protection: "ACS4".to_string(),
            remote_product_id: None,
            updated: false,
            exchange_rate: None,
            price: price(None),
            media: Media {
                path: "https://covers.example/1.jpg".to_string(),
            },
            publisher_id: "publisher-1".to_string(),
        };

        assert_eq!(publication.subject_code_list(), vec!["FBA", "FYB", "FJH"]);
    }

    #[test]
    fn test_subject_code_list_empty() {
        let mut publication = Publication {
            id: "pub-1".to_string(),
            isbn: "9780000000001".to_string(),
            title: "Title".to_string(),
            author: "Author".to_string(),
            description: String::new(),
            subject_codes: String::new(),
            format: "EPUB".to_string(),
            protection: "ACS4".to_string(),
            remote_product_id: None,
            updated: false,
            exchange_rate: None,
            price: price(None),
            media: Media { path: String::new() },
            publisher_id: "publisher-1".to_string(),
        };

        assert!(publication.subject_code_list().is_empty());

        publication.subject_codes = "|||".to_string();
        assert!(publication.subject_code_list().is_empty());
    }
}
