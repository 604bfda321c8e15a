//! # Sale Token Generation
//!
//! Sale tokens are opaque, time-bound credentials identifying one
//! completed purchase. A token is the current epoch millisecond joined to
//! a random UUID:
//!
//! ```text
//! 1714477923451-6f9619ff-8b86-4d01-b42d-00cf4fc964ff
//! └─ created     └─ random component (collision resistance)
//! ```
//!
//! Uniqueness is probabilistic, carried by the random component - two
//! sales registered within the same millisecond still receive distinct
//! tokens. Callers must treat collisions as possible (the sales table
//! enforces token uniqueness).

use uuid::Uuid;

/// Generates a new sale token.
pub fn sale_token() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{}-{}", millis, Uuid::new_v4())
}
