//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.
//!
//! # Example
//!
//! ```rust
//! use server_core::common::{OfferId, OrderId, UserId};
//!
//! // These are incompatible types - compiler prevents mixing them up
//! let user_id: UserId = UserId::new();
//! let offer_id: OfferId = OfferId::new();
//!
//! // This would be a compile error:
//! // let wrong: OfferId = user_id;
//! ```

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (principals).
pub struct User;

/// Marker type for Offer entities (service listings).
pub struct Offer;

/// Marker type for OfferDetail entities (pricing tiers).
pub struct OfferDetail;

/// Marker type for Order entities (purchased snapshots).
pub struct Order;

/// Marker type for Review entities.
pub struct Review;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Offer entities.
pub type OfferId = Id<Offer>;

/// Typed ID for OfferDetail entities.
pub type OfferDetailId = Id<OfferDetail>;

/// Typed ID for Order entities.
pub type OrderId = Id<Order>;

/// Typed ID for Review entities.
pub type ReviewId = Id<Review>;
