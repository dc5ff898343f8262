pub mod offer;
pub mod offer_detail;

pub use offer::{Offer, OfferAggregate};
pub use offer_detail::{OfferDetail, OfferType};
