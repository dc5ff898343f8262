pub mod data;
pub mod models;

// Re-export input/command types
pub use data::types::{
    CreateOfferCommand, CreateOfferInput, DetailPatchSpec, DetailSpec, OfferDetailInput,
    OfferDetailPatch, OfferPatch, OfferPatchCommand,
};

// Re-export view shaping
pub use data::views::{offer_view, OfferDetailView, OfferView, OfferViewKind};

// Re-export models
pub use models::offer::{Offer, OfferAggregate};
pub use models::offer_detail::{OfferDetail, OfferType};
