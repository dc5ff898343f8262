pub mod types;
pub mod views;

pub use types::{
    CreateOfferCommand, CreateOfferInput, DetailPatchSpec, DetailSpec, OfferDetailInput,
    OfferDetailPatch, OfferPatch, OfferPatchCommand,
};
pub use views::{offer_view, OfferDetailView, OfferView, OfferViewKind};
