pub mod data;
pub mod models;

pub use data::types::{CreateReviewInput, ReviewData, ReviewFilter, ReviewPatch};
pub use models::review::Review;
