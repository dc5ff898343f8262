pub mod types;

pub use types::{CreateReviewInput, ReviewData, ReviewFilter, ReviewPatch};
