pub mod data;
pub mod models;

pub use data::{AuthResponse, LoginInput, ProfileData, ProfilePatch, RegistrationInput};
pub use models::profile::Profile;
pub use models::user::User;
