pub mod types;

pub use types::{AuthResponse, LoginInput, ProfileData, ProfilePatch, RegistrationInput};
