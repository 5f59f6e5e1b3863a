pub mod credentials;
pub mod token_verifier;

pub use credentials::{CredentialError, CredentialStore};
pub use token_verifier::TokenVerifier;
