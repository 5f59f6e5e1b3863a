pub mod addon;
pub mod application;
pub mod provider;
pub mod token;

pub use addon::{ProvisionRequest, ProvisionResponse};
pub use application::{LinkState, LinkedApplication};
pub use provider::AuthenticatedProvider;
pub use token::{TokenForm, TokenRequest, VerifiedToken};
