use constant_time_eq::constant_time_eq;
use sha1::{Digest, Sha1};
use tracing::{debug, warn};

use crate::models::{TokenRequest, VerifiedToken};

/// Checks dashboard requests signed by the marketplace with the manifest salt.
///
/// The marketplace sends `id`, `timestamp` and `token`, where
/// `token = hex(sha1(id + ":" + salt + ":" + timestamp))`.
#[derive(Clone)]
pub struct TokenVerifier {
    salt: String,
}

impl TokenVerifier {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// The lower-case hex token the marketplace computes for `id` and `timestamp`.
    pub fn expected_token(&self, id: &str, timestamp: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(id.as_bytes());
        hasher.update(b":");
        hasher.update(self.salt.as_bytes());
        hasher.update(b":");
        hasher.update(timestamp.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Returns the verified identity when the token matches.
    pub fn verify(&self, request: TokenRequest) -> Option<VerifiedToken> {
        let expected = self.expected_token(&request.id, &request.timestamp);
        if constant_time_eq(expected.as_bytes(), request.token.as_bytes()) {
            debug!(id = %request.id, "dashboard token accepted");
            Some(request.into())
        } else {
            warn!(id = %request.id, timestamp = %request.timestamp, "dashboard token rejected");
            None
        }
    }
}
