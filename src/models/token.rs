use serde::Deserialize;

/// Dashboard form fields as submitted. Each one is optional so that a missing
/// field is answered with a 401 rather than an extractor error.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct TokenForm {
    pub id: Option<String>,
    pub token: Option<String>,
    pub timestamp: Option<String>,
}

impl TokenForm {
    /// Returns `None` unless all three fields are present.
    pub fn into_request(self) -> Option<TokenRequest> {
        Some(TokenRequest {
            id: self.id?,
            token: self.token?,
            timestamp: self.timestamp?,
        })
    }
}

/// A signed dashboard access request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub id: String,
    pub token: String,
    pub timestamp: String,
}

/// Proof that a dashboard request carried a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub id: String,
    pub timestamp: String,
}

impl From<TokenRequest> for VerifiedToken {
    fn from(request: TokenRequest) -> Self {
        Self {
            id: request.id,
            timestamp: request.timestamp,
        }
    }
}
