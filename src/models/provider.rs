/// The add-on provider identity that passed basic authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedProvider {
    pub provider_id: String,
}

impl AuthenticatedProvider {
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
        }
    }
}
