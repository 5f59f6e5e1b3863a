use axum::async_trait;
use axum::extract::{Form, FromRequest, FromRequestParts, Request};
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use http::request::Parts;
use tracing::{debug, error, warn};

use crate::models::{AuthenticatedProvider, TokenForm, VerifiedToken};
use crate::state::{DashboardState, ProvisioningState};

/// Challenge sent with a 401 from the provisioning endpoints.
pub const BASIC_CHALLENGE: &str = "Basic realm=\"Authentication Required\"";
/// Challenge sent with a 401 from the dashboard.
pub const BEARER_CHALLENGE: &str = "Bearer realm=\"Authentication Required\"";

/// A general purpose HTTP error rendered as a plain-text response.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
    challenge: Option<&'static str>,
}

impl HTTPError {
    /// Creates a new HTTP error; `challenge` becomes the `WWW-Authenticate` header.
    pub fn new(
        status: StatusCode,
        message: impl Into<String>,
        challenge: Option<&'static str>,
    ) -> Self {
        HTTPError {
            status,
            message: message.into(),
            challenge,
        }
    }

    pub fn unauthorized(challenge: &'static str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized Access", Some(challenge))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, None)
    }
}

impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.message).into_response();
        if let Some(challenge) = self.challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(challenge));
        }
        response
    }
}

/// Extractor for the dashboard: reads `id`, `token` and `timestamp` from the
/// query string (GET) or the urlencoded body (POST) and checks the token.
#[async_trait]
impl FromRequest<DashboardState> for VerifiedToken {
    type Rejection = HTTPError;

    async fn from_request(req: Request, state: &DashboardState) -> Result<Self, HTTPError> {
        let form = match Form::<TokenForm>::from_request(req, state).await {
            Ok(Form(form)) => form,
            Err(rejection) => {
                debug!("Unreadable dashboard form: {}", rejection);
                TokenForm::default()
            }
        };

        let Some(request) = form.into_request() else {
            warn!("Dashboard request is missing id, token or timestamp");
            return Err(HTTPError::unauthorized(BEARER_CHALLENGE));
        };

        state
            .verifier
            .verify(request)
            .ok_or_else(|| HTTPError::unauthorized(BEARER_CHALLENGE))
    }
}

/// Extractor for the provisioning endpoints: checks Basic credentials against
/// the credential store.
#[async_trait]
impl FromRequestParts<ProvisioningState> for AuthenticatedProvider {
    type Rejection = HTTPError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ProvisioningState,
    ) -> Result<Self, HTTPError> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        let credentials = match auth_header.split_once(' ') {
            Some((scheme, credentials)) if scheme.eq_ignore_ascii_case("basic") => {
                credentials.trim().to_string()
            }
            _ => {
                warn!("Missing or non-Basic Authorization header");
                return Err(HTTPError::unauthorized(BASIC_CHALLENGE));
            }
        };

        // Argon2 verification is CPU bound; keep it off the async workers.
        let store = state.credentials.clone();
        let outcome = tokio::task::spawn_blocking(move || store.authenticate(&credentials))
            .await
            .map_err(|e| {
                error!("Credential check did not complete: {}", e);
                HTTPError::internal("Internal error")
            })?;

        outcome.map_err(|reason| {
            warn!("Basic authentication failed: {}", reason);
            HTTPError::unauthorized(BASIC_CHALLENGE)
        })
    }
}
