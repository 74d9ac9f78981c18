//! Access token middleware for protecting API endpoints.
//!
//! The access token is taken from an `Authorization: Bearer` header or,
//! failing that, from the access token cookie. A verified request carries
//! an [`AuthContext`] in its extensions; anything else is answered with the
//! failure kind's JSON error and never reaches the handler.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use ag_core::{
    domain::VerifiedIdentity,
    errors::{DomainError, TokenError},
    repositories::RevocationStore,
    services::TokenService,
};

use crate::handlers::error::{handle_domain_error, ApiError};

/// Identity of the caller, injected by [`AccessGuard`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub subject: String,
    pub session_id: String,
    pub token_id: String,
}

impl From<VerifiedIdentity> for AuthContext {
    fn from(identity: VerifiedIdentity) -> Self {
        Self {
            subject: identity.subject,
            session_id: identity.session_id,
            token_id: identity.token_id,
        }
    }
}

/// Object-safe view of the token service used by the middleware
#[async_trait]
pub trait AccessVerifier: Send + Sync {
    async fn verify_access(&self, token: &str) -> Result<VerifiedIdentity, DomainError>;
}

#[async_trait]
impl<S: RevocationStore + 'static> AccessVerifier for TokenService<S> {
    async fn verify_access(&self, token: &str) -> Result<VerifiedIdentity, DomainError> {
        TokenService::verify_access(self, token).await
    }
}

/// Access token middleware factory
#[derive(Clone)]
pub struct AccessGuard {
    verifier: Arc<dyn AccessVerifier>,
    cookie_name: Rc<str>,
}

impl AccessGuard {
    pub fn new(verifier: Arc<dyn AccessVerifier>, cookie_name: &str) -> Self {
        Self {
            verifier,
            cookie_name: Rc::from(cookie_name),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGuardMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
            cookie_name: Rc::clone(&self.cookie_name),
        }))
    }
}

pub struct AccessGuardMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn AccessVerifier>,
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for AccessGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);
        let token = extract_access_token(&req, &self.cookie_name);

        Box::pin(async move {
            let result = match token {
                Some(token) => verifier.verify_access(&token).await,
                None => Err(TokenError::Missing.into()),
            };

            match result {
                Ok(identity) => {
                    req.extensions_mut().insert(AuthContext::from(identity));
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Err(error) => {
                    let response = handle_domain_error(&error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Bearer header first, then the access cookie
fn extract_access_token(req: &ServiceRequest, cookie_name: &str) -> Option<String> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string());

    bearer
        .or_else(|| req.cookie(cookie_name).map(|c| c.value().trim().to_string()))
        .filter(|token| !token.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| Error::from(ApiError(TokenError::Missing.into())));

        ready(result)
    }
}
