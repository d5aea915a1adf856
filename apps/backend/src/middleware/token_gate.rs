//! Session token gate.
//!
//! Wrap any scope or resource that requires a logged-in user. The gate finds
//! the token (cookie first, then bearer header), verifies it and stores the
//! recovered identity as [`Authenticated<I>`] in request extensions. Requests
//! without a valid token are answered with `401 Not authenticated` and never
//! reach the inner service.

use std::future::{ready, Ready};
use std::marker::PhantomData;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage, HttpRequest, ResponseError};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;

use crate::auth::errors::AuthFailure;
use crate::auth::identity::UserIdentity;
use crate::auth::transport;
use crate::error::AppError;
use crate::extractors::current_user::Authenticated;
use crate::logging::security;
use crate::state::app_state::AppState;

/// Recover the identity carried by the request's session token.
pub fn verify_request<I: DeserializeOwned>(
    state: &AppState,
    req: &HttpRequest,
) -> Result<I, AuthFailure> {
    let token = transport::extract_token(req, state.cookie_name()).ok_or(AuthFailure::Missing)?;
    state.tokens.verify(&token)
}

pub struct TokenGate<I = UserIdentity> {
    _identity: PhantomData<fn() -> I>,
}

impl<I> TokenGate<I> {
    pub fn new() -> Self {
        Self {
            _identity: PhantomData,
        }
    }
}

impl<I> Default for TokenGate<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B, I> Transform<S, ServiceRequest> for TokenGate<I>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
    I: DeserializeOwned + Clone + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenGateMiddleware<S, I>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenGateMiddleware {
            service,
            _identity: PhantomData,
        }))
    }
}

pub struct TokenGateMiddleware<S, I> {
    service: S,
    _identity: PhantomData<fn() -> I>,
}

impl<S, B, I> Service<ServiceRequest> for TokenGateMiddleware<S, I>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
    I: DeserializeOwned + Clone + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return Box::pin(async move {
                Ok(reject(req, AppError::internal("AppState not available")))
            });
        };

        match verify_request::<I>(&state, req.request()) {
            Ok(identity) => {
                req.extensions_mut().insert(Authenticated(identity));

                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            // Rendered inside the future so the response carries the request's trace id
            Err(failure) => Box::pin(async move {
                security::auth_rejected(&failure, req.path());
                Ok(reject(req, failure.into()))
            }),
        }
    }
}

fn reject<B>(req: ServiceRequest, error: AppError) -> ServiceResponse<EitherBody<B>> {
    let res = error.error_response();
    req.into_response(res).map_into_right_body()
}
