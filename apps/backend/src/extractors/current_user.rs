use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::de::DeserializeOwned;

use crate::auth::identity::UserIdentity;
use crate::error::AppError;
use crate::logging::security;
use crate::middleware::token_gate::verify_request;
use crate::state::app_state::AppState;

/// Identity recovered from a verified session token.
///
/// Behind [`TokenGate`](crate::middleware::token_gate::TokenGate) this is
/// read from request extensions. Without the gate the extractor finds and
/// verifies the token itself, with the same 401 on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated<I>(pub I);

/// The identity issued by the login endpoint.
pub type CurrentUser = Authenticated<UserIdentity>;

impl<I> Authenticated<I> {
    pub fn into_inner(self) -> I {
        self.0
    }
}

impl<I> Deref for Authenticated<I> {
    type Target = I;

    fn deref(&self) -> &I {
        &self.0
    }
}

impl<I> FromRequest for Authenticated<I>
where
    I: DeserializeOwned + Clone + 'static,
{
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if let Some(found) = req.extensions().get::<Authenticated<I>>() {
            return ready(Ok(found.clone()));
        }

        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(AppError::internal("AppState not available")));
        };

        let result = verify_request::<I>(state, req).map(Authenticated).map_err(|failure| {
            security::auth_rejected(&failure, req.path());
            AppError::from(failure)
        });
        ready(result)
    }
}
