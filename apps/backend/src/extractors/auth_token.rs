use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};

use crate::auth::transport;
use crate::state::app_state::AppState;
use crate::state::security_config::DEFAULT_COOKIE_NAME;
use crate::AppError;

/// Raw session token presented by the client, unverified.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let cookie_name = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.cookie_name().to_string())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        ready(
            transport::extract_token(req, &cookie_name)
                .map(|token| AuthToken { token })
                .ok_or_else(AppError::unauthorized),
        )
    }
}
