use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::credentials::CredentialError;
use crate::auth::identity::UserIdentity;
use crate::auth::transport;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::auth_token::AuthToken;
use crate::extractors::current_user::CurrentUser;
use crate::logging::security;
use crate::middleware::token_gate::TokenGate;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserIdentity,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Check credentials, then hand the client a session cookie.
async fn login(
    body: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { username, password } = body.into_inner();

    if username.is_empty() || password.is_empty() {
        security::login_failed("missing_credentials", Some(&username));
        return Err(AppError::unauthorized());
    }

    let user = match app_state.credentials.authenticate(&username, &password).await {
        Ok(user) => user,
        Err(e) => {
            let reason = match &e {
                CredentialError::InvalidCredentials => "invalid_credentials",
                CredentialError::Hashing(_) => "hashing_error",
            };
            security::login_failed(reason, Some(&username));
            return Err(e.into());
        }
    };

    let ttl = app_state.tokens.ttl();
    let token = app_state.tokens.issue(&user)?;
    security::session_issued(&user.username, ttl.as_secs());

    let mut res = HttpResponse::Ok();
    transport::attach_token(&mut res, app_state.cookie_name(), &token, ttl);
    Ok(res.json(LoginResponse { user }))
}

/// Tell the client to drop its session cookie. No token required.
async fn logout(token: Option<AuthToken>, app_state: web::Data<AppState>) -> HttpResponse {
    security::logout(token.is_some());

    let mut res = HttpResponse::Ok();
    transport::clear_token(&mut res, app_state.cookie_name());
    res.json(LogoutResponse { success: true })
}

async fn current(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(user.into_inner())
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid JSON body: {err}")).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .service(
            web::resource("/current")
                .wrap(TokenGate::<UserIdentity>::new())
                .route(web::get().to(current)),
        );
}
