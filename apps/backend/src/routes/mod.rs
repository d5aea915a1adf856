use actix_web::web;

pub mod health;
pub mod users;

/// Register every route. `main.rs` and the integration tests share this, so
/// the gate on `/api/users/current` is always in place.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Session routes: /api/users/**
    cfg.service(web::scope("/api/users").configure(users::configure_routes));
}
