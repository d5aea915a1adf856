use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use howler::config::server::ServerConfig;
use howler::infra::state::build_state;
use howler::middleware::request_trace::RequestTrace;
use howler::middleware::structured_logger::StructuredLogger;
use howler::middleware::trace_span::TraceSpan;
use howler::routes;
use howler::state::security_config::SecurityConfig;
use howler::JsonUserStore;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let server = ServerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("❌ {e}");
        std::process::exit(1);
    });

    let security_config = SecurityConfig::from_env().unwrap_or_else(|e| {
        eprintln!("❌ {e}");
        std::process::exit(1);
    });

    let users = JsonUserStore::load(&server.users_file).unwrap_or_else(|e| {
        eprintln!("❌ {e}");
        std::process::exit(1);
    });

    info!(
        users = users.len(),
        signer = ?security_config.signer,
        ttl_secs = security_config.token_ttl.as_secs(),
        "Session settings loaded"
    );

    let app_state = match build_state()
        .with_security(security_config)
        .with_credentials(Arc::new(users))
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting Howler Backend on http://{}:{}",
        server.host, server.port
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind(server.bind_addr())?
    .run()
    .await
}
