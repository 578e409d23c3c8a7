//! TrackPro attendance server - main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use trackpro_lib::api::{self, ApiDoc};
use trackpro_lib::auth::{AdminKey, SessionVerifier};
use trackpro_lib::config::{ADMIN_KEY_HEADER, Config};
use trackpro_lib::db::DbPool;
use trackpro_lib::middleware::RequestLogger;
use trackpro_lib::services::attendance::AttendanceStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(1);
    }

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL, TRACKPRO_ADMIN_KEY and TRACKPRO_JWT_SECRET must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  TrackPro Attendance Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
        info!("Using development defaults for DATABASE_URL, admin key and session secret");
    }

    let pool = match DbPool::new(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };
    info!("Database connection established");

    if let Err(e) = pool.run_migrations().await {
        error!("Failed to run migrations: {}", e);
        std::process::exit(1);
    }
    info!("Database migrations complete");

    // Prepare shared state
    let bind_address = config.bind_address();
    let admin_key = AdminKey::new(config.admin_key.clone());
    let verifier = SessionVerifier::new(&config.session);
    let attendance_settings = web::Data::new(config.attendance.clone());
    let store: web::Data<dyn AttendanceStore> =
        web::Data::from(Arc::new(pool.clone()) as Arc<dyn AttendanceStore>);
    let is_development = config.is_development();

    info!(
        default_leave_type = %config.attendance.default_leave_type,
        "Auto-detected leave will use the configured default leave type"
    );

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!("Starting server at http://{} ({} workers)", bind_address, cpus);
        cpus
    };

    let admin_key_header: header::HeaderName = match ADMIN_KEY_HEADER.parse() {
        Ok(name) => name,
        Err(e) => {
            error!("Invalid admin key header name: {}", e);
            std::process::exit(1);
        }
    };

    let server = HttpServer::new(move || {
        let cors = if is_development {
            Cors::default()
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
        } else {
            Cors::default()
        }
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            admin_key_header.clone(),
        ])
        .max_age(3600);

        App::new()
            // CORS must wrap before other middleware
            .wrap(cors)
            .wrap(RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .app_data(store.clone())
            .app_data(attendance_settings.clone())
            .app_data(web::Data::new(admin_key.clone()))
            .app_data(web::Data::new(verifier.clone()))
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_attendance_routes)
                    .configure(api::configure_leave_routes),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    });

    server.workers(worker_count).bind(&bind_address)?.run().await
}
