//! Campus Connect Server — campus management REST API
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use campus_core::config::AppConfig;
use campus_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("CAMPUS_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Campus Connect v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = campus_database::connection::DatabasePool::connect(&config.database).await?;
    campus_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(campus_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let course_repo = Arc::new(
        campus_database::repositories::course::CourseRepository::new(db_pool.clone()),
    );
    let attendance_repo = Arc::new(
        campus_database::repositories::attendance::AttendanceRepository::new(db_pool.clone()),
    );
    let enrollment_repo = Arc::new(
        campus_database::repositories::enrollment::EnrollmentRepository::new(db_pool.clone()),
    );
    let community_repo = Arc::new(
        campus_database::repositories::community::CommunityRepository::new(db_pool.clone()),
    );
    let event_repo = Arc::new(campus_database::repositories::event::EventRepository::new(
        db_pool.clone(),
    ));

    // ── Services ─────────────────────────────────────────────────
    let auth_service = Arc::new(campus_auth::AuthService::new(
        Arc::clone(&user_repo),
        &config.auth,
    ));
    let user_service = Arc::new(campus_service::user::UserService::new(
        Arc::clone(&user_repo),
        campus_auth::password::PasswordHasher::new(),
        campus_auth::password::PasswordValidator::new(&config.auth),
    ));
    let course_service = Arc::new(campus_service::course::CourseService::new(Arc::clone(
        &course_repo,
    )));
    let attendance_service = Arc::new(campus_service::attendance::AttendanceService::new(
        Arc::clone(&attendance_repo),
    ));
    let performance_service = Arc::new(campus_service::performance::PerformanceService::new(
        Arc::clone(&enrollment_repo),
    ));
    let community_service = Arc::new(campus_service::community::CommunityService::new(
        Arc::clone(&community_repo),
    ));
    let event_service = Arc::new(campus_service::event::EventService::new(Arc::clone(
        &event_repo,
    )));

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = campus_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool,
        auth_service,
        user_service,
        course_service,
        attendance_service,
        performance_service,
        community_service,
        event_service,
    };

    let app = campus_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Campus Connect server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Campus Connect server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
