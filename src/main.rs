use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reportdesk::config::{Config, LogFormat};
use reportdesk::core::SystemClock;
use reportdesk::identity::MySqlIdentityProvider;
use reportdesk::middleware::{ErrorLogger, PrincipalAuth, RequestIdentifier};
use reportdesk::modules::{health, reports};
use reportdesk::reports::services::{
    AccessGate, DateRangePolicy, JsonRenderer, OverviewService, ReportDispatcher, ReportRegistry,
};
use reportdesk::reports::{MySqlReportRepository, ReportRepository, ReportsState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("reportdesk={},actix_web=info", config.app.log_level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting report service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    // Report catalogue; a kind without a handler stops startup here
    let repo: Arc<dyn ReportRepository> = Arc::new(MySqlReportRepository::new(
        db_pool.clone(),
        Duration::from_secs(config.reports.query_timeout_secs),
    ));
    let report_registry = ReportRegistry::standard(repo.clone(), config.reports.years_back)
        .context("Report registry is incomplete")?;
    let policy = DateRangePolicy::new(config.reports.closing_day)?;
    let clock = SystemClock::from_offset_hours(config.reports.utc_offset_hours)?;

    tracing::info!(
        reports = report_registry.len(),
        closing_day = policy.closing_day(),
        "Report registry initialized"
    );

    let state = web::Data::new(ReportsState {
        dispatcher: ReportDispatcher::new(
            Arc::new(report_registry),
            AccessGate::admin_only(),
            policy,
        ),
        overview: OverviewService::new(repo),
        renderer: Arc::new(JsonRenderer),
        clock: Arc::new(clock),
    });
    let identity = Arc::new(MySqlIdentityProvider::new(db_pool.clone()));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(PrincipalAuth::new(identity.clone()))
            .wrap(ErrorLogger)
            .wrap(RequestIdentifier)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(state.clone())
            .configure(health::configure)
            .configure(reports::controllers::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
