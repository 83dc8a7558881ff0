mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::asistencias::handlers::{AdminState, AsistenciasState};
use crate::features::asistencias::{
    routes as asistencias_routes, AsistenciaService, ExportService, FeedService,
};
use crate::features::qr::{routes as qr_routes, QrService};
use crate::features::ubicacion::{routes as ubicacion_routes, GeocodingService};
use crate::shared::constants::EVENT_BUFFER;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Insert events fan out to the feed and to every SSE subscriber
    let (eventos, _) = broadcast::channel(EVENT_BUFFER);

    // Initialize Asistencia Service
    let asistencia_service = Arc::new(AsistenciaService::new(pool.clone(), eventos.clone()));
    tracing::info!("Asistencia service initialized");

    // Initialize the live feed: one full read now, push events from here on
    let feed_service = Arc::new(FeedService::new(pool.clone()));
    let cargadas = feed_service.cargar().await?;
    let _feed_listener = feed_service.escuchar(eventos.subscribe());
    tracing::info!("Feed service initialized ({} registros)", cargadas);

    // Initialize Geocoding Service
    let geocoding_service = Arc::new(GeocodingService::new(&config.geocoding));
    tracing::info!("Geocoding service initialized ({})", config.geocoding.base_url);

    // Initialize QR Service (scan URL is fixed for the process lifetime)
    let qr_service = Arc::new(
        QrService::new(&config.app.public_base_url)
            .map_err(|e| anyhow::anyhow!("Failed to initialize QR service: {}", e))?,
    );
    tracing::info!("QR service initialized ({})", qr_service.scan_url());

    // Initialize Export Service
    let export_service = Arc::new(ExportService::new());
    tracing::info!("Export service initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Admin routes (bulk delete, export), basic-auth guarded when configured
    let admin_state = AdminState {
        service: Arc::clone(&asistencia_service),
        feed: Arc::clone(&feed_service),
        export: Arc::clone(&export_service),
    };
    let admin_routes = if let Some(credentials) = config.admin.credentials() {
        tracing::info!("Admin routes basic auth enabled");
        asistencias_routes::admin_routes(admin_state).layer(from_fn(
            middleware::basic_auth_middleware(Arc::new(credentials)),
        ))
    } else {
        tracing::warn!("Admin routes are open (no ADMIN_USERNAME/ADMIN_PASSWORD configured)");
        asistencias_routes::admin_routes(admin_state)
    };

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let asistencias_state = AsistenciasState {
        service: Arc::clone(&asistencia_service),
        feed: Arc::clone(&feed_service),
        eventos: eventos.clone(),
    };
    let public_routes = Router::new()
        .merge(asistencias_routes::routes(asistencias_state))
        .merge(ubicacion_routes::routes(geocoding_service))
        .merge(qr_routes::routes(qr_service));

    let app = Router::new()
        .merge(swagger)
        .merge(public_routes)
        .nest("/api/admin", admin_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
