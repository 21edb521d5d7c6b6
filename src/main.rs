mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::rate_limit::RateLimiter;
use crate::core::{database, middleware};
use crate::features::auth::{routes as auth_routes, AuthService, PgUserRepository};
use crate::features::locations::{routes as locations_routes, LocationCatalog};
use crate::features::map::{routes as map_routes, MapSessionService};
use crate::features::routing::{routes as routing_routes, OrsClient, RoutePlanner};
use crate::features::users::{routes as users_routes, PgProfileRepository, UserProfileService};
use axum::{middleware::from_fn, Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
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
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Initialize account and profile services
    let auth_service = Arc::new(AuthService::new(Arc::new(PgUserRepository::new(
        pool.clone(),
    ))));
    let user_profile_service = Arc::new(UserProfileService::new(Arc::new(
        PgProfileRepository::new(pool.clone()),
    )));
    tracing::info!("Auth and user profile services initialized");

    // Load the bundled campus locations
    let catalog = Arc::new(
        LocationCatalog::bundled()
            .map_err(|e| anyhow::anyhow!("Failed to load campus locations: {}", e))?,
    );
    tracing::info!("Location catalog loaded with {} locations", catalog.len());

    // Initialize routing (OpenRouteService) and map sessions
    let ors_client = Arc::new(
        OrsClient::new(&config.routing)
            .map_err(|e| anyhow::anyhow!("Failed to create directions client: {}", e))?,
    );
    let route_planner = Arc::new(RoutePlanner::new(Arc::clone(&catalog), ors_client));
    let map_session_service = Arc::new(MapSessionService::new(
        Arc::clone(&route_planner),
        config.routing.debounce,
        config.map_session.clone(),
    ));
    tracing::info!(
        "Route planner initialized (directions API: {}, debounce: {:?})",
        config.routing.base_url,
        config.routing.debounce
    );

    // Spawn idle map session sweeper
    let sweeper = Arc::clone(&map_session_service);
    tokio::spawn(async move {
        sweeper.run_idle_sweeper().await;
    });
    tracing::info!("Map session sweeper spawned");

    let rate_limiter = Arc::new(RateLimiter::new(&config.rate_limit));
    tracing::info!(
        "API rate limit: {} requests per {:?} (trust proxy: {})",
        config.rate_limit.max_requests,
        config.rate_limit.window,
        config.rate_limit.trust_proxy
    );

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

    // API routes, rate limited per client address
    let api_routes = Router::new()
        .merge(auth_routes::routes(auth_service))
        .merge(users_routes::routes(user_profile_service))
        .merge(locations_routes::routes(Arc::clone(&catalog)))
        .merge(routing_routes::routes(route_planner))
        .merge(map_routes::routes(map_session_service))
        .route_layer(axum::middleware::from_fn_with_state(
            rate_limiter,
            middleware::rate_limit_middleware,
        ));

    // Simple health check endpoint (not rate limited)
    async fn health_check() -> Json<serde_json::Value> {
        Json(serde_json::json!({ "status": "OK" }))
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(api_routes)
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
    let socket_addr: SocketAddr = addr
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

    // Peer addresses feed the rate limiter when no X-Forwarded-For is present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
