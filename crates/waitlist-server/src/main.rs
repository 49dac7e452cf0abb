//! Waitlist service - Entry point.

use mailer_client::MailerClient;
use signup_store::Store;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use waitlist_server::{
    api::{create_router_with_rate_limit, AppState, RateLimitState},
    config::Config,
    notify::Notifier,
};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting waitlist service");

    // Initialize storage
    let store = Store::new(config.store.persist, config.store.path.clone());

    // Load existing waitlist
    let waitlist = match store.load().await {
        Ok(w) => {
            info!("Loaded waitlist with {} signups", w.count());
            w
        }
        Err(e) => {
            error!("Failed to load waitlist: {}", e);
            info!("Starting with empty waitlist");
            signup_store::Waitlist::new()
        }
    };

    // Initialize mail relay client
    let mailer = match MailerClient::new(&config.mail.relay_url, config.mail.timeout) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create mail relay client: {}", e);
            std::process::exit(1);
        }
    };

    if config.mail.recipients.is_empty() {
        info!("No notification recipients configured, lead notification disabled");
    }

    let notifier = Notifier::new(Arc::new(mailer.clone()), config.mail.clone());

    // Create application state
    let state = AppState::new(waitlist, store, mailer, notifier);

    // Create rate limiter from config
    let rate_limit = RateLimitState::new(config.rate_limit.submissions_per_hour);

    // Create router with rate limiting
    let app = create_router_with_rate_limit(state, rate_limit);

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server; peer addresses feed the per-IP rate limiter
    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
