use countdown_board::api::{self, AppState};
use countdown_board::config::{database, settings};
use countdown_board::errors::Result;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();

    // 3. Settings: config.toml (optional) plus environment overrides
    let settings = settings::load_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    info!(timezone = %settings.site.timezone, "Settings loaded");

    // 4. Database
    database::ensure_parent_dir(&settings.database.url)?;
    let db = database::create_connection(&settings.database)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready"))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Serve
    let state = AppState::new(db, settings.site.timezone, settings.site.defaults());
    let listener = TcpListener::bind(&settings.server.bind_address)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", settings.server.bind_address, e))?;
    info!("Server running on {}", settings.server.bind_address);

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
