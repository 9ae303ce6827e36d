use std::sync::Arc;

use matrimony_profile::config::ServerConfig;
use matrimony_profile::profile::{ProfileRouteState, ProfileSession, profile_routes};
use matrimony_profile::store::{Database, LibSqlBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;
    let addr = config.listen_addr()?;

    eprintln!("Matrimony Profile v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", config.db_path.display());
    eprintln!("   Status API: http://{}/api/profile/status", addr);

    // ── Database ─────────────────────────────────────────────────────────
    let db: Arc<dyn Database> = Arc::new(LibSqlBackend::new_local(&config.db_path).await?);

    // ── Session ──────────────────────────────────────────────────────────
    let session = Arc::new(ProfileSession::new(db));
    match session.restore().await? {
        Some(snapshot) => eprintln!(
            "   Restored session: {} (next step {})",
            snapshot.status, snapshot.next_step
        ),
        None => eprintln!("   No active session"),
    }

    let app = profile_routes(ProfileRouteState { session });
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Profile server started");
    axum::serve(listener, app).await?;

    Ok(())
}
