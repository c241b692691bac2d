//! ASN Monitor — Entry Point

use anyhow::Context;
use tracing::info;

use asn_monitor::api::{self, ApiState};
use asn_monitor::{Config, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inisiasi logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    info!("Menjalankan ASN Monitor v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load();

    let db = Database::open(&config.database_path).with_context(|| {
        format!(
            "tidak dapat membuka basis data di {}",
            config.database_path.display()
        )
    })?;
    db.migrate()?;
    info!("Basis data: {}", config.database_path.display());

    let app = api::router(ApiState {
        db,
        batas_notif: config.batas_notif,
    });

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("tidak dapat bind ke {}", config.listen_addr))?;
    info!("Mendengarkan di http://{}", config.listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
