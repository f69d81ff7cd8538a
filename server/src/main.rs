// Bill splitter server entry point
use engine::config::EngineSettings;
use engine::data::BillStore;
use server::services::bill_service::BillSplitterService;
use server::services::BillSplitterServer;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::transport::Server;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = EngineSettings::load()?;

    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();

    info!("Starting Bill Splitter server...");
    let addr = settings.listen_addr().parse()?;
    info!(%addr, "Server will listen");

    let store = Arc::new(RwLock::new(BillStore::new(settings.limits.clone())));
    let service = BillSplitterService::new(store, settings.limits.clone());

    Server::builder()
        .add_service(BillSplitterServer::new(service))
        .serve(addr)
        .await?;

    Ok(())
}
