use std::sync::Arc;

use staticd::config::Config;
use staticd::pages::PageStore;
use staticd::router::ROUTED_PAGES;
use staticd::server::driver::Driver;
use staticd::server::listener::Listener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();

    let pages = Arc::new(PageStore::new(&cfg.pages_dir));
    // A missing page is a deployment defect, not a per-request condition.
    pages.preload(ROUTED_PAGES).await?;

    let listener = Listener::bind(&cfg.listen_addr, cfg.backlog)?;
    tracing::info!("Server running on {}", listener.local_addr()?);

    let driver = Driver::new(cfg.driver, cfg.workers, Arc::clone(&pages));

    tokio::select! {
        res = listener.run(driver) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
