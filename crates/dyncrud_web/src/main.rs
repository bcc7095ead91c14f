//! Server entry point: load settings, start logging, open the store, serve.

use anyhow::{anyhow, Context as _};
use dyncrud_core::{core_version, init_logging};
use dyncrud_web::{router, CustomerStore, Settings};
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;

    let working_dir = std::env::current_dir().context("failed to read working directory")?;
    init_logging(&settings.logging.resolve(&working_dir)).map_err(|err| anyhow!(err))?;

    let store = CustomerStore::open_file(settings.database.path.clone()).with_context(|| {
        format!(
            "failed to open customer store at `{}`",
            settings.database.path.display()
        )
    })?;

    let addr = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind `{addr}`"))?;
    info!(
        "event=server_start module=web status=ok addr={} db={} version={}",
        addr,
        settings.database.path.display(),
        core_version()
    );

    axum::serve(listener, router(store).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated")?;

    info!("event=server_stop module=web status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=signal_listen module=web status=error error={err}");
        std::future::pending::<()>().await;
    }
}
