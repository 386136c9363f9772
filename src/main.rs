use std::sync::Arc;

use jserve::config::{AppState, Config};
use jserve::store::{DocumentStore, EmbeddedBundle, DOCUMENTS};
use jserve::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    // The table must be complete before the listener binds; a directory
    // failure here is fatal and the process exits non-zero.
    let bundle = EmbeddedBundle::new(&DOCUMENTS);
    let store = DocumentStore::load(&bundle).map_err(|e| {
        logger::log_error(&format!("Failed to load JSON documents: {e}"));
        e
    })?;
    logger::log_documents_loaded(&store.paths());

    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &cfg, store.len());

    let state = Arc::new(AppState::new(cfg, store));
    server::run(listener, state).await
}
