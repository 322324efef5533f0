use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Single-threaded runtime: one accept loop, connections served as local tasks
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let listener = server::create_listener(config::listen_addr())?;
    let state = Arc::new(config::AppState::new(cfg));

    println!("Server running on {}", config::public_url());

    let local = tokio::task::LocalSet::new();
    local.run_until(server::serve(listener, state)).await?;
    Ok(())
}
