use anyhow::Context;
use order_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present; real environment variables take precedence
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config
        .ensure_work_dir_structure()
        .context("Failed to create work directory structure")?;
    init_logger(&config.log_level, Some(&config.log_dir()));

    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        "Order server starting..."
    );

    let state = ServerState::initialize(&config)
        .await
        .context("Failed to initialize server state")?;

    let server = Server::with_state(config, state);
    server.run().await.context("Server error")?;

    Ok(())
}
