use anyhow::Result;
use rusty_pricelist::{ServerConfig, run_server};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = ServerConfig::from_env()?;
    run_server(config).await
}
