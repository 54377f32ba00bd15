use anyhow::Result;
use matrix_terminal::config::{self, ProxyConfig};
use matrix_terminal::proxy;

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();
    matrix_terminal::init_tracing();

    let config = ProxyConfig::from_env()?;
    proxy::serve(&config).await
}
