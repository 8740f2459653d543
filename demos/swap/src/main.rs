// demos/swap/src/main.rs

use anyhow::Result;
use common::{load_config, run};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load .env (RPC_URL, KEYPAIR_PATH or SECRET_KEY)
    let cfg = load_config();

    // fee -> quote -> build -> sign & send
    let signatures = run(&cfg).await?;
    info!("Swap finished, {} transaction(s) sent", signatures.len());

    Ok(())
}
