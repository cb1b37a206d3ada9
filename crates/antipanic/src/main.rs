use std::sync::Arc;

use antipanic_core::{config::Config, view::ViewController};
use antipanic_http::HttpApiClient;

#[tokio::main]
async fn main() -> Result<(), antipanic_core::Error> {
    antipanic_core::logging::init("antipanic")?;

    let cfg = Config::load()?;
    let host = antipanic_terminal::host_from_env();
    let api = Arc::new(HttpApiClient::new(&cfg, host.clone()));

    let mut controller = ViewController::new(host, api);

    antipanic_terminal::router::run_stdio(&mut controller)
        .await
        .map_err(|e| antipanic_core::Error::External(format!("terminal loop failed: {e}")))?;

    Ok(())
}
