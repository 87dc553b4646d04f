use std::process::ExitCode;
use std::sync::Arc;

use storefront::{Config, Server, api, store::Store};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "storefront failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), storefront::Error> {
    let config = Config::from_env()?;
    let app = api::router(Arc::new(Store::new()));
    Server::bind(config.addr).await?.serve(app).await
}

/// `RUST_LOG` controls verbosity; defaults to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
