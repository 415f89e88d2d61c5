use std::sync::Arc;

use tracing::error;

use fixbot_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), fixbot_core::Error> {
    fixbot_core::logging::init("fixbot")?;

    let cfg = Arc::new(Config::load()?);

    let port = cfg.port;
    tokio::spawn(async move {
        if let Err(e) = fixbot_telegram::health::serve(port).await {
            error!(port, error = %e, "health endpoint stopped");
        }
    });

    fixbot_telegram::router::run_polling(cfg)
        .await
        .map_err(|e| fixbot_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
