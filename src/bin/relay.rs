use anyhow::Context;
use log::{error, info};

use moodlens::relay::{self, RelayConfig, RelayState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("MoodLens relay v{} starting up...", env!("CARGO_PKG_VERSION"));

    let config = RelayConfig::from_env();
    info!(
        "Classifier: {} {} (timeout {:?})",
        config.classifier_cmd,
        config.classifier_args.join(" "),
        config.classify_timeout
    );

    std::fs::create_dir_all(&config.upload_dir).with_context(|| {
        format!(
            "failed to create upload directory {}",
            config.upload_dir.display()
        )
    })?;

    let addr = config.addr;
    let state = RelayState::new(config);

    tokio::select! {
        result = relay::serve(state, addr) => {
            if let Err(err) = &result {
                error!("Relay server failed: {err:#}");
            }
            result
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
            Ok(())
        }
    }
}
