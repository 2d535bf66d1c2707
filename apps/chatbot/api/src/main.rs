use chatbot_api::bootstrap;
use chatbot_api::config::Environment;
use core_config::tracing::{init_tracing, install_color_eyre};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();
    init_tracing(&Environment::from_env());

    bootstrap::start()
        .await
        .inspect_err(|e| tracing::error!("Startup failed: {:?}", e))
}
