use std::sync::Arc;

use ip_telegram_relay::{
    build_app, config::Config, logging, telegram_client::TelegramNotifier, AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;

    let notifier = Arc::new(TelegramNotifier::new(&config.telegram)?);
    let bind_socket = config.bind_socket()?;
    let state = AppState::new(notifier);
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        chat_id = %config.telegram.chat_id,
        bot_token = %config.telegram.masked_token(),
        "IP Telegram backend listening"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
