mod model;
mod server;

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;

use crate::server::{
    bot::{self, handler::Handler},
    config::Config,
    data::{
        community::CommunityApiClient,
        discord::{SerenityGuildGateway, SerenityMessenger},
        ledger::RecipientLedger,
    },
    error::AppError,
    router,
    service::campaign::guard::CampaignGuard,
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_logging();

    let config = Arc::new(Config::from_env()?);

    let http_client = startup::setup_reqwest_client()?;
    let community = CommunityApiClient::new(
        http_client,
        config.api_base_url.clone(),
        config.api_key.clone(),
    );

    let ledger = RecipientLedger::from_config(&config.campaign);
    startup::prepare_ledger(&ledger).await;

    tracing::info!("Starting server");

    let handler = Handler::new(
        config.clone(),
        community.clone(),
        CampaignGuard::new(),
        ledger,
    );
    let bot_client = bot::start::init_bot(&config, handler).await?;

    let state = AppState::new(
        config.clone(),
        Arc::new(community),
        Arc::new(SerenityGuildGateway::new(
            bot_client.http.clone(),
            bot_client.cache.clone(),
            config.discord_guild_id,
        )),
        Arc::new(SerenityMessenger::new(bot_client.http.clone())),
    );

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(address).await?;

    tracing::info!("Webhook server running on port {}", config.port);

    axum::serve(listener, router::router().with_state(state)).await?;

    Ok(())
}
