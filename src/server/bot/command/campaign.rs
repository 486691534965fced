use std::sync::Arc;

use serenity::all::{CommandInteraction, Context, CreateCommand, Permissions};

use crate::server::{
    bot::handler::Handler,
    data::discord::{DirectMessenger, SerenityMessenger},
    service::campaign::CampaignService,
};

pub const NAME: &str = "start-campaign";

/// Restricted to administrators by Discord; the run itself is not re-checked here.
pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Send the link reminder DM to every unprocessed candidate")
        .default_member_permissions(Permissions::ADMINISTRATOR)
}

pub async fn run(handler: &Handler, ctx: &Context, command: &CommandInteraction) -> String {
    tracing::info!("/{} invoked by {}", NAME, command.user.tag());

    let messenger: Arc<dyn DirectMessenger> = Arc::new(SerenityMessenger::new(ctx.http.clone()));

    let service = CampaignService::new(
        &handler.guard,
        &handler.ledger,
        messenger,
        &handler.config.campaign,
    );

    match service.start().await {
        // The run is detached; dropping the handle does not cancel it
        Ok(start) => start.reply(),
        Err(e) => format!("❌ {e}"),
    }
}
