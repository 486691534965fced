use serenity::all::{CommandInteraction, Context, EditInteractionResponse, Interaction};

use crate::server::bot::{
    command::{campaign, link_account, verify},
    handler::Handler,
};

/// Handles the interaction_create event
///
/// Slash commands are deferred as ephemeral before any slow work, then the deferred
/// reply is edited with the command's result. Other interaction kinds are ignored.
pub async fn handle_interaction(handler: &Handler, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    if let Err(e) = command.defer_ephemeral(&ctx).await {
        tracing::error!("Failed to defer /{}: {:?}", command.data.name, e);
        return;
    }

    let reply = dispatch(handler, &ctx, &command).await;

    if let Err(e) = command
        .edit_response(&ctx, EditInteractionResponse::new().content(reply))
        .await
    {
        tracing::error!("Failed to reply to /{}: {:?}", command.data.name, e);
    }
}

async fn dispatch(handler: &Handler, ctx: &Context, command: &CommandInteraction) -> String {
    match command.data.name.as_str() {
        link_account::NAME => link_account::run(handler, command).await,
        verify::NAME => verify::run(handler, ctx, command).await,
        campaign::NAME => campaign::run(handler, ctx, command).await,
        other => {
            tracing::warn!("Received unknown command /{}", other);
            "❌ Unknown command.".to_string()
        }
    }
}
