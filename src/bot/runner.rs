//! Telegram long-polling loop

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{debug, info, warn};

use super::commands::{command_menu, Command};
use super::responder::CommandResponder;

/// Username of the running bot, for `/cmd@botname` matching
#[derive(Debug, Clone)]
struct BotUsername(Option<String>);

/// Poll for updates until Ctrl-C
pub async fn run(bot: Bot, responder: Arc<CommandResponder>) -> Result<()> {
    let me = bot.get_me().await?;
    let username = me.user.username.clone();
    info!(
        "🤖 Bot started: @{} (ID: {})",
        username.as_deref().unwrap_or("unknown"),
        me.user.id
    );

    let menu: Vec<BotCommand> = command_menu(responder.config())
        .into_iter()
        .map(|(command, description)| BotCommand::new(command, description))
        .collect();
    if let Err(e) = bot.set_my_commands(menu).await {
        warn!(error = %e, "Failed to register command menu");
    }

    let handler = Update::filter_message().endpoint(handle_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![responder, BotUsername(username)])
        .default_handler(|update| async move {
            debug!("Ignoring update {:?}", update.id);
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Bot stopped");
    Ok(())
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    responder: Arc<CommandResponder>,
    username: BotUsername,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(command) = Command::parse(text, responder.config(), username.0.as_deref()) else {
        return Ok(());
    };

    info!(chat_id = ?msg.chat.id, command = ?command, "Handling command");
    let reply = responder.respond(&command).await;

    let mut request = bot.send_message(msg.chat.id, reply.text);
    if let Some(parse_mode) = reply.parse_mode {
        request = request.parse_mode(parse_mode);
    }
    if let Err(e) = request.await {
        warn!(chat_id = ?msg.chat.id, error = %e, "Failed to send reply");
    }
    Ok(())
}
