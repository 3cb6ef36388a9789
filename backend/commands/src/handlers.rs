/// Built-in command handlers.
///
/// Each handler is a concrete struct implementing `CommandHandler`; argument
/// counts are already checked by the dispatcher.
use std::sync::Arc;

use async_trait::async_trait;
use kupo_core::{CharacterName, ProfileRecord, Resolution, Result};

use crate::dispatch::{CommandContext, CommandHandler};
use crate::pipeline::Pipeline;
use crate::registry::CommandRegistry;
use crate::types::{CommandInvocation, Reply};

fn character_args(inv: &CommandInvocation) -> (&str, CharacterName) {
    let server = inv.arg(0).unwrap_or_default();
    let name = CharacterName::new(inv.arg(1).unwrap_or_default(), inv.arg(2).unwrap_or_default());
    (server, name)
}

fn character_card(server: &str, name: &CharacterName) -> String {
    format!("Server: {server}\nName: {}", name.full_name())
}

// ---------------------------------------------------------------------------
// !charac / !lodestone
// ---------------------------------------------------------------------------

pub struct CharacterHandler {
    pub pipeline: Arc<Pipeline>,
}

#[async_trait]
impl CommandHandler for CharacterHandler {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<Reply> {
        let (server, name) = character_args(inv);
        let reply = match self.pipeline.character_snapshot(&ctx.request_id, server, &name).await? {
            Some(artifact) => Reply::success("That's them, right?!")
                .description(character_card(server, &name))
                .attachment(artifact),
            None => Reply::not_found("Nobody by that name. A ghost, maybe?"),
        };
        Ok(reply)
    }
}

// ---------------------------------------------------------------------------
// !iam
// ---------------------------------------------------------------------------

pub struct IamHandler {
    pub pipeline: Arc<Pipeline>,
}

#[async_trait]
impl CommandHandler for IamHandler {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<Reply> {
        let (server, name) = character_args(inv);
        let record = ProfileRecord::new(server, &name.first, &name.last);
        let reply = match self.pipeline.register_profile(&ctx.request_id, &ctx.user_id, record).await? {
            Resolution::Found(_) => Reply::success("Profile stored").description(character_card(server, &name)),
            Resolution::NotFound => Reply::not_found("No character found on Lodestone!"),
        };
        Ok(reply)
    }
}

// ---------------------------------------------------------------------------
// !whoami
// ---------------------------------------------------------------------------

pub struct WhoAmIHandler {
    pub pipeline: Arc<Pipeline>,
}

#[async_trait]
impl CommandHandler for WhoAmIHandler {
    async fn handle(&self, ctx: &CommandContext, _inv: &CommandInvocation) -> Result<Reply> {
        let Some(profile) = self.pipeline.profiles().get(&ctx.user_id).await else {
            return Ok(Reply::not_found(
                "No profile found. Use `!iam server first last` to set your profile.",
            ));
        };
        let name = profile.name();
        let reply = match self
            .pipeline
            .character_snapshot(&ctx.request_id, &profile.server, &name)
            .await?
        {
            Some(artifact) => Reply::success("It's YOU!")
                .description(character_card(&profile.server, &name))
                .attachment(artifact),
            None => Reply::not_found("No character found on Lodestone!"),
        };
        Ok(reply)
    }
}

// ---------------------------------------------------------------------------
// !item
// ---------------------------------------------------------------------------

pub struct ItemHandler {
    pub pipeline: Arc<Pipeline>,
}

#[async_trait]
impl CommandHandler for ItemHandler {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<Reply> {
        let name = inv.arg(0).unwrap_or_default();
        let reply = match self.pipeline.item_snapshot(&ctx.request_id, name).await? {
            Some((id, artifact)) => Reply::success(name.trim())
                .description(format!("Market board for item {id}"))
                .thumbnail(self.pipeline.item_icon_url(&id))
                .attachment(artifact),
            None => Reply::not_found("Cannot find the item"),
        };
        Ok(reply)
    }
}

// ---------------------------------------------------------------------------
// !help
// ---------------------------------------------------------------------------

pub struct HelpHandler {
    pub registry: CommandRegistry,
}

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle(&self, _ctx: &CommandContext, _inv: &CommandInvocation) -> Result<Reply> {
        let lines: Vec<String> = self
            .registry
            .all()
            .iter()
            .map(|cmd| {
                let aliases = cmd.text_aliases.get(1..).unwrap_or_default().join(", ");
                let aka = if aliases.is_empty() { String::new() } else { format!(" ({aliases})") };
                format!("`{}`{aka}: {}", cmd.usage(), cmd.description)
            })
            .collect();
        Ok(Reply::success("Help").description(lines.join("\n")))
    }
}
