/// Command dispatch: route detected commands to handlers and turn every
/// outcome, including errors, into a [`Reply`].
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use kupo_core::{PipelineError, Result};
use logging::{redact_sensitive_data, EventLogger, PipelineEvent};
use tracing::{info, warn};
use uuid::Uuid;

use crate::detection::detect_command;
use crate::registry::CommandRegistry;
use crate::types::{CommandInvocation, Reply};

/// Context passed to every command handler.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub user_id: String,
    /// Correlates log events and names capture artifacts.
    pub request_id: String,
}

impl CommandContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            request_id: Uuid::new_v4().simple().to_string(),
        }
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<Reply>;
}

pub struct CommandDispatcher {
    registry: CommandRegistry,
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandDispatcher {
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            registry,
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, key: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(key.into(), handler);
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Detect and run a command in `text`. `None` if it is not a command.
    pub async fn handle_message(&self, text: &str, user_id: &str) -> Option<Reply> {
        let inv = detect_command(text, &self.registry)?;
        let ctx = CommandContext::new(user_id);
        Some(self.dispatch(&ctx, &inv).await)
    }

    pub async fn dispatch(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Reply {
        let usage = self
            .registry
            .find_by_key(&inv.key)
            .map(|def| (def.usage(), def.required_args()));
        if let Some((usage, required)) = &usage {
            if inv.args.len() < *required {
                return Reply::usage(usage);
            }
        }

        let Some(handler) = self.handlers.get(&inv.key) else {
            return Reply::error(format!("No handler registered for {}", inv.raw_alias));
        };

        info!(command = %inv.key, user_id = %ctx.user_id, request_id = %ctx.request_id, "Dispatching command");
        match handler.handle(ctx, inv).await {
            Ok(reply) => reply,
            Err(err) => {
                let usage = usage.map(|(u, _)| u).unwrap_or_else(|| inv.raw_alias.clone());
                error_reply(ctx, &inv.key, &usage, err)
            }
        }
    }
}

fn error_reply(ctx: &CommandContext, command: &str, usage: &str, err: PipelineError) -> Reply {
    warn!(command, request_id = %ctx.request_id, error = %err, "Command failed");
    EventLogger::log_event(
        &ctx.request_id,
        PipelineEvent::Error {
            stage: command.to_string(),
            error_msg: err.to_string(),
        },
    );

    let detail = redact_sensitive_data(&err.to_string());
    match err {
        PipelineError::InvalidInput(_) => Reply::usage(usage).description(detail),
        PipelineError::LookupFailed(_) => {
            Reply::error("The character directory did not answer. Try again later.").description(detail)
        }
        PipelineError::CaptureFailed(_) => Reply::error("Could not capture the page.").description(detail),
        PipelineError::Storage(_) => Reply::error("Could not save your profile.").description(detail),
        PipelineError::Other(_) => Reply::error("Something went wrong.").description(detail),
    }
}
