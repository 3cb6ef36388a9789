//! `!command` front end for the lookup-and-capture pipeline.
//!
//! Detects commands in chat text, checks argument counts, runs the matching
//! flow and always answers with a [`Reply`], never a panic or raw error.

pub mod detection;
pub mod dispatch;
pub mod handlers;
pub mod pipeline;
pub mod registry;
pub mod types;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

pub use detection::detect_command;
pub use dispatch::{CommandContext, CommandDispatcher, CommandHandler};
pub use handlers::{CharacterHandler, HelpHandler, IamHandler, ItemHandler, WhoAmIHandler};
pub use pipeline::Pipeline;
pub use registry::{builtin_commands, CommandRegistry};
pub use types::{CommandArg, CommandDef, CommandInvocation, Reply, ReplyKind};

/// Build a dispatcher pre-wired with all built-in handlers.
pub fn build_default_dispatcher(pipeline: Arc<Pipeline>) -> CommandDispatcher {
    let mut dispatcher = CommandDispatcher::new(CommandRegistry::new());

    dispatcher.register("charac", Arc::new(CharacterHandler { pipeline: Arc::clone(&pipeline) }));
    dispatcher.register("iam", Arc::new(IamHandler { pipeline: Arc::clone(&pipeline) }));
    dispatcher.register("whoami", Arc::new(WhoAmIHandler { pipeline: Arc::clone(&pipeline) }));
    dispatcher.register("item", Arc::new(ItemHandler { pipeline }));
    dispatcher.register("help", Arc::new(HelpHandler { registry: CommandRegistry::new() }));

    dispatcher
}
