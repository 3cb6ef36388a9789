//! `kupo ask`: push one message through the command pipeline.

use std::sync::Arc;

use anyhow::{Context, Result};
use kupo_commands::{build_default_dispatcher, Pipeline};
use kupo_config::KupoConfig;

use crate::terminal_output::{note_info, render_reply};

pub async fn run(config: &KupoConfig, user: &str, message: &str) -> Result<()> {
    let pipeline = Pipeline::from_config(config)
        .await
        .context("Failed to start the lookup pipeline")?;
    let dispatcher = build_default_dispatcher(Arc::new(pipeline));

    match dispatcher.handle_message(message, user).await {
        Some(reply) => print!("{}", render_reply(&reply)),
        None => note_info("Not a command. Try `!help`."),
    }
    Ok(())
}
