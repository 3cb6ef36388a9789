/// Command detection: identify `!commands` in inbound messages.
use crate::registry::{CommandRegistry, PREFIX};
use crate::types::{CommandArg, CommandInvocation};

/// Detect a command at the start of a message.
///
/// Returns `None` for normal chat text and for unknown `!words`.
pub fn detect_command(text: &str, registry: &CommandRegistry) -> Option<CommandInvocation> {
    let trimmed = text.trim();
    if !trimmed.starts_with(PREFIX) {
        return None;
    }

    let (alias_part, rest) = trimmed
        .split_once(char::is_whitespace)
        .map(|(a, r)| (a, r.trim()))
        .unwrap_or((trimmed, ""));

    let def = registry.find_by_alias(alias_part)?;
    let args = parse_args(rest, &def.args);

    Some(CommandInvocation {
        key: def.key.clone(),
        raw_alias: alias_part.to_string(),
        args,
        raw_args: rest.to_string(),
    })
}

/// One whitespace-separated token per argument; a `capture_remaining`
/// argument takes the rest of the line. Surplus tokens are dropped.
fn parse_args(text: &str, arg_defs: &[CommandArg]) -> Vec<String> {
    let mut result = Vec::new();
    let mut remaining = text.trim();

    for def in arg_defs {
        if remaining.is_empty() {
            break;
        }
        if def.capture_remaining {
            result.push(remaining.to_string());
            break;
        }
        let (token, rest) = remaining
            .split_once(char::is_whitespace)
            .map(|(t, r)| (t, r.trim_start()))
            .unwrap_or((remaining, ""));
        result.push(token.to_string());
        remaining = rest;
    }
    result
}
