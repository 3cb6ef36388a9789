/// Command registry: the built-in `!commands`.
use crate::types::{CommandArg, CommandDef};

pub const PREFIX: char = '!';

fn arg(name: &str, description: &str) -> CommandArg {
    CommandArg {
        name: name.to_string(),
        description: description.to_string(),
        required: true,
        capture_remaining: false,
    }
}

fn remaining_arg(name: &str, description: &str) -> CommandArg {
    CommandArg {
        capture_remaining: true,
        ..arg(name, description)
    }
}

fn character_args() -> Vec<CommandArg> {
    vec![
        arg("server", "World the character lives on"),
        arg("first", "First name"),
        arg("last", "Last name"),
    ]
}

/// Build the built-in command list.
pub fn builtin_commands() -> Vec<CommandDef> {
    vec![
        CommandDef {
            key: "charac".into(),
            description: "Show someone's character profile.".into(),
            text_aliases: vec!["!charac".into(), "!lodestone".into()],
            args: character_args(),
        },
        CommandDef {
            key: "iam".into(),
            description: "Register your own character.".into(),
            text_aliases: vec!["!iam".into()],
            args: character_args(),
        },
        CommandDef {
            key: "whoami".into(),
            description: "Show your registered character.".into(),
            text_aliases: vec!["!whoami".into()],
            args: vec![],
        },
        CommandDef {
            key: "item".into(),
            description: "Show market board prices for an item.".into(),
            text_aliases: vec!["!item".into()],
            args: vec![remaining_arg("name", "Localized item name")],
        },
        CommandDef {
            key: "help".into(),
            description: "Show available commands.".into(),
            text_aliases: vec!["!help".into()],
            args: vec![],
        },
    ]
}

pub struct CommandRegistry {
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: builtin_commands() }
    }

    pub fn all(&self) -> &[CommandDef] {
        &self.commands
    }

    /// Find a command by text alias (e.g. "!lodestone"). Case-insensitive.
    pub fn find_by_alias(&self, alias: &str) -> Option<&CommandDef> {
        let lower = alias.to_lowercase();
        self.commands
            .iter()
            .find(|c| c.text_aliases.iter().any(|a| a.to_lowercase() == lower))
    }

    pub fn find_by_key(&self, key: &str) -> Option<&CommandDef> {
        self.commands.iter().find(|c| c.key == key)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_unique_and_prefixed() {
        let registry = CommandRegistry::new();
        let mut seen = std::collections::HashSet::new();
        for cmd in registry.all() {
            for alias in &cmd.text_aliases {
                assert!(alias.starts_with(PREFIX), "{alias}");
                assert!(seen.insert(alias.clone()), "duplicate alias {alias}");
            }
        }
    }

    #[test]
    fn lodestone_is_an_alias_of_charac() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.find_by_alias("!LODESTONE").unwrap().key, "charac");
        assert_eq!(registry.find_by_key("charac").unwrap().usage(), "!charac server first last");
        assert_eq!(registry.find_by_key("item").unwrap().required_args(), 1);
    }
}
