//! Text command types.

use kupo_core::CaptureArtifact;

/// One positional argument of a command.
#[derive(Debug, Clone)]
pub struct CommandArg {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// If true, consumes all remaining text.
    pub capture_remaining: bool,
}

/// A registered `!command`.
#[derive(Debug, Clone)]
pub struct CommandDef {
    /// Unique key (e.g. "charac", "iam").
    pub key: String,
    pub description: String,
    /// Text aliases including the prefix (e.g. "!charac", "!lodestone").
    pub text_aliases: Vec<String>,
    pub args: Vec<CommandArg>,
}

impl CommandDef {
    /// Primary alias (first in list), or key if none.
    pub fn primary_alias(&self) -> &str {
        self.text_aliases.first().map(|s| s.as_str()).unwrap_or(&self.key)
    }

    /// `!charac server first last`
    pub fn usage(&self) -> String {
        std::iter::once(self.primary_alias())
            .chain(self.args.iter().map(|a| a.name.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn required_args(&self) -> usize {
        self.args.iter().filter(|a| a.required).count()
    }
}

/// A detected and parsed command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub key: String,
    pub raw_alias: String,
    /// Positional arguments parsed from remaining text.
    pub args: Vec<String>,
    /// Full remaining text after the command name.
    pub raw_args: String,
}

impl CommandInvocation {
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Success,
    Usage,
    NotFound,
    Error,
}

/// What a handler hands back to the chat layer: an embed-like card with an
/// optional image attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub title: String,
    pub description: Option<String>,
    pub attachment: Option<CaptureArtifact>,
    pub thumbnail_url: Option<String>,
}

impl Reply {
    pub fn success(title: impl Into<String>) -> Self {
        Self::with_kind(ReplyKind::Success, title)
    }

    pub fn usage(usage: &str) -> Self {
        Self::with_kind(ReplyKind::Usage, format!("Usage: `{usage}`"))
    }

    pub fn not_found(title: impl Into<String>) -> Self {
        Self::with_kind(ReplyKind::NotFound, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::with_kind(ReplyKind::Error, title)
    }

    fn with_kind(kind: ReplyKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
            attachment: None,
            thumbnail_url: None,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn attachment(mut self, artifact: CaptureArtifact) -> Self {
        self.attachment = Some(artifact);
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }
}
