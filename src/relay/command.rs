//! Prefix command recognition.

use strum::{Display, EnumString, IntoStaticStr};

/// Names the relay answers to after the command prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum CommandName {
    Ping,
    Clear,
    WebScrape,
    Analyze,
}

/// A fully parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping,
    Clear,
    WebScrape { url: String },
    Analyze { url: String },
}

impl Command {
    pub fn name(&self) -> CommandName {
        match self {
            Self::Ping => CommandName::Ping,
            Self::Clear => CommandName::Clear,
            Self::WebScrape { .. } => CommandName::WebScrape,
            Self::Analyze { .. } => CommandName::Analyze,
        }
    }
}

/// Outcome of reading a prefixed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Command),
    MissingArgument(CommandName),
    Unknown(String),
}

/// Parse `content` as a command if it starts with `prefix`.
///
/// Returns `None` for ordinary chat text. Names are case-sensitive; extra
/// arguments after the first are ignored.
pub fn parse(content: &str, prefix: &str) -> Option<Invocation> {
    let rest = content.trim_start().strip_prefix(prefix)?;
    let mut words = rest.split_whitespace();
    let name = words.next()?;
    let arg = words.next().map(str::to_string);

    let Ok(command) = name.parse::<CommandName>() else {
        return Some(Invocation::Unknown(name.to_string()));
    };
    let invocation = match (command, arg) {
        (CommandName::Ping, _) => Invocation::Run(Command::Ping),
        (CommandName::Clear, _) => Invocation::Run(Command::Clear),
        (CommandName::WebScrape, Some(url)) => Invocation::Run(Command::WebScrape { url }),
        (CommandName::Analyze, Some(url)) => Invocation::Run(Command::Analyze { url }),
        (name, None) => Invocation::MissingArgument(name),
    };
    Some(invocation)
}
